use symscan_span::Span;
use symscan_span::id::Id;

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct DeclarationTag;

/// Running number handed to every identifier token, in source order.
pub type DeclarationIndex = Id<DeclarationTag>;
pub type DeclarationIndexAllocator = symscan_span::id::IdAllocator<DeclarationTag>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Num,
    String,
    Punct,
    Relop,
    Assign,
    Addop,
    Mulop,
    Logical,

    // Unknown token, unexpected character
    Unknown,

    // End of input, returned repeatedly once the source is exhausted.
    Eof,

    // String literal that reached the end of input before its closing quote.
    BadString,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Num => "NUM",
            TokenKind::String => "STRING",
            TokenKind::Punct => "PUNCT",
            TokenKind::Relop => "RELOP",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Addop => "ADDOP",
            TokenKind::Mulop => "MULOP",
            TokenKind::Logical => "LOGICAL",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Eof => "EOF",
            TokenKind::BadString => "BAD_STRING",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Box<str>,
    pub span: Span,
    pub declaration_index: Option<DeclarationIndex>,
}

impl Default for Token {
    fn default() -> Self {
        Self {
            kind: TokenKind::Eof,
            text: "EOF".into(),
            span: Span::default(),
            declaration_index: None,
        }
    }
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            declaration_index: None,
        }
    }

    pub fn with_declaration_index(mut self, index: DeclarationIndex) -> Self {
        self.declaration_index = Some(index);
        self
    }

    pub fn row(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punct && self.text.chars().eq(std::iter::once(ch))
    }

    pub fn get_identifier(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Identifier => Some(&self.text),
            _ => None,
        }
    }

    pub fn get_keyword(&self) -> Option<crate::keyword::Keyword> {
        match self.kind {
            TokenKind::Keyword => crate::keyword::Keyword::lookup(&self.text),
            _ => None,
        }
    }
}

/// Renders `<text, row, column, index, KIND>`, with `-1` for tokens without a
/// declaration index.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}, {}, ", self.text, self.row(), self.column())?;
        match self.declaration_index {
            Some(index) => write!(f, "{index}")?,
            None => f.write_str("-1")?,
        }
        write!(f, ", {}>", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use symscan_span::LineColumn;

    fn span(line: u32, column: u32, len: u32) -> Span {
        Span::new(
            LineColumn::new(line, column),
            LineColumn::new(line, column + len),
        )
    }

    #[test]
    fn test_display_identifier_with_index() {
        let token = Token::new(TokenKind::Identifier, "count", span(3, 9, 5))
            .with_declaration_index(DeclarationIndex::new(2));

        assert_eq!(token.to_string(), "<count, 3, 9, 2, IDENTIFIER>");
        assert_eq!(token.get_identifier(), Some("count"));
    }

    #[test]
    fn test_display_without_index() {
        let token = Token::new(TokenKind::Relop, "!=", span(1, 4, 2));

        assert_eq!(token.to_string(), "<!=, 1, 4, -1, RELOP>");
        assert_eq!(token.get_identifier(), None);
    }

    #[test]
    fn test_is_punct_matches_single_char_only() {
        let paren = Token::new(TokenKind::Punct, "(", span(1, 1, 1));
        let relop = Token::new(TokenKind::Relop, "<", span(1, 1, 1));

        assert!(paren.is_punct('('));
        assert!(!paren.is_punct(')'));
        assert!(!relop.is_punct('<'));
    }

    #[test]
    fn test_default_token_is_eof() {
        let token = Token::default();
        assert!(token.is_eof());
        assert_eq!(token.kind.as_str(), "EOF");
    }
}
