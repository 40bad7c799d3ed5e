use log::trace;
use symscan_ast::{
    keyword::is_keyword,
    token::{DeclarationIndexAllocator, Token, TokenKind},
};
use symscan_span::{LineColumn, Span};

#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    chars: std::str::Chars<'src>, // char iterator over `source`.
    position: usize,
    current_line: u32,
    current_column: u32,
    current_char: char,
    next_char: char,
    declarations: DeclarationIndexAllocator,
    finished: bool,
}

impl Lexer<'_> {
    pub fn new(source: &str) -> Lexer<'_> {
        let mut chars = source.chars();
        let current_char = chars.next().unwrap_or('\0');
        let next_char = chars.next().unwrap_or('\0');

        Lexer {
            source,
            position: 0,
            current_line: 1,
            current_column: 1,
            current_char,
            next_char,
            chars,
            declarations: DeclarationIndexAllocator::default(),
            finished: false,
        }
    }

    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    pub fn current_column(&self) -> u32 {
        self.current_column
    }

    pub fn source(&self) -> &str {
        self.source
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    fn advance(&mut self) {
        let previous_char = self.current_char;

        self.current_char = self.next_char;
        self.next_char = self.chars.next().unwrap_or('\0');

        self.position += previous_char.len_utf8();

        if previous_char == '\n' {
            self.current_line += 1;
            self.current_column = 1;
        } else {
            self.current_column += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    #[inline(always)]
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while !self.is_at_end() && predicate(self.current_char) {
            self.advance();
        }
    }

    fn is_identifier_start(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_alphanumeric(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        self.advance_while(Self::is_alphanumeric);
        &self.source[start..self.position]
    }

    fn read_number_literal(&mut self, start: LineColumn) -> Token {
        let start_position = self.position;
        let mut seen_dot = false;
        let mut seen_exponent = false;

        self.advance_while(|ch| ch.is_ascii_digit());

        loop {
            match self.current_char {
                '.' if !seen_dot && !self.is_at_end() => {
                    seen_dot = true;
                    self.advance();
                }
                'e' | 'E'
                    if !seen_exponent
                        && (self.next_char.is_ascii_digit() || matches!(self.next_char, '+' | '-')) =>
                {
                    seen_exponent = true;
                    self.advance();
                    self.advance();
                }
                ch if ch.is_ascii_digit() && !self.is_at_end() => self.advance(),
                _ => break,
            }
        }

        self.token(TokenKind::Num, start_position, start)
    }

    /// Reads a `"`-delimited literal, including both quotes. Backslash escapes the
    /// following character, which may be a newline.
    fn read_string_literal(&mut self, start: LineColumn) -> Token {
        let start_position = self.position;
        self.advance();

        while !self.is_at_end() {
            match self.current_char {
                '"' => {
                    self.advance();
                    return self.token(TokenKind::String, start_position, start);
                }
                '\\' => {
                    self.advance();
                    if !self.is_at_end() {
                        self.advance();
                    }
                }
                _ => self.advance(),
            }
        }

        self.token(TokenKind::BadString, start_position, start)
    }

    fn line_column(&self) -> LineColumn {
        LineColumn {
            line: self.current_line,
            column: self.current_column,
        }
    }

    fn token(&self, kind: TokenKind, start_position: usize, start: LineColumn) -> Token {
        Token::new(
            kind,
            &self.source[start_position..self.position],
            Span::new(start, self.line_column()),
        )
    }

    /// Consumes `len` characters and produces a token of `kind` covering them.
    fn operator(&mut self, kind: TokenKind, len: usize, start: LineColumn) -> Token {
        let start_position = self.position;
        for _ in 0..len {
            self.advance();
        }
        self.token(kind, start_position, start)
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.line_column();

        if self.is_at_end() {
            return Token::new(TokenKind::Eof, "EOF", Span::new(start, start));
        }

        let ch = self.current_char;
        let next = self.next_char;

        let token = match ch {
            ch if Self::is_identifier_start(ch) => {
                let start_position = self.position;
                let identifier = self.read_identifier();

                if is_keyword(identifier) {
                    self.token(TokenKind::Keyword, start_position, start)
                } else {
                    let index = self.declarations.next_id();
                    self.token(TokenKind::Identifier, start_position, start)
                        .with_declaration_index(index)
                }
            }
            '"' => self.read_string_literal(start),
            '0'..='9' => self.read_number_literal(start),
            '<' | '>' | '=' | '!' if next == '=' => self.operator(TokenKind::Relop, 2, start),
            '<' | '>' => self.operator(TokenKind::Relop, 1, start),
            '&' if next == '&' => self.operator(TokenKind::Logical, 2, start),
            '|' if next == '|' => self.operator(TokenKind::Logical, 2, start),
            '&' | '|' | '!' | '^' | '~' => self.operator(TokenKind::Logical, 1, start),
            '+' | '-' | '*' | '/' | '%' if next == '=' => {
                self.operator(TokenKind::Assign, 2, start)
            }
            '=' => self.operator(TokenKind::Assign, 1, start),
            '+' | '-' if next == ch => self.operator(TokenKind::Addop, 2, start),
            '+' | '-' => self.operator(TokenKind::Addop, 1, start),
            '*' | '/' | '%' => self.operator(TokenKind::Mulop, 1, start),
            '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',' | '.' | '\'' | '\\' => {
                self.operator(TokenKind::Punct, 1, start)
            }
            _ => self.operator(TokenKind::Unknown, 1, start),
        };

        trace!("{token}");

        token
    }
}

/// Yields every token up to and including the `EOF` sentinel, then stops.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        self.finished = token.is_eof();
        Some(token)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}
