use std::error::Error;
use std::fmt::{Display, Formatter};

use symscan_ast::token::Token;
use symscan_hashmap::MapError;
use symscan_span::Span;

/// The table refused a symbol for a reason other than a duplicate lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectError {
    pub lexeme: Box<str>,
    pub span: Span,
    pub kind: MapError,
}

impl CollectError {
    pub fn new(token: &Token, kind: MapError) -> Self {
        Self {
            lexeme: token.text.clone(),
            span: token.span,
            kind,
        }
    }
}

impl Error for CollectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}

impl Display for CollectError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "cannot record `{}` at {}:{}: {}",
            self.lexeme, self.span.start.line, self.span.start.column, self.kind
        )
    }
}
