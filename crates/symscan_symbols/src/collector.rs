use log::debug;
use symscan_ast::keyword::Keyword;
use symscan_ast::token::{Token, TokenKind};
use symscan_lexer::Lexer;

use crate::error::CollectError;
use crate::symbol::{Symbol, UNKNOWN_SIZE};
use crate::table::SymbolTable;

/// Library functions recorded as functions even when they are not called.
pub const BUILTIN_FUNCTIONS: [&str; 11] = [
    "printf", "scanf", "fopen", "fclose", "malloc", "calloc", "free", "strlen", "strcpy",
    "strcmp", "exit",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// Storage size in bytes of a type keyword, `None` for keywords that do not
/// start a declaration.
pub fn type_size(keyword: Keyword) -> Option<i32> {
    match keyword {
        Keyword::Void => Some(0),
        Keyword::Char => Some(1),
        Keyword::Short => Some(2),
        Keyword::Int | Keyword::Float | Keyword::Signed | Keyword::Unsigned => Some(4),
        Keyword::Long | Keyword::Double => Some(8),
        _ => None,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectorOptions {
    /// Record identifiers that match no declaration rule as `not in file`.
    pub record_undeclared: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    /// Tokens seen, not counting the end-of-file sentinel.
    pub tokens: usize,
    pub identifiers: usize,
    pub recorded: usize,
    /// Identifiers whose lexeme was already in the table.
    pub duplicates: usize,
}

/// The most recent type keyword and the row it appeared on.
#[derive(Debug, Clone, Copy)]
struct PendingType {
    keyword: Keyword,
    size: i32,
    row: u32,
}

impl PendingType {
    fn from_token(token: &Token) -> Option<Self> {
        let keyword = token.get_keyword()?;

        Some(PendingType {
            keyword,
            size: type_size(keyword)?,
            row: token.row(),
        })
    }
}

/// Turns identifier tokens into symbols.
///
/// An identifier on the same row as a preceding type keyword takes that type
/// and its size, or becomes a function of that size when followed by `(`. A
/// `;` ends the pending declaration. Other identifiers followed by `(` and the
/// builtin library functions are recorded as functions of unknown size.
#[derive(Debug, Default)]
pub struct DeclarationCollector {
    options: CollectorOptions,
    pending: Option<PendingType>,
    stats: CollectStats,
}

impl DeclarationCollector {
    pub fn new(options: CollectorOptions) -> Self {
        DeclarationCollector {
            options,
            ..Self::default()
        }
    }

    /// Consumes `tokens` up to the first end-of-file token, recording symbols in `table`.
    pub fn collect<I>(
        mut self,
        tokens: I,
        table: &mut SymbolTable,
    ) -> Result<CollectStats, CollectError>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut tokens = tokens.into_iter().peekable();

        while let Some(token) = tokens.next() {
            if token.is_eof() {
                break;
            }
            self.stats.tokens += 1;

            match token.kind {
                TokenKind::Keyword => {
                    if let Some(pending) = PendingType::from_token(&token) {
                        self.pending = Some(pending);
                    }
                }
                TokenKind::Identifier => {
                    self.stats.identifiers += 1;
                    // The lookahead stays in the stream, it may be an identifier itself.
                    if let Some(symbol) = self.classify(&token, tokens.peek()) {
                        self.record(symbol, &token, table)?;
                    }
                }
                TokenKind::Punct if token.is_punct(';') => self.pending = None,
                _ => {}
            }
        }

        Ok(self.stats)
    }

    fn classify(&self, identifier: &Token, next: Option<&Token>) -> Option<Symbol> {
        let lexeme = &*identifier.text;
        let is_call = next.is_some_and(|next| next.is_punct('('));

        match self.pending {
            Some(pending) if pending.row == identifier.row() => {
                if is_call {
                    Some(Symbol::function(lexeme, pending.size))
                } else {
                    Some(Symbol::global(lexeme, pending.size, pending.keyword.as_str()))
                }
            }
            _ if is_call || is_builtin(lexeme) => Some(Symbol::function(lexeme, UNKNOWN_SIZE)),
            _ if self.options.record_undeclared => Some(Symbol::undeclared(lexeme)),
            _ => None,
        }
    }

    fn record(
        &mut self,
        symbol: Symbol,
        token: &Token,
        table: &mut SymbolTable,
    ) -> Result<(), CollectError> {
        match table.insert(symbol) {
            Ok(()) => {
                debug!("Recorded `{}` from {}", token.text, token.span.start);
                self.stats.recorded += 1;
                Ok(())
            }
            Err(error) if error.is_duplicate() => {
                debug!(
                    "Skipping `{}` at {}, already recorded",
                    token.text, token.span.start
                );
                self.stats.duplicates += 1;
                Ok(())
            }
            Err(error) => Err(CollectError::new(token, error.kind())),
        }
    }
}

/// Lexes `source` and records its declarations in `table`.
pub fn collect_declarations(
    source: &str,
    options: CollectorOptions,
    table: &mut SymbolTable,
) -> Result<CollectStats, CollectError> {
    DeclarationCollector::new(options).collect(Lexer::new(source), table)
}
