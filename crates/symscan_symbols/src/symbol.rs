use symscan_hashmap::Keyed;

pub const GLOBAL_SCOPE: &str = "global";
pub const FUNCTION_TYPE: &str = "function";
/// Type recorded for identifiers used without a visible declaration.
pub const UNDECLARED_TYPE: &str = "not in file";
/// Size of a symbol whose storage could not be inferred.
pub const UNKNOWN_SIZE: i32 = -1;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Symbol {
    pub lexeme: Box<str>,
    pub size: i32,
    pub symbol_type: Box<str>,
    pub scope: Box<str>,
}

impl Symbol {
    pub fn new(lexeme: &str, size: i32, symbol_type: &str, scope: &str) -> Self {
        Symbol {
            lexeme: lexeme.into(),
            size,
            symbol_type: symbol_type.into(),
            scope: scope.into(),
        }
    }

    pub fn global(lexeme: &str, size: i32, symbol_type: &str) -> Self {
        Symbol::new(lexeme, size, symbol_type, GLOBAL_SCOPE)
    }

    pub fn function(lexeme: &str, size: i32) -> Self {
        Symbol::global(lexeme, size, FUNCTION_TYPE)
    }

    pub fn undeclared(lexeme: &str) -> Self {
        Symbol::global(lexeme, UNKNOWN_SIZE, UNDECLARED_TYPE)
    }

    pub fn is_function(&self) -> bool {
        &*self.symbol_type == FUNCTION_TYPE
    }

    pub fn has_known_size(&self) -> bool {
        self.size != UNKNOWN_SIZE
    }
}

impl Keyed for Symbol {
    type Key = str;

    fn key(&self) -> &str {
        &self.lexeme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constructors() {
        assert_eq!(
            Symbol::function("main", 4),
            Symbol::new("main", 4, "function", "global")
        );
        assert!(Symbol::function("main", 4).is_function());

        let undeclared = Symbol::undeclared("errno");
        assert_eq!(&*undeclared.symbol_type, "not in file");
        assert!(!undeclared.has_known_size());
        assert!(!undeclared.is_function());
    }

    #[test]
    fn test_symbol_is_keyed_by_lexeme() {
        let symbol = Symbol::global("counter", 4, "int");

        assert_eq!(symbol.key(), "counter");
    }
}
