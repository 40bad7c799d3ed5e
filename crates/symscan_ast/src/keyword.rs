use crate::define_keywords;

define_keywords! {
    Auto => "auto",
    Break => "break",
    Case => "case",
    Char => "char",
    Const => "const",
    Continue => "continue",
    Default => "default",
    Do => "do",
    Double => "double",
    Else => "else",
    Enum => "enum",
    Extern => "extern",
    Float => "float",
    For => "for",
    Goto => "goto",
    If => "if",
    Inline => "inline",
    Int => "int",
    Long => "long",
    Register => "register",
    Restrict => "restrict",
    Return => "return",
    Short => "short",
    Signed => "signed",
    Sizeof => "sizeof",
    Static => "static",
    Struct => "struct",
    Switch => "switch",
    Typedef => "typedef",
    Union => "union",
    Unsigned => "unsigned",
    Void => "void",
    Volatile => "volatile",
    While => "while",

    // Library type names the scanner treats as reserved words.
    File => "FILE",
    SizeT => "size_t",
}

pub fn is_keyword(value: &str) -> bool {
    Keyword::lookup(value).is_some()
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
