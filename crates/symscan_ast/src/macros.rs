#[macro_export]
macro_rules! define_keywords {
    ($($keyword:ident => $str_value:literal),* $(,)?) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($keyword),*
        }

        #[allow(non_upper_case_globals)]
        pub mod kw {
            $(pub const $keyword: &str = $str_value;)*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$keyword),*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$keyword => kw::$keyword),*
                }
            }

            pub fn lookup(value: &str) -> Option<Keyword> {
                match value {
                    $($str_value => Some(Keyword::$keyword),)*
                    _ => None,
                }
            }
        }
    };
}
