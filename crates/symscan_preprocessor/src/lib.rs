//! Blanks out the parts of a C source file the scanner must not see.
//!
//! Preprocessing directives, comments and (optionally) the bodies of string and
//! character literals are replaced by spaces. Newlines are always kept, so every
//! line of the output has the same length as the corresponding input line and
//! token positions reported downstream still point into the original file.

mod preprocessor;

pub use preprocessor::{PreprocessOptions, Preprocessor, preprocess, preprocess_into};
