pub mod keyword;
pub(crate) mod macros;
pub mod token;

pub use symscan_span::{LineColumn, Span};
