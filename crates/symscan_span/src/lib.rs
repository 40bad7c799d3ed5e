pub mod id;
mod span;

pub use span::*;
