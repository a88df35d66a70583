//! Source text model: immutable buffer, spans, and line lookup.

mod source;
mod span;

pub use source::{SourceText, TextLine};
pub use span::TextSpan;
