//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig, SourceFormat};
pub use source::{DataTable, SourceMetadata};
