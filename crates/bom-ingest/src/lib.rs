//! bom-ingest: reading the delimited BOM export into `ComponentRow`s.
//!
//! The export uses `(#)` as field separator, ISO-8859-1 text and decimal
//! commas. Everything locale- or format-specific is handled here so rows
//! reach the engine with canonical ids and plain `f64` quantities.

pub mod columns;
pub mod decode;
pub mod number;
pub mod table;

pub use columns::ColumnMap;
pub use decode::Encoding;
pub use number::{parse_decimal, parse_level};
pub use table::{IngestOptions, parse_table, read_table};

use std::path::PathBuf;

pub type IngestResult<T> = Result<T, IngestError>;

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("Failed to read BOM file: {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Field separator must not be empty")]
    EmptySeparator,

    #[error("Missing required column: {column}")]
    MissingColumn { column: &'static str },

    #[error("Line {line}: invalid number in column '{column}': {value:?}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: empty item code")]
    MissingItem { line: u64 },
}
