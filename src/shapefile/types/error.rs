//! Custom error types for the shapefile-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every variant is terminal for the decode call that produced it: record
/// boundaries are only known once the preceding record decoded cleanly.
#[derive(Debug, Error)]
pub enum ShapefileError {
    /// An error originating from the underlying byte source (other than running out of bytes).
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The main file header is structurally invalid (e.g., wrong magic code).
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The header declares a format version other than 1000.
    #[error("Unsupported shapefile version: {0}. Only version 1000 is supported.")]
    UnsupportedVersion(i32),

    /// Fewer bytes were available than a field requires.
    #[error("Truncated input: ran out of bytes while reading {context} at offset {offset}")]
    Truncated { context: &'static str, offset: u64 },

    /// A record's shape-type tag is not one of the fourteen known codes.
    #[error("Unknown shape type {code} in record {record_number}")]
    UnknownShapeType { code: i32, record_number: i32 },

    /// Decoding a record would consume more bytes than its header declares.
    #[error(
        "Record {record_number} declares {declared} content bytes, \
         but decoding requires at least {required}"
    )]
    RecordLengthMismatch {
        record_number: i32,
        declared: usize,
        required: usize,
    },

    /// A count or length field is negative.
    #[error("Invalid {field} in record {record_number}: {value}")]
    InvalidCount {
        field: &'static str,
        value: i32,
        record_number: i32,
    },

    /// Strict record numbering was requested and a record is out of sequence.
    #[error("Record number mismatch: expected {expected}, found {found}")]
    RecordNumberMismatch { expected: i32, found: i32 },
}

/// A convenience `Result` type alias using the crate's `ShapefileError` type.
pub type Result<T> = std::result::Result<T, ShapefileError>;
