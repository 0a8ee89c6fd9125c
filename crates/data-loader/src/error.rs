//! Error types for the data-loader crate.
//!
//! Every failure that can stop a table from being built is a variant here.
//! Malformed numeric cells are NOT errors under the default coercion policy:
//! those rows are dropped during normalization (see [`crate::NumericCoercion`]).

use thiserror::Error;

/// Errors that can occur while reading and normalizing a table
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// One or more required columns are absent after header normalization
    ///
    /// `missing` is sorted so the message is stable.
    #[error("Required columns missing: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// No input source resolved to a readable file
    #[error("No input table found (tried: {})", tried.join(", "))]
    EmptyInput { tried: Vec<String> },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV framing itself was malformed (unbalanced quotes, bad UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A numeric cell failed coercion under [`crate::NumericCoercion::Strict`]
    #[error("Invalid value for {field} at row {row}: {value:?}")]
    InvalidValue {
        field: String,
        row: usize,
        value: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
