// File: ./src/error.rs
// Failures raised while reading a calendar provider row.
use std::fmt;

/// A row from the calendar provider could not be read as an instance.
///
/// All variants describe the same class of failure (a malformed or short
/// row). They are surfaced to the caller as-is; no default is substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataAccessError {
    /// The row does not have the projection's column count.
    ColumnCount { expected: usize, found: usize },
    /// A labeled row lacks a required column.
    MissingColumn(String),
    /// A cell holds a value that cannot be read as the column's type.
    TypeMismatch {
        column: String,
        expected: &'static str,
    },
    /// An integer column is NULL.
    NullValue(String),
    /// The normalized timestamp cannot be represented.
    OutOfRange { column: String, millis: i64 },
}

impl fmt::Display for DataAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataAccessError::ColumnCount { expected, found } => write!(
                f,
                "Expected {} columns in instance row, found {}",
                expected, found
            ),
            DataAccessError::MissingColumn(name) => {
                write!(f, "Column '{}' missing from instance row", name)
            }
            DataAccessError::TypeMismatch { column, expected } => {
                write!(f, "Column '{}' is not a valid {}", column, expected)
            }
            DataAccessError::NullValue(name) => write!(f, "Column '{}' is NULL", name),
            DataAccessError::OutOfRange { column, millis } => write!(
                f,
                "Column '{}' timestamp {} ms is out of range",
                column, millis
            ),
        }
    }
}

impl std::error::Error for DataAccessError {}
