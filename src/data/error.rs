use thiserror::Error;

use super::model::TableKey;

pub type DataResult<T> = Result<T, DataError>;

/// Failures raised by the catalog (at load time) and the aggregation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("unknown table: {0:?}")]
    UnknownTable(String),

    #[error("unknown field {field:?}")]
    UnknownField { field: String },

    #[error("invalid year range: {lo} > {hi}")]
    InvalidRange { lo: i32, hi: i32 },

    #[error("division undefined: zero denominator")]
    DivisionUndefined,

    #[error("operation requires at least one row")]
    EmptyInput,

    #[error("invalid table {table}: {reason}")]
    InvalidTable { table: TableKey, reason: String },
}

impl DataError {
    pub(crate) fn invalid(table: TableKey, reason: impl Into<String>) -> Self {
        DataError::InvalidTable {
            table,
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_field(field: &str) -> Self {
        DataError::UnknownField {
            field: field.to_string(),
        }
    }
}
