//! Error taxonomy shared by every table variant and rate transform.
//!
//! All errors are raised eagerly at the start of the offending call and
//! propagated to the caller; nothing is retried or recovered internally.
//! Queries past a table's horizon are not errors: they resolve through the
//! clamp/plateau policy documented on [`crate::base_table::BaseTable`].

use thiserror::Error;

/// Errors produced by table construction, rate transforms and queries.
#[derive(Debug, Error)]
pub enum TableError {
    /// A caller-supplied argument is unusable: mismatched ages-vector arity,
    /// a negative loading percentage, non-constant sub-period rates during a
    /// periodicity merge, or an unsupported cause count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A decrement-cause index was requested beyond the configured causes.
    #[error("cause out of range: {0}")]
    OutOfRange(String),
}

impl From<garde::Report> for TableError {
    fn from(report: garde::Report) -> Self {
        TableError::InvalidArgument(report.to_string())
    }
}
