//! Error types for the Firebird compiler.

use oxide_sql_core::{DatePart, Operator, UnknownAggregate, UnknownOperator};

use crate::config::{EngineVersion, PaginationStyle};

/// Errors that can occur while configuring the dialect or compiling a
/// description.
#[derive(Debug, thiserror::Error)]
pub enum FirebirdError {
    /// The engine version string is not one of the known versions.
    #[error("unknown Firebird version '{0}' (expected one of 1.5, 2.5, 3.0, 4.0, 5.0)")]
    UnknownVersion(String),

    /// The pagination style string is not recognized.
    #[error("unknown pagination style '{0}' (expected 'prefix' or 'rows')")]
    UnknownPagination(String),

    /// The pagination style needs a newer engine.
    #[error("{style} pagination requires Firebird 2.0 or later, configured version is {version}")]
    PaginationUnavailable {
        /// Requested style.
        style: PaginationStyle,
        /// Configured engine version.
        version: EngineVersion,
    },

    /// An operator string did not match the operator set.
    #[error(transparent)]
    UnknownOperator(#[from] UnknownOperator),

    /// An aggregate function name was not recognized.
    #[error(transparent)]
    UnknownAggregate(#[from] UnknownAggregate),

    /// The operator exists but not on the configured engine version.
    #[error("operator '{operator}' requires Firebird {required} or later, configured version is {version}")]
    OperatorUnavailable {
        /// The rejected operator.
        operator: Operator,
        /// Minimum version that accepts it.
        required: EngineVersion,
        /// Configured engine version.
        version: EngineVersion,
    },

    /// The date part has no EXTRACT equivalent.
    #[error("'{0}' date comparisons are not implemented for Firebird")]
    DatePartNotImplemented(DatePart),

    /// Firebird has no temporary tables in this dialect.
    #[error("This database driver does not support temporary tables.")]
    TemporaryTable,

    /// The construct has no Firebird rendering.
    #[error("{0} is not supported by Firebird")]
    Unsupported(String),
}

/// Result type for Firebird compilation.
pub type Result<T> = std::result::Result<T, FirebirdError>;
