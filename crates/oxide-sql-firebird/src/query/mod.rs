//! Query compilation.
//!
//! [`QueryCompiler`] turns a [`QueryDescription`](oxide_sql_core::QueryDescription)
//! into Firebird SQL plus the ordered list of bound parameters. Parameters
//! always appear in the order their placeholders appear in the text, so
//! callers can bind them positionally.

mod predicate;
mod procedure;
mod select;

pub use select::MAX_ROWS;

use oxide_sql_core::{Operator, SqlValue};

use crate::config::{DialectConfig, EngineVersion};
use crate::dialect::FirebirdDialect;
use crate::error::{FirebirdError, Result};

/// Compiled SQL text and its bound parameters.
pub type Compiled = (String, Vec<SqlValue>);

/// Compiles query descriptions for one configured Firebird version.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryCompiler {
    dialect: FirebirdDialect,
    config: DialectConfig,
}

impl QueryCompiler {
    /// Creates a compiler for the given configuration.
    #[must_use]
    pub const fn new(config: DialectConfig) -> Self {
        Self {
            dialect: FirebirdDialect::new(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &DialectConfig {
        &self.config
    }

    #[must_use]
    pub const fn dialect(&self) -> &FirebirdDialect {
        &self.dialect
    }

    /// Rejects operators the configured version does not understand.
    fn check_operator(&self, operator: Operator) -> Result<()> {
        let version = self.config.version();
        let required = match operator {
            Operator::SimilarTo | Operator::NotSimilarTo if !version.supports_similar_to() => {
                EngineVersion::V2_5
            }
            Operator::IsDistinctFrom | Operator::IsNotDistinctFrom
                if !version.supports_distinct_from() =>
            {
                EngineVersion::V2_5
            }
            _ => return Ok(()),
        };
        Err(FirebirdError::OperatorUnavailable {
            operator,
            required,
            version,
        })
    }
}
