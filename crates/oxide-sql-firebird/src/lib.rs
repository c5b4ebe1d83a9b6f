//! # oxide-sql-firebird
//!
//! Firebird dialect compiler for `oxide-sql-core` descriptions.
//!
//! [`QueryCompiler`] turns a [`QueryDescription`](oxide_sql_core::QueryDescription)
//! into a `(sql, params)` pair and [`SchemaCompiler`] turns a
//! [`SchemaDescription`](oxide_sql_core::SchemaDescription) into DDL
//! statements. Both are configured once with a [`DialectConfig`] naming the
//! target engine version.
//!
//! # How Firebird differs from other dialects
//!
//! - **No LIMIT/OFFSET**: pagination is a prefix on the select list
//!   (`SELECT FIRST 10 SKIP 20 ...`, every version) or a trailing
//!   [`ROWS`] clause (`ROWS 21 TO 30`, 2.0+). Pick one with
//!   [`PaginationStyle`].
//! - **Short identifiers**: names are limited to 31 characters before 4.0.
//!   Generated constraint and index names are truncated to fit.
//! - **Bounded IN lists**: an IN list may hold at most 1500 values. Longer
//!   lists are split into OR-ed groups.
//! - **No `DROP TABLE IF EXISTS`**: the guarded drop is an
//!   [`EXECUTE BLOCK`] that checks `rdb$relations` first.
//! - **No temporary tables** in this dialect, and no native BOOLEAN before
//!   3.0 (booleans are stored as `CHAR(1)`).
//! - **Extra predicates**: `CONTAINING`, `STARTING WITH`, `SIMILAR TO`
//!   (2.5+) and `IS [NOT] DISTINCT FROM` (2.0+).
//! - **Stored procedures**: selectable procedures are queried like tables,
//!   executable ones through `EXECUTE PROCEDURE`.
//!
//! [`ROWS`]: https://firebirdsql.org/file/documentation/chunk/en/refdocs/fblangref25/fblangref25-dml-select.html#fblangref25-dml-select-rows
//! [`EXECUTE BLOCK`]: https://firebirdsql.org/file/documentation/chunk/en/refdocs/fblangref25/fblangref25-dml-execblock.html
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_core::{Operator, Predicate, QueryDescription, SqlValue};
//! use oxide_sql_firebird::{DialectConfig, QueryCompiler};
//!
//! let compiler = QueryCompiler::new(DialectConfig::default());
//! let query = QueryDescription::table("products")
//!     .filter(Predicate::compare("price", Operator::Gt, 100))
//!     .limit(10);
//!
//! let (sql, params) = compiler.compile_select(&query).unwrap();
//! assert_eq!(sql, "SELECT FIRST 10 * FROM \"products\" WHERE \"price\" > ?");
//! assert_eq!(params, vec![SqlValue::Int(100)]);
//! ```

pub mod config;
mod dialect;
pub mod error;
pub mod query;
pub mod schema;

pub use config::{DialectConfig, EngineVersion, PaginationStyle};
pub use dialect::{
    FirebirdDialect, AGGREGATE_ALIAS, MAX_IDENTIFIER_LENGTH, MAX_IN_LIST_SIZE, RANDOM_FUNCTION,
};
pub use error::{FirebirdError, Result};
pub use query::{Compiled, QueryCompiler, MAX_ROWS};
pub use schema::SchemaCompiler;
