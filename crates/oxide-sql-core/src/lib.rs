//! # oxide-sql-core
//!
//! Dialect-neutral descriptions of SQL statements.
//!
//! This crate provides:
//! - [`QueryDescription`]: a fully-populated SELECT (sources, joins,
//!   predicates, grouping, ordering, pagination, locks, unions)
//! - [`Predicate`]: nested filter conditions with a closed operator set
//! - [`SchemaDescription`]: table-level DDL (create, alter, drop)
//! - [`SqlValue`]: bound parameter values
//! - The [`Dialect`] trait that dialect crates implement
//!
//! Nothing here renders SQL for a specific engine. Dialect crates such as
//! `oxide-sql-firebird` compile descriptions into `(sql, params)` pairs.
//!
//! ## Building a description
//!
//! ```rust
//! use oxide_sql_core::{Operator, Order, Predicate, QueryDescription};
//!
//! let query = QueryDescription::table("products")
//!     .select(["id", "name"])
//!     .filter(Predicate::compare("price", Operator::Gt, 100))
//!     .order(Order::desc("price"))
//!     .limit(10);
//!
//! assert_eq!(query.limit, Some(10));
//! ```
//!
//! Every description type is serde-serializable, so descriptions can also be
//! loaded from JSON.

pub mod dialect;
pub mod predicate;
pub mod query;
pub mod schema;
pub mod value;

pub use dialect::Dialect;
pub use predicate::{DatePart, Operand, Operator, Predicate, UnknownOperator};
pub use query::{
    Aggregate, AggregateFunction, Direction, Expr, Join, JoinKind, Lock, Order, ProcedureArg,
    ProcedureCall, QueryDescription, Source, Union, UnknownAggregate,
};
pub use schema::{
    ColumnDefinition, ColumnType, Constraint, ConstraintKind, DefaultValue, ForeignKeyAction,
    SchemaAction, SchemaDescription,
};
pub use value::{SqlValue, ToSqlValue};
