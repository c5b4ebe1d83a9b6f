//! Query descriptions.
//!
//! A [`QueryDescription`] is the fully-populated, dialect-neutral form of a
//! SELECT statement. It carries no SQL text of its own: a dialect compiler
//! turns it into a statement plus an ordered parameter list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::predicate::Predicate;
use crate::value::SqlValue;

/// A column reference or raw expression in a select list, GROUP BY or
/// ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A column name, optionally dotted (`t.col`) and/or aliased (`col as x`).
    Column(String),
    /// Raw SQL emitted verbatim.
    Raw(String),
}

impl Expr {
    /// Creates a column expression.
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Creates a raw expression.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::Column(String::from(name))
    }
}

/// Argument of a stored procedure or function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureArg {
    /// Bound as a `?` parameter.
    Value(SqlValue),
    /// Emitted inline, never bound.
    Expression(String),
}

impl From<SqlValue> for ProcedureArg {
    fn from(value: SqlValue) -> Self {
        Self::Value(value)
    }
}

/// A stored procedure or function invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<ProcedureArg>,
}

impl ProcedureCall {
    /// Creates a call with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<ProcedureArg>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Row source of a FROM or JOIN clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// A table name, optionally aliased (`orders as o`).
    Table(String),
    /// A derived table.
    Subquery {
        query: Box<QueryDescription>,
        alias: String,
    },
    /// A selectable stored procedure used as a pseudo-table.
    Procedure(ProcedureCall),
    /// Raw SQL emitted verbatim.
    Raw(String),
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    /// Returns the SQL keywords introducing the join.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    #[serde(default)]
    pub kind: JoinKind,
    pub source: Source,
    /// Join condition; ignored for cross joins.
    #[serde(default)]
    pub on: Option<Predicate>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Sort by an expression.
    By {
        expr: Expr,
        #[serde(default)]
        direction: Direction,
    },
    /// Random order. The seed is kept for dialects that can use it.
    Random {
        #[serde(default)]
        seed: Option<String>,
    },
}

impl Order {
    /// Ascending order on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::By {
            expr: Expr::column(column),
            direction: Direction::Asc,
        }
    }

    /// Descending order on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::By {
            expr: Expr::column(column),
            direction: Direction::Desc,
        }
    }
}

/// Aggregate function.
///
/// Parsed case-insensitively (`count`, `COUNT`, `Count`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AggregateFunction {
    Count,
    Sum,
    Min,
    Max,
    Avg,
}

impl AggregateFunction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Avg => "AVG",
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Error returned when an aggregate function name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown aggregate function `{0}`")]
pub struct UnknownAggregate(pub String);

impl FromStr for AggregateFunction {
    type Err = UnknownAggregate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "sum" => Ok(Self::Sum),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "avg" => Ok(Self::Avg),
            _ => Err(UnknownAggregate(s.to_string())),
        }
    }
}

impl TryFrom<String> for AggregateFunction {
    type Error = UnknownAggregate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AggregateFunction> for String {
    fn from(function: AggregateFunction) -> Self {
        function.as_sql().to_ascii_lowercase()
    }
}

/// An aggregate replacing the select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub function: AggregateFunction,
    /// Aggregated columns; empty means `*`.
    #[serde(default)]
    pub columns: Vec<Expr>,
    /// Applies DISTINCT inside the aggregate call.
    #[serde(default)]
    pub distinct: bool,
}

impl Aggregate {
    /// `COUNT(*)`
    #[must_use]
    pub const fn count() -> Self {
        Self {
            function: AggregateFunction::Count,
            columns: Vec::new(),
            distinct: false,
        }
    }

    /// An aggregate over the given columns.
    pub fn of(function: AggregateFunction, columns: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        Self {
            function,
            columns: columns.into_iter().map(Into::into).collect(),
            distinct: false,
        }
    }
}

/// Row lock requested by the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lock {
    /// Exclusive lock for update.
    Update,
    /// Shared lock.
    Shared,
    /// Raw lock clause emitted verbatim.
    Raw(String),
}

/// A query appended with UNION.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Union {
    pub query: Box<QueryDescription>,
    #[serde(default)]
    pub all: bool,
}

/// A SELECT statement description.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDescription {
    pub from: Option<Source>,
    pub columns: Vec<Expr>,
    pub distinct: bool,
    pub aggregate: Option<Aggregate>,
    pub wheres: Option<Predicate>,
    pub joins: Vec<Join>,
    pub groups: Vec<Expr>,
    pub havings: Option<Predicate>,
    pub orders: Vec<Order>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub lock: Option<Lock>,
    pub unions: Vec<Union>,
}

impl QueryDescription {
    /// A `SELECT *` over a table.
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            from: Some(Source::Table(name.into())),
            ..Self::default()
        }
    }

    /// Replaces the select list.
    #[must_use]
    pub fn select(mut self, columns: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a WHERE condition, AND-ed with any existing one.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.wheres = Some(match self.wheres.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    /// Adds a join.
    #[must_use]
    pub fn join(mut self, kind: JoinKind, source: Source, on: Option<Predicate>) -> Self {
        self.joins.push(Join { kind, source, on });
        self
    }

    /// Adds an ORDER BY entry.
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Replaces the select list with an aggregate.
    #[must_use]
    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    #[must_use]
    pub fn lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Appends a UNION (or UNION ALL) query.
    #[must_use]
    pub fn union(mut self, query: Self, all: bool) -> Self {
        self.unions.push(Union {
            query: Box::new(query),
            all,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_function_parse() {
        assert_eq!("COUNT".parse::<AggregateFunction>().unwrap(), AggregateFunction::Count);
        assert_eq!("Avg".parse::<AggregateFunction>().unwrap(), AggregateFunction::Avg);
        assert!("median".parse::<AggregateFunction>().is_err());
    }

    #[test]
    fn test_filter_ands_conditions() {
        let query = QueryDescription::table("users")
            .filter(Predicate::eq("active", true))
            .filter(Predicate::is_null("deleted_at"));
        assert_eq!(
            query.wheres,
            Some(Predicate::eq("active", true).and(Predicate::is_null("deleted_at")))
        );
    }

    #[test]
    fn test_query_from_sparse_json() {
        let query: QueryDescription = serde_json::from_str(
            r#"{
                "from": {"table": "orders"},
                "columns": [{"column": "id"}, {"raw": "COUNT(*) AS n"}],
                "aggregate": {"function": "Sum", "columns": [{"column": "total"}]},
                "orders": [{"by": {"expr": {"column": "id"}, "direction": "desc"}}, {"random": {}}],
                "limit": 10
            }"#,
        )
        .unwrap();
        assert_eq!(query.from, Some(Source::Table(String::from("orders"))));
        assert_eq!(query.columns.len(), 2);
        assert_eq!(
            query.aggregate,
            Some(Aggregate::of(AggregateFunction::Sum, ["total"]))
        );
        assert_eq!(query.orders[0], Order::desc("id"));
        assert_eq!(query.orders[1], Order::Random { seed: None });
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, None);
        assert!(query.joins.is_empty());
    }
}
