//! Filter predicates.
//!
//! A [`Predicate`] is the dialect-neutral form of a WHERE/HAVING/ON
//! condition. Composite predicates nest through [`Predicate::And`],
//! [`Predicate::Or`] and [`Predicate::Not`]; each dialect decides how leaves
//! are rendered and which operators it accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::query::QueryDescription;
use crate::value::{SqlValue, ToSqlValue};

/// Comparison operators.
///
/// Parsed case-insensitively from their SQL spelling, with runs of whitespace
/// collapsed, so `"IS  distinct FROM"` and `"is distinct from"` are the same
/// operator. `!=` is accepted as an alias for `<>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `CONTAINING` (case-insensitive substring match)
    Containing,
    /// `NOT CONTAINING`
    NotContaining,
    /// `STARTING WITH`
    StartingWith,
    /// `NOT STARTING WITH`
    NotStartingWith,
    /// `SIMILAR TO`
    SimilarTo,
    /// `NOT SIMILAR TO`
    NotSimilarTo,
    /// `IS DISTINCT FROM` (null-safe inequality)
    IsDistinctFrom,
    /// `IS NOT DISTINCT FROM` (null-safe equality)
    IsNotDistinctFrom,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Eq,
        Self::NotEq,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::Like,
        Self::NotLike,
        Self::Containing,
        Self::NotContaining,
        Self::StartingWith,
        Self::NotStartingWith,
        Self::SimilarTo,
        Self::NotSimilarTo,
        Self::IsDistinctFrom,
        Self::IsNotDistinctFrom,
    ];

    /// Returns the SQL spelling of the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Containing => "CONTAINING",
            Self::NotContaining => "NOT CONTAINING",
            Self::StartingWith => "STARTING WITH",
            Self::NotStartingWith => "NOT STARTING WITH",
            Self::SimilarTo => "SIMILAR TO",
            Self::NotSimilarTo => "NOT SIMILAR TO",
            Self::IsDistinctFrom => "IS DISTINCT FROM",
            Self::IsNotDistinctFrom => "IS NOT DISTINCT FROM",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Error returned when an operator string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator `{0}`")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized == "!=" {
            return Ok(Self::NotEq);
        }
        Self::ALL
            .into_iter()
            .find(|op| op.as_sql().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl TryFrom<String> for Operator {
    type Error = UnknownOperator;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_sql().to_ascii_lowercase()
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// A bound parameter.
    Value(SqlValue),
    /// Another column, quoted as an identifier.
    Column(String),
    /// A raw SQL fragment, emitted verbatim.
    Raw(String),
    /// A parenthesized subquery.
    Subquery(Box<QueryDescription>),
}

impl<T: ToSqlValue> From<T> for Operand {
    fn from(value: T) -> Self {
        Self::Value(value.to_sql_value())
    }
}

/// Date/time component used by [`Predicate::DatePart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// The date portion of a timestamp.
    Date,
    /// The time portion of a timestamp.
    Time,
}

impl DatePart {
    /// Returns the SQL keyword for the part.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Date => "DATE",
            Self::Time => "TIME",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// `column <op> operand`
    Compare {
        column: String,
        operator: Operator,
        operand: Operand,
    },
    /// `column [NOT] IN (values...)`
    In {
        column: String,
        values: Vec<SqlValue>,
        #[serde(default)]
        negated: bool,
    },
    /// `column [NOT] IN (subquery)`
    InSubquery {
        column: String,
        query: Box<QueryDescription>,
        #[serde(default)]
        negated: bool,
    },
    /// `column [NOT] BETWEEN low AND high`
    Between {
        column: String,
        low: SqlValue,
        high: SqlValue,
        #[serde(default)]
        negated: bool,
    },
    /// `column IS [NOT] NULL`
    Null {
        column: String,
        #[serde(default)]
        negated: bool,
    },
    /// Comparison against one component of a date/time column.
    DatePart {
        part: DatePart,
        column: String,
        operator: Operator,
        value: SqlValue,
    },
    /// `[NOT] EXISTS (subquery)`
    Exists {
        query: Box<QueryDescription>,
        #[serde(default)]
        negated: bool,
    },
    /// Raw SQL with its own bound parameters.
    Raw {
        sql: String,
        #[serde(default)]
        params: Vec<SqlValue>,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// `column <op> ?` with a bound value.
    pub fn compare(column: impl Into<String>, operator: Operator, value: impl ToSqlValue) -> Self {
        Self::Compare {
            column: column.into(),
            operator,
            operand: Operand::Value(value.to_sql_value()),
        }
    }

    /// `column = ?`
    pub fn eq(column: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::compare(column, Operator::Eq, value)
    }

    /// `left <op> right` where both sides are columns.
    pub fn columns(left: impl Into<String>, operator: Operator, right: impl Into<String>) -> Self {
        Self::Compare {
            column: left.into(),
            operator,
            operand: Operand::Column(right.into()),
        }
    }

    /// `column IN (values...)`
    pub fn in_list<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        Self::In {
            column: column.into(),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: false,
        }
    }

    /// `column NOT IN (values...)`
    pub fn not_in_list<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        Self::In {
            column: column.into(),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: true,
        }
    }

    /// `column BETWEEN low AND high`
    pub fn between(column: impl Into<String>, low: impl ToSqlValue, high: impl ToSqlValue) -> Self {
        Self::Between {
            column: column.into(),
            low: low.to_sql_value(),
            high: high.to_sql_value(),
            negated: false,
        }
    }

    /// `column IS NULL`
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::Null {
            column: column.into(),
            negated: false,
        }
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::Null {
            column: column.into(),
            negated: true,
        }
    }

    /// Compares one component of a date/time column.
    pub fn date_part(
        part: DatePart,
        column: impl Into<String>,
        operator: Operator,
        value: impl ToSqlValue,
    ) -> Self {
        Self::DatePart {
            part,
            column: column.into(),
            operator,
            value: value.to_sql_value(),
        }
    }

    /// `EXISTS (query)`
    #[must_use]
    pub fn exists(query: QueryDescription) -> Self {
        Self::Exists {
            query: Box::new(query),
            negated: false,
        }
    }

    /// Raw SQL with bound parameters.
    pub fn raw(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self::Raw {
            sql: sql.into(),
            params,
        }
    }

    /// Combines with another predicate using AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Combines with another predicate using OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Negates the predicate.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parse_is_case_and_space_insensitive() {
        assert_eq!("=".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("!=".parse::<Operator>().unwrap(), Operator::NotEq);
        assert_eq!("<>".parse::<Operator>().unwrap(), Operator::NotEq);
        assert_eq!(
            "is  Distinct\tfrom".parse::<Operator>().unwrap(),
            Operator::IsDistinctFrom
        );
        assert_eq!(
            " not starting with ".parse::<Operator>().unwrap(),
            Operator::NotStartingWith
        );
    }

    #[test]
    fn test_operator_parse_unknown() {
        let err = "~=".parse::<Operator>().unwrap_err();
        assert_eq!(err, UnknownOperator(String::from("~=")));
        assert_eq!(err.to_string(), "unknown operator `~=`");
    }

    #[test]
    fn test_every_operator_parses_from_its_spelling() {
        for op in Operator::ALL {
            assert_eq!(op.as_sql().parse::<Operator>().unwrap(), op);
            assert_eq!(String::from(op).parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_not_in_list_sets_negated() {
        let predicate = Predicate::not_in_list("id", [1, 2]);
        assert_eq!(
            predicate,
            Predicate::In {
                column: String::from("id"),
                values: vec![SqlValue::Int(1), SqlValue::Int(2)],
                negated: true,
            }
        );
    }

    #[test]
    fn test_predicate_from_json() {
        let predicate: Predicate = serde_json::from_str(
            r#"{"compare": {"column": "price", "operator": ">", "operand": {"value": 100}}}"#,
        )
        .unwrap();
        assert_eq!(predicate, Predicate::compare("price", Operator::Gt, 100));

        let err = serde_json::from_str::<Predicate>(
            r#"{"compare": {"column": "price", "operator": "=>", "operand": {"value": 1}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown operator `=>`"));
    }
}
