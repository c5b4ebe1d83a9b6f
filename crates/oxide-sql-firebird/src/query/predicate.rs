//! WHERE/HAVING/ON predicate compilation.

use oxide_sql_core::dialect::Dialect;
use oxide_sql_core::{DatePart, Operand, Predicate, SqlValue};
use tracing::trace;

use super::{Compiled, QueryCompiler};
use crate::error::{FirebirdError, Result};

impl QueryCompiler {
    /// Compiles a predicate tree.
    ///
    /// Composite predicates are parenthesized on both sides:
    /// `(a) AND (b)`, `NOT (a)`.
    pub fn compile_predicate(&self, predicate: &Predicate) -> Result<Compiled> {
        match predicate {
            Predicate::Compare {
                column,
                operator,
                operand,
            } => {
                self.check_operator(*operator)?;
                let (rhs, params) = self.compile_operand(operand)?;
                Ok((
                    format!("{} {} {rhs}", self.dialect.wrap(column), operator.as_sql()),
                    params,
                ))
            }
            Predicate::In {
                column,
                values,
                negated,
            } => Ok(self.compile_in_list(column, values, *negated)),
            Predicate::InSubquery {
                column,
                query,
                negated,
            } => {
                let (sub, params) = self.compile_select(query)?;
                let keyword = if *negated { "NOT IN" } else { "IN" };
                Ok((
                    format!("{} {keyword} ({sub})", self.dialect.wrap(column)),
                    params,
                ))
            }
            Predicate::Between {
                column,
                low,
                high,
                negated,
            } => {
                let keyword = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                let placeholder = self.dialect.parameter_placeholder();
                Ok((
                    format!(
                        "{} {keyword} {placeholder} AND {placeholder}",
                        self.dialect.wrap(column)
                    ),
                    vec![low.clone(), high.clone()],
                ))
            }
            Predicate::Null { column, negated } => {
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                Ok((format!("{} {keyword}", self.dialect.wrap(column)), Vec::new()))
            }
            Predicate::DatePart {
                part,
                column,
                operator,
                value,
            } => {
                if !part_is_extractable(*part) {
                    return Err(FirebirdError::DatePartNotImplemented(*part));
                }
                self.check_operator(*operator)?;
                Ok((
                    format!(
                        "EXTRACT({} FROM {}) {} {}",
                        part.as_sql(),
                        self.dialect.wrap(column),
                        operator.as_sql(),
                        self.dialect.parameter_placeholder()
                    ),
                    vec![value.clone()],
                ))
            }
            Predicate::Exists { query, negated } => {
                let (sub, params) = self.compile_select(query)?;
                let keyword = if *negated { "NOT EXISTS" } else { "EXISTS" };
                Ok((format!("{keyword} ({sub})"), params))
            }
            Predicate::Raw { sql, params } => Ok((sql.clone(), params.clone())),
            Predicate::And(left, right) => self.compile_binary(left, "AND", right),
            Predicate::Or(left, right) => self.compile_binary(left, "OR", right),
            Predicate::Not(inner) => {
                let (sql, params) = self.compile_predicate(inner)?;
                Ok((format!("NOT ({sql})"), params))
            }
        }
    }

    fn compile_binary(&self, left: &Predicate, keyword: &str, right: &Predicate) -> Result<Compiled> {
        let (left_sql, mut params) = self.compile_predicate(left)?;
        let (right_sql, right_params) = self.compile_predicate(right)?;
        params.extend(right_params);
        Ok((format!("({left_sql}) {keyword} ({right_sql})"), params))
    }

    fn compile_operand(&self, operand: &Operand) -> Result<Compiled> {
        match operand {
            Operand::Value(value) => Ok((
                self.dialect.parameter_placeholder().to_string(),
                vec![value.clone()],
            )),
            Operand::Column(column) => Ok((self.dialect.wrap(column), Vec::new())),
            Operand::Raw(sql) => Ok((sql.clone(), Vec::new())),
            Operand::Subquery(query) => {
                let (sub, params) = self.compile_select(query)?;
                Ok((format!("({sub})"), params))
            }
        }
    }

    /// Compiles `column [NOT] IN (...)`, splitting lists longer than the
    /// dialect's IN list limit ([`crate::MAX_IN_LIST_SIZE`] values).
    ///
    /// Split IN lists are OR-ed and split NOT IN lists are AND-ed, and the
    /// whole group is parenthesized. Parameters keep their input order.
    /// An empty list can never match (`0 = 1`); an empty NOT IN list always
    /// matches (`1 = 1`).
    #[must_use]
    pub fn compile_in_list(&self, column: &str, values: &[SqlValue], negated: bool) -> Compiled {
        if values.is_empty() {
            let sql = if negated { "1 = 1" } else { "0 = 1" };
            return (sql.to_string(), Vec::new());
        }

        let column = self.dialect.wrap(column);
        let keyword = if negated { "NOT IN" } else { "IN" };
        let limit = self.dialect.max_in_list_size().unwrap_or(values.len());
        if values.len() <= limit {
            return (
                format!("{column} {keyword} ({})", self.dialect.parameterize(values.len())),
                values.to_vec(),
            );
        }

        let clauses: Vec<String> = values
            .chunks(limit)
            .map(|chunk| format!("{column} {keyword} ({})", self.dialect.parameterize(chunk.len())))
            .collect();
        trace!(values = values.len(), chunks = clauses.len(), "Split IN list");
        let joiner = if negated { " AND " } else { " OR " };
        (format!("({})", clauses.join(joiner)), values.to_vec())
    }
}

/// Date-only and time-only comparisons have no EXTRACT form.
const fn part_is_extractable(part: DatePart) -> bool {
    !matches!(part, DatePart::Date | DatePart::Time)
}
