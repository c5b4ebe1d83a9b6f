//! SELECT statement compilation.
//!
//! A statement is assembled from fixed clause slots, in this order:
//!
//! | Slot      | Output                                             |
//! |-----------|----------------------------------------------------|
//! | aggregate | `SELECT COUNT(*) AS "aggregate"`                   |
//! | columns   | `SELECT [FIRST n] [SKIP m] [DISTINCT] cols`        |
//! | from      | `FROM source`                                      |
//! | joins     | `INNER JOIN source ON ...`                         |
//! | wheres    | `WHERE ...`                                        |
//! | groups    | `GROUP BY ...`                                     |
//! | havings   | `HAVING ...`                                       |
//! | orders    | `ORDER BY ...`                                     |
//! | limit     | `ROWS m [TO n]` (ROWS pagination only)             |
//! | offset    | always empty; the offset is folded into the above  |
//! | lock      | `FOR UPDATE WITH LOCK`                             |
//!
//! Empty slots are skipped and non-empty ones are joined with a single
//! space. Union branches go between the `havings` and `orders` slots, so
//! the trailing slots apply to the combined result.

use oxide_sql_core::dialect::Dialect;
use oxide_sql_core::{Aggregate, Join, JoinKind, Lock, Order, Predicate, QueryDescription, Source};
use tracing::debug;

use super::{Compiled, QueryCompiler};
use crate::config::PaginationStyle;
use crate::dialect::{AGGREGATE_ALIAS, RANDOM_FUNCTION};
use crate::error::{FirebirdError, Result};

/// Upper bound used for `ROWS m TO n` when only an offset is given.
pub const MAX_ROWS: u64 = 9_223_372_036_854_775_807;

#[derive(Debug, Clone, Copy)]
enum Component {
    Aggregate,
    Columns,
    From,
    Joins,
    Wheres,
    Groups,
    Havings,
    Orders,
    Limit,
    Offset,
    Lock,
}

const SELECT_COMPONENTS: [Component; 11] = [
    Component::Aggregate,
    Component::Columns,
    Component::From,
    Component::Joins,
    Component::Wheres,
    Component::Groups,
    Component::Havings,
    Component::Orders,
    Component::Limit,
    Component::Offset,
    Component::Lock,
];

/// Slots before this position belong to the first UNION branch; the rest
/// close the whole statement.
const UNION_POSITION: usize = 7;

/// Alias of the derived table a grouped or combined query is counted from.
const COUNT_TABLE_ALIAS: &str = "aggregate_table";

impl QueryCompiler {
    /// Compiles a SELECT statement.
    ///
    /// With unions, ordering and ROWS pagination follow the last branch and
    /// apply to the combined result.
    pub fn compile_select(&self, query: &QueryDescription) -> Result<Compiled> {
        if !query.unions.is_empty() {
            self.check_union(query)?;
        }
        let (head, tail) = SELECT_COMPONENTS.split_at(UNION_POSITION);
        let mut parts = Vec::new();
        let mut params = Vec::new();

        for component in head {
            let (sql, component_params) = self.compile_component(query, *component)?;
            if !sql.is_empty() {
                parts.push(sql);
            }
            params.extend(component_params);
        }

        for union in &query.unions {
            let (sql, union_params) = self.compile_select(&union.query)?;
            parts.push(String::from(if union.all { "UNION ALL" } else { "UNION" }));
            parts.push(sql);
            params.extend(union_params);
        }

        for component in tail {
            let (sql, component_params) = self.compile_component(query, *component)?;
            if !sql.is_empty() {
                parts.push(sql);
            }
            params.extend(component_params);
        }

        let sql = parts.join(" ");
        debug!(dialect = self.dialect.name(), sql = %sql, params = params.len(), "Compiled select");
        Ok((sql, params))
    }

    /// Compiles `SELECT COUNT(*) AS "aggregate" FROM ...` for a query,
    /// keeping its sources and conditions.
    ///
    /// Grouped, distinct or combined queries are counted from a derived
    /// table so the result stays a single total.
    pub fn compile_count(&self, query: &QueryDescription) -> Result<Compiled> {
        let stripped = QueryDescription {
            orders: Vec::new(),
            limit: None,
            offset: None,
            lock: None,
            ..query.clone()
        };
        let wrap = stripped.distinct
            || !stripped.unions.is_empty()
            || !stripped.groups.is_empty()
            || stripped.havings.is_some();
        let counted = if wrap {
            QueryDescription {
                from: Some(Source::Subquery {
                    query: Box::new(stripped),
                    alias: String::from(COUNT_TABLE_ALIAS),
                }),
                aggregate: Some(Aggregate::count()),
                ..QueryDescription::default()
            }
        } else {
            QueryDescription {
                aggregate: Some(Aggregate::count()),
                ..stripped
            }
        };
        self.compile_select(&counted)
    }

    /// Firebird only orders and limits a UNION as a whole, and cannot lock
    /// its rows.
    fn check_union(&self, query: &QueryDescription) -> Result<()> {
        if query.lock.is_some() {
            return Err(FirebirdError::Unsupported(String::from(
                "a row lock on a UNION",
            )));
        }
        if self.config.pagination() == PaginationStyle::Prefix && is_paginated(query) {
            return Err(FirebirdError::Unsupported(String::from(
                "FIRST/SKIP pagination of a UNION",
            )));
        }
        for union in &query.unions {
            let branch = &union.query;
            if !branch.orders.is_empty() || is_paginated(branch) || branch.lock.is_some() {
                return Err(FirebirdError::Unsupported(String::from(
                    "ordering, pagination or locking inside a UNION branch",
                )));
            }
        }
        Ok(())
    }

    fn compile_component(&self, query: &QueryDescription, component: Component) -> Result<Compiled> {
        match component {
            Component::Aggregate => Ok(query
                .aggregate
                .as_ref()
                .map_or_else(Compiled::default, |aggregate| {
                    (self.compile_aggregate(aggregate), Vec::new())
                })),
            Component::Columns => Ok((self.compile_columns(query), Vec::new())),
            Component::From => query.from.as_ref().map_or_else(
                || Ok(Compiled::default()),
                |source| {
                    let (sql, params) = self.compile_source(source)?;
                    Ok((format!("FROM {sql}"), params))
                },
            ),
            Component::Joins => self.compile_joins(&query.joins),
            Component::Wheres => self.compile_condition("WHERE", query.wheres.as_ref()),
            Component::Groups => Ok((
                if query.groups.is_empty() {
                    String::new()
                } else {
                    format!("GROUP BY {}", self.dialect.columnize(&query.groups))
                },
                Vec::new(),
            )),
            Component::Havings => self.compile_condition("HAVING", query.havings.as_ref()),
            Component::Orders => Ok((self.compile_orders(&query.orders), Vec::new())),
            Component::Limit => Ok((self.compile_rows(query), Vec::new())),
            Component::Offset => Ok(Compiled::default()),
            Component::Lock => Ok((self.compile_lock(query.lock.as_ref())?, Vec::new())),
        }
    }

    fn compile_aggregate(&self, aggregate: &Aggregate) -> String {
        let distinct = if aggregate.distinct { "DISTINCT " } else { "" };
        format!(
            "SELECT {}({distinct}{}) AS {}",
            aggregate.function.as_sql(),
            self.dialect.columnize(&aggregate.columns),
            self.dialect.quote_identifier(AGGREGATE_ALIAS)
        )
    }

    /// The select list, with the FIRST/SKIP prefix when configured.
    ///
    /// Empty when an aggregate replaces the select list.
    fn compile_columns(&self, query: &QueryDescription) -> String {
        if query.aggregate.is_some() {
            if is_paginated(query) {
                debug!("Pagination ignored for aggregate query");
            }
            return String::new();
        }

        let mut sql = String::from("SELECT ");
        if self.config.pagination() == PaginationStyle::Prefix {
            if let Some(limit) = effective_limit(query) {
                sql.push_str(&format!("FIRST {limit} "));
            }
            if let Some(offset) = effective_offset(query) {
                sql.push_str(&format!("SKIP {offset} "));
            }
        }
        if query.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&self.dialect.columnize(&query.columns));
        sql
    }

    fn compile_source(&self, source: &Source) -> Result<Compiled> {
        match source {
            Source::Table(name) => Ok((self.dialect.wrap(name), Vec::new())),
            Source::Subquery { query, alias } => {
                let (sub, params) = self.compile_select(query)?;
                Ok((
                    format!("({sub}) AS {}", self.dialect.quote_identifier(alias)),
                    params,
                ))
            }
            Source::Procedure(call) => Ok(self.compile_procedure_source(call)),
            Source::Raw(sql) => Ok((sql.clone(), Vec::new())),
        }
    }

    fn compile_joins(&self, joins: &[Join]) -> Result<Compiled> {
        let mut parts = Vec::with_capacity(joins.len());
        let mut params = Vec::new();
        for join in joins {
            let (source, source_params) = self.compile_source(&join.source)?;
            params.extend(source_params);
            let mut sql = format!("{} {source}", join.kind.as_sql());
            match (&join.on, join.kind) {
                (Some(_), JoinKind::Cross) => debug!("ON condition ignored for cross join"),
                (Some(on), _) => {
                    let (condition, condition_params) = self.compile_predicate(on)?;
                    sql.push_str(&format!(" ON {condition}"));
                    params.extend(condition_params);
                }
                (None, _) => {}
            }
            parts.push(sql);
        }
        Ok((parts.join(" "), params))
    }

    fn compile_condition(
        &self,
        keyword: &str,
        predicate: Option<&Predicate>,
    ) -> Result<Compiled> {
        predicate.map_or_else(
            || Ok(Compiled::default()),
            |predicate| {
                let (sql, params) = self.compile_predicate(predicate)?;
                Ok((format!("{keyword} {sql}"), params))
            },
        )
    }

    fn compile_orders(&self, orders: &[Order]) -> String {
        if orders.is_empty() {
            return String::new();
        }
        let items: Vec<String> = orders
            .iter()
            .map(|order| match order {
                Order::By { expr, direction } => {
                    format!("{} {}", self.dialect.expr(expr), direction.as_sql())
                }
                Order::Random { seed } => {
                    if seed.is_some() {
                        debug!("Random order seed ignored");
                    }
                    String::from(RANDOM_FUNCTION)
                }
            })
            .collect();
        format!("ORDER BY {}", items.join(", "))
    }

    /// `ROWS m [TO n]` for ROWS pagination; empty otherwise.
    ///
    /// With both limit `L` and offset `O` this is `ROWS O+1 TO O+L`; with an
    /// offset alone the upper bound is [`MAX_ROWS`].
    fn compile_rows(&self, query: &QueryDescription) -> String {
        if self.config.pagination() != PaginationStyle::Rows || query.aggregate.is_some() {
            return String::new();
        }
        match (effective_limit(query), effective_offset(query)) {
            (None, None) => String::new(),
            (Some(limit), None) => format!("ROWS {limit}"),
            (None, Some(offset)) => format!("ROWS {} TO {MAX_ROWS}", row_bound(offset, 1)),
            (Some(limit), Some(offset)) => {
                format!("ROWS {} TO {}", row_bound(offset, 1), row_bound(offset, limit))
            }
        }
    }

    fn compile_lock(&self, lock: Option<&Lock>) -> Result<String> {
        match lock {
            None => Ok(String::new()),
            Some(Lock::Update) => Ok(String::from("FOR UPDATE WITH LOCK")),
            Some(Lock::Shared) => Err(FirebirdError::Unsupported(String::from(
                "a shared row lock",
            ))),
            Some(Lock::Raw(sql)) => Ok(sql.clone()),
        }
    }
}

/// A limit of zero is the same as no limit.
fn effective_limit(query: &QueryDescription) -> Option<u64> {
    query.limit.filter(|limit| *limit > 0)
}

/// An offset of zero is the same as no offset.
fn effective_offset(query: &QueryDescription) -> Option<u64> {
    query.offset.filter(|offset| *offset > 0)
}

fn is_paginated(query: &QueryDescription) -> bool {
    effective_limit(query).is_some() || effective_offset(query).is_some()
}

fn row_bound(offset: u64, count: u64) -> u64 {
    offset.saturating_add(count).min(MAX_ROWS)
}
