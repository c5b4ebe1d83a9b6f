//! Firebird dialect implementation and identifier formatting.

use oxide_sql_core::dialect::Dialect;
use oxide_sql_core::Expr;

/// Longest identifier Firebird accepts (before 4.0 with the default
/// settings).
pub const MAX_IDENTIFIER_LENGTH: usize = 31;

/// Largest IN list Firebird accepts in one predicate.
pub const MAX_IN_LIST_SIZE: usize = 1500;

/// Alias given to the single aggregate column.
pub const AGGREGATE_ALIAS: &str = "aggregate";

/// Expression used for random ordering.
pub const RANDOM_FUNCTION: &str = "RAND()";

/// Firebird dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirebirdDialect;

impl FirebirdDialect {
    /// Creates a new Firebird dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Quotes a possibly dotted and/or aliased identifier.
    ///
    /// `orders.id` becomes `"orders"."id"`, `name as n` becomes
    /// `"name" AS "n"` and `t.*` keeps the star bare.
    #[must_use]
    pub fn wrap(&self, value: &str) -> String {
        if let Some((expr, alias)) = split_alias(value) {
            return format!("{} AS {}", self.wrap(expr), self.quote_identifier(alias));
        }
        value
            .split('.')
            .map(|segment| self.quote_identifier(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Renders a column expression.
    #[must_use]
    pub fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Column(name) => self.wrap(name),
            Expr::Raw(sql) => sql.clone(),
        }
    }

    /// Renders a comma-separated expression list; empty renders `*`.
    #[must_use]
    pub fn columnize(&self, exprs: &[Expr]) -> String {
        if exprs.is_empty() {
            return String::from("*");
        }
        exprs
            .iter()
            .map(|expr| self.expr(expr))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders `count` comma-separated placeholders.
    #[must_use]
    pub fn parameterize(&self, count: usize) -> String {
        vec![self.parameter_placeholder(); count].join(", ")
    }
}

/// Splits `expr as alias` on the first case-insensitive ` as `.
fn split_alias(value: &str) -> Option<(&str, &str)> {
    let idx = value.to_ascii_lowercase().find(" as ")?;
    Some((value[..idx].trim(), value[idx + 4..].trim()))
}

impl Dialect for FirebirdDialect {
    fn name(&self) -> &'static str {
        "firebird"
    }

    fn max_identifier_length(&self) -> Option<usize> {
        Some(MAX_IDENTIFIER_LENGTH)
    }

    fn max_in_list_size(&self) -> Option<usize> {
        Some(MAX_IN_LIST_SIZE)
    }

    fn supports_temporary_tables(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firebird_dialect() {
        let dialect = FirebirdDialect::new();
        assert_eq!(dialect.name(), "firebird");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.max_identifier_length(), Some(31));
        assert_eq!(dialect.max_in_list_size(), Some(1500));
        assert!(!dialect.supports_temporary_tables());
    }

    #[test]
    fn test_wrap() {
        let dialect = FirebirdDialect::new();
        assert_eq!(dialect.wrap("users"), "\"users\"");
        assert_eq!(dialect.wrap("users.id"), "\"users\".\"id\"");
        assert_eq!(dialect.wrap("users.*"), "\"users\".*");
        assert_eq!(dialect.wrap("*"), "*");
        assert_eq!(dialect.wrap("users.name AS n"), "\"users\".\"name\" AS \"n\"");
        assert_eq!(dialect.wrap("orders as o"), "\"orders\" AS \"o\"");
        assert_eq!(dialect.wrap("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_columnize_and_parameterize() {
        let dialect = FirebirdDialect::new();
        assert_eq!(dialect.columnize(&[]), "*");
        assert_eq!(
            dialect.columnize(&[Expr::column("id"), Expr::raw("COUNT(*)")]),
            "\"id\", COUNT(*)"
        );
        assert_eq!(dialect.parameterize(3), "?, ?, ?");
        assert_eq!(dialect.parameterize(0), "");
    }

    #[test]
    fn test_truncate_identifier() {
        let dialect = FirebirdDialect::new();
        let name = "a_very_long_table_name_with_an_index_suffix";
        assert_eq!(dialect.truncate_identifier(name), "a_very_long_table_name_with_an_");
        assert_eq!(dialect.truncate_identifier(name).chars().count(), 31);
        assert_eq!(dialect.truncate_identifier("short"), "short");
    }
}
