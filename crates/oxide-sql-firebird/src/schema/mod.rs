//! Schema (DDL) compilation.
//!
//! DDL statements carry no parameters; literals such as defaults are
//! rendered inline. A [`SchemaDescription`] may expand into several
//! statements because Firebird adds constraints and indexes through
//! separate `ALTER TABLE`/`CREATE INDEX` statements.

mod types;

pub use types::type_sql;

use oxide_sql_core::dialect::Dialect;
use oxide_sql_core::{
    ColumnDefinition, Constraint, ConstraintKind, DefaultValue, ForeignKeyAction, SchemaAction,
    SchemaDescription, SqlValue,
};
use tracing::debug;

use crate::config::DialectConfig;
use crate::dialect::FirebirdDialect;
use crate::error::{FirebirdError, Result};

/// Query checking whether a table exists; binds the table name.
pub const TABLE_EXISTS_SQL: &str =
    "select rdb$relation_name from rdb$relations where rdb$relation_name = ?";

/// Query listing user tables.
pub const TABLES_SQL: &str =
    "select trim(rdb$relation_name) as \"name\" from rdb$relations where rdb$system_flag = 0";

/// Compiles schema descriptions for one configured Firebird version.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaCompiler {
    dialect: FirebirdDialect,
    config: DialectConfig,
}

impl SchemaCompiler {
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

    /// Compiles a description into its ordered statements.
    ///
    /// Creating a table emits the `CREATE TABLE` followed by one statement
    /// per constraint. Altering emits constraint drops, column drops, column
    /// additions and constraint additions, in that order.
    pub fn compile(&self, schema: &SchemaDescription) -> Result<Vec<String>> {
        let table = &schema.table;
        let mut statements = Vec::new();
        match schema.action {
            SchemaAction::Create => {
                statements.push(self.compile_create_table(schema)?);
                for constraint in &schema.constraints {
                    statements.push(self.compile_add_constraint(table, constraint)?);
                }
            }
            SchemaAction::Alter => {
                for constraint in &schema.dropped_constraints {
                    statements.push(self.compile_drop_constraint(table, constraint));
                }
                for column in &schema.dropped_columns {
                    statements.push(self.compile_drop_column(table, column));
                }
                if !schema.columns.is_empty() {
                    statements.push(self.compile_add_column(table, &schema.columns)?);
                }
                for constraint in &schema.constraints {
                    statements.push(self.compile_add_constraint(table, constraint)?);
                }
            }
            SchemaAction::Drop => statements.push(self.compile_drop_table(table)),
            SchemaAction::DropIfExists => statements.push(self.compile_drop_table_if_exists(table)),
        }
        debug!(table = %table, statements = statements.len(), "Compiled schema");
        Ok(statements)
    }

    /// The parameterized table-exists query.
    #[must_use]
    pub const fn compile_table_exists(&self) -> &'static str {
        TABLE_EXISTS_SQL
    }

    /// The user-table listing query.
    #[must_use]
    pub const fn compile_tables(&self) -> &'static str {
        TABLES_SQL
    }

    /// Lists the column names of a table.
    #[must_use]
    pub fn compile_columns(&self, table: &str) -> String {
        format!(
            "select trim(rdb$field_name) as \"name\" from rdb$relation_fields where rdb$relation_name = {}",
            self.dialect.quote_string(table)
        )
    }

    /// `CREATE TABLE "t" (col, ...)`; temporary tables are rejected.
    pub fn compile_create_table(&self, schema: &SchemaDescription) -> Result<String> {
        if schema.temporary && !self.dialect.supports_temporary_tables() {
            return Err(FirebirdError::TemporaryTable);
        }
        let columns = schema
            .columns
            .iter()
            .map(|column| self.column_definition(column))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(
            "CREATE TABLE {} ({})",
            self.dialect.wrap(&schema.table),
            columns.join(", ")
        ))
    }

    #[must_use]
    pub fn compile_drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.dialect.wrap(table))
    }

    /// Drops a table only when the catalog lists it.
    ///
    /// Firebird has no `DROP TABLE IF EXISTS`, so the check and the drop run
    /// inside an anonymous PSQL block.
    #[must_use]
    pub fn compile_drop_table_if_exists(&self, table: &str) -> String {
        let probe = TABLE_EXISTS_SQL.replacen('?', &self.dialect.quote_string(table), 1);
        let drop = self.dialect.quote_string(&self.compile_drop_table(table));
        format!("execute block as begin if (exists({probe})) then execute statement {drop}; end")
    }

    /// `ALTER TABLE "t" ADD col, ADD col`
    pub fn compile_add_column(&self, table: &str, columns: &[ColumnDefinition]) -> Result<String> {
        let additions = columns
            .iter()
            .map(|column| -> Result<String> { Ok(format!("ADD {}", self.column_definition(column)?)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(
            "ALTER TABLE {} {}",
            self.dialect.wrap(table),
            additions.join(", ")
        ))
    }

    #[must_use]
    pub fn compile_drop_column(&self, table: &str, column: &str) -> String {
        format!(
            "ALTER TABLE {} DROP {}",
            self.dialect.wrap(table),
            self.dialect.quote_identifier(column)
        )
    }

    #[must_use]
    pub fn compile_rename_column(&self, table: &str, from: &str, to: &str) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} TO {}",
            self.dialect.wrap(table),
            self.dialect.quote_identifier(from),
            self.dialect.quote_identifier(to)
        )
    }

    /// Adds a primary key, unique constraint, index or foreign key.
    ///
    /// Firebird has no `RESTRICT` referential action; it is rejected.
    pub fn compile_add_constraint(&self, table: &str, constraint: &Constraint) -> Result<String> {
        let name = self.dialect.quote_identifier(&self.constraint_name(table, constraint));
        let wrapped_table = self.dialect.wrap(table);
        let columns = self.dialect.quote_identifiers(&constraint.columns);
        match &constraint.kind {
            ConstraintKind::Primary => Ok(format!(
                "ALTER TABLE {wrapped_table} ADD CONSTRAINT {name} PRIMARY KEY ({columns})"
            )),
            ConstraintKind::Unique => Ok(format!(
                "ALTER TABLE {wrapped_table} ADD CONSTRAINT {name} UNIQUE ({columns})"
            )),
            ConstraintKind::Index => Ok(format!("CREATE INDEX {name} ON {wrapped_table} ({columns})")),
            ConstraintKind::Foreign {
                references_table,
                references,
                on_delete,
                on_update,
            } => {
                let mut sql = format!(
                    "ALTER TABLE {wrapped_table} ADD CONSTRAINT {name} FOREIGN KEY ({columns}) REFERENCES {} ({})",
                    self.dialect.wrap(references_table),
                    self.dialect.quote_identifiers(references)
                );
                for (event, action) in [("DELETE", on_delete), ("UPDATE", on_update)] {
                    if let Some(action) = action {
                        sql.push_str(" ON ");
                        sql.push_str(event);
                        sql.push(' ');
                        sql.push_str(referential_action(*action)?);
                    }
                }
                Ok(sql)
            }
        }
    }

    /// Drops a constraint or index by the same name it was created with.
    #[must_use]
    pub fn compile_drop_constraint(&self, table: &str, constraint: &Constraint) -> String {
        let name = self.dialect.quote_identifier(&self.constraint_name(table, constraint));
        match constraint.kind {
            ConstraintKind::Index => format!("DROP INDEX {name}"),
            _ => format!("ALTER TABLE {} DROP CONSTRAINT {name}", self.dialect.wrap(table)),
        }
    }

    /// Explicit name, or `<table>_<columns>_<kind>` lower-cased, truncated
    /// to 31 characters.
    #[must_use]
    pub fn constraint_name(&self, table: &str, constraint: &Constraint) -> String {
        let name = constraint.name.clone().unwrap_or_else(|| {
            let mut parts = vec![table.to_string()];
            parts.extend(constraint.columns.iter().cloned());
            parts.push(constraint.kind.suffix().to_string());
            parts.join("_").to_lowercase().replace(['-', '.'], "_")
        });
        self.dialect.truncate_identifier(&name)
    }

    /// `"name" TYPE [CHARACTER SET cs] [DEFAULT x] [NOT NULL] [CHECK (...)] [COLLATE c]`
    ///
    /// Auto-increment columns become identity primary keys instead of
    /// carrying DEFAULT/NOT NULL.
    pub fn column_definition(&self, column: &ColumnDefinition) -> Result<String> {
        let mut sql = format!(
            "{} {}",
            self.dialect.quote_identifier(&column.name),
            types::type_sql(&column.column_type)?
        );
        if let Some(charset) = &column.charset {
            sql.push_str(" CHARACTER SET ");
            sql.push_str(charset);
        }
        if column.auto_increment {
            sql.push(' ');
            sql.push_str(&self.identity_clause(column)?);
        } else {
            if let Some(default) = self.default_clause(column) {
                sql.push_str(" DEFAULT ");
                sql.push_str(&default);
            }
            if !column.nullable {
                sql.push_str(" NOT NULL");
            }
        }
        if let Some(check) = types::check_sql(&self.dialect, column) {
            sql.push(' ');
            sql.push_str(&check);
        }
        if let Some(collation) = &column.collation {
            sql.push_str(" COLLATE ");
            sql.push_str(collation);
        }
        Ok(sql)
    }

    fn identity_clause(&self, column: &ColumnDefinition) -> Result<String> {
        let version = self.config.version();
        if !version.supports_identity() {
            return Err(FirebirdError::Unsupported(format!(
                "an identity column before Firebird 3.0 (configured version is {version})"
            )));
        }
        if !column.column_type.is_integer() {
            return Err(FirebirdError::Unsupported(format!(
                "an identity column of type '{}'",
                column.column_type.name()
            )));
        }
        Ok(String::from("GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY"))
    }

    fn default_clause(&self, column: &ColumnDefinition) -> Option<String> {
        if column.use_current && types::accepts_current_timestamp(&column.column_type) {
            return Some(String::from("CURRENT_TIMESTAMP"));
        }
        column.default.as_ref().map(|default| match default {
            DefaultValue::Value(SqlValue::Bool(value)) => {
                String::from(if *value { "'1'" } else { "'0'" })
            }
            DefaultValue::Value(value) => value.to_sql_inline(),
            DefaultValue::Expression(sql) => sql.clone(),
        })
    }
}

/// Firebird accepts `NO ACTION`, `CASCADE`, `SET NULL` and `SET DEFAULT`.
fn referential_action(action: ForeignKeyAction) -> Result<&'static str> {
    match action {
        ForeignKeyAction::Restrict => Err(FirebirdError::Unsupported(String::from(
            "the RESTRICT foreign key action",
        ))),
        other => Ok(other.as_sql()),
    }
}
