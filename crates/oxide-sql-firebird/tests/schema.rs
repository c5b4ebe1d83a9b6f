//! Tests for DDL compilation: create/alter/drop, constraints, column
//! modifiers and catalog queries.

mod common;
use common::*;

use oxide_sql_core::{
    ColumnDefinition, ColumnType, Constraint, ForeignKeyAction, SchemaDescription, SqlValue,
};
use oxide_sql_firebird::{EngineVersion, FirebirdError, SchemaCompiler};

fn schema() -> SchemaCompiler {
    schema_for(EngineVersion::V2_5)
}

#[test]
fn create_table_with_constraints() {
    let description = SchemaDescription::create("users")
        .column(ColumnDefinition::new("id", ColumnType::Integer))
        .column(ColumnDefinition::new("email", ColumnType::String(255)))
        .column(ColumnDefinition::new("bio", ColumnType::Text).nullable())
        .constraint(Constraint::primary(["id"]))
        .constraint(Constraint::unique(["email"]));

    assert_eq!(
        ddl(&schema(), &description),
        vec![
            "CREATE TABLE \"users\" (\"id\" INTEGER NOT NULL, \"email\" VARCHAR(255) NOT NULL, \
             \"bio\" BLOB SUB_TYPE TEXT)",
            "ALTER TABLE \"users\" ADD CONSTRAINT \"users_id_primary\" PRIMARY KEY (\"id\")",
            "ALTER TABLE \"users\" ADD CONSTRAINT \"users_email_unique\" UNIQUE (\"email\")",
        ]
    );
}

#[test]
fn temporary_table_produces_no_sql() {
    let description = SchemaDescription::create("scratch")
        .temporary()
        .column(ColumnDefinition::new("id", ColumnType::Integer));
    let err = schema().compile(&description).unwrap_err();
    assert!(matches!(err, FirebirdError::TemporaryTable));
    assert!(schema().compile_create_table(&description).is_err());
}

#[test]
fn guarded_drop_shape() {
    assert_eq!(
        schema().compile_drop_table_if_exists("foo"),
        "execute block as begin if (exists(select rdb$relation_name from rdb$relations \
         where rdb$relation_name = 'foo')) then execute statement 'DROP TABLE \"foo\"'; end"
    );
}

#[test]
fn guarded_drop_is_idempotent_after_create() {
    let compiler = schema();
    let create = SchemaDescription::create("audit_log")
        .column(ColumnDefinition::new("id", ColumnType::BigInteger));
    let drop = SchemaDescription::drop_if_exists("audit_log");

    let created = ddl(&compiler, &create);
    let first = ddl(&compiler, &drop);
    let second = ddl(&compiler, &drop);

    assert_eq!(created.len(), 1);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    // The drop only runs inside the existence guard.
    let statement = &first[0];
    let guard = statement.find("if (exists(").unwrap();
    let drop_at = statement.find("DROP TABLE").unwrap();
    assert!(guard < drop_at);
    assert!(statement.contains("rdb$relation_name = 'audit_log'"));
}

#[test]
fn guarded_drop_escapes_quotes() {
    let sql = schema().compile_drop_table_if_exists("o'neil");
    assert!(sql.contains("rdb$relation_name = 'o''neil'"));
    assert!(sql.contains("execute statement 'DROP TABLE \"o''neil\"'"));
}

#[test]
fn plain_drop() {
    assert_eq!(
        ddl(&schema(), &SchemaDescription::drop("users")),
        vec!["DROP TABLE \"users\""]
    );
}

#[test]
fn alter_table_statement_order() {
    let description = SchemaDescription::alter("orders")
        .drop_constraint(Constraint::index(["legacy_code"]))
        .drop_column("legacy_code")
        .column(ColumnDefinition::new("customer_id", ColumnType::Integer).nullable())
        .column(
            ColumnDefinition::new("status", ColumnType::String(20))
                .default_value(SqlValue::Text(String::from("new"))),
        )
        .constraint(
            Constraint::foreign(["customer_id"], "customers", ["id"])
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::SetNull),
        )
        .constraint(Constraint::index(["status"]));

    assert_eq!(
        ddl(&schema(), &description),
        vec![
            "DROP INDEX \"orders_legacy_code_index\"",
            "ALTER TABLE \"orders\" DROP \"legacy_code\"",
            "ALTER TABLE \"orders\" ADD \"customer_id\" INTEGER, \
             ADD \"status\" VARCHAR(20) DEFAULT 'new' NOT NULL",
            "ALTER TABLE \"orders\" ADD CONSTRAINT \"orders_customer_id_foreign\" \
             FOREIGN KEY (\"customer_id\") REFERENCES \"customers\" (\"id\") \
             ON DELETE CASCADE ON UPDATE SET NULL",
            "CREATE INDEX \"orders_status_index\" ON \"orders\" (\"status\")",
        ]
    );
}

#[test]
fn dropped_constraint_uses_created_name() {
    let compiler = schema();
    let constraint = Constraint::unique(["very_long_column_name", "another_long_column"]);
    let add = compiler
        .compile_add_constraint("subscriptions", &constraint)
        .unwrap();
    let drop = compiler.compile_drop_constraint("subscriptions", &constraint);
    let name = compiler.constraint_name("subscriptions", &constraint);

    assert_eq!(name, "subscriptions_very_long_column_");
    assert!(add.contains(&format!("CONSTRAINT \"{name}\"")));
    assert_eq!(
        drop,
        format!("ALTER TABLE \"subscriptions\" DROP CONSTRAINT \"{name}\"")
    );
}

#[test]
fn explicit_constraint_name() {
    let constraint = Constraint::foreign(["user_id"], "users", ["id"]).named("FK_POSTS_USER");
    assert_eq!(
        schema().compile_add_constraint("posts", &constraint).unwrap(),
        "ALTER TABLE \"posts\" ADD CONSTRAINT \"FK_POSTS_USER\" FOREIGN KEY (\"user_id\") \
         REFERENCES \"users\" (\"id\")"
    );
}

#[test]
fn restrict_foreign_key_action_is_unsupported() {
    let description = SchemaDescription::alter("posts").constraint(
        Constraint::foreign(["user_id"], "users", ["id"]).on_delete(ForeignKeyAction::Restrict),
    );
    assert!(matches!(
        schema().compile(&description),
        Err(FirebirdError::Unsupported(_))
    ));

    let no_action = Constraint::foreign(["user_id"], "users", ["id"])
        .on_delete(ForeignKeyAction::NoAction)
        .on_update(ForeignKeyAction::SetDefault);
    assert!(schema()
        .compile_add_constraint("posts", &no_action)
        .unwrap()
        .ends_with("ON DELETE NO ACTION ON UPDATE SET DEFAULT"));
}

#[test]
fn column_modifier_order() {
    let column = ColumnDefinition::new(
        "state",
        ColumnType::Enum(vec![String::from("draft"), String::from("live")]),
    )
    .charset("UTF8")
    .collation("UNICODE_CI")
    .default_value(SqlValue::Text(String::from("draft")));
    assert_eq!(
        schema().column_definition(&column).unwrap(),
        "\"state\" VARCHAR(255) CHARACTER SET UTF8 DEFAULT 'draft' NOT NULL \
         CHECK (\"state\" IN ('draft', 'live')) COLLATE UNICODE_CI"
    );
}

#[test]
fn default_expressions_and_booleans() {
    let compiler = schema();
    let flag = ColumnDefinition::new("archived", ColumnType::Boolean)
        .default_value(SqlValue::Bool(false));
    assert_eq!(
        compiler.column_definition(&flag).unwrap(),
        "\"archived\" CHAR(1) DEFAULT '0' NOT NULL"
    );
    let day = ColumnDefinition::new("day", ColumnType::Date).default_expression("CURRENT_DATE");
    assert_eq!(
        compiler.column_definition(&day).unwrap(),
        "\"day\" DATE DEFAULT CURRENT_DATE NOT NULL"
    );
    let price = ColumnDefinition::new(
        "price",
        ColumnType::Decimal {
            precision: 10,
            scale: 2,
        },
    )
    .nullable()
    .default_value(SqlValue::Float(9.5));
    assert_eq!(
        compiler.column_definition(&price).unwrap(),
        "\"price\" DECIMAL(10, 2) DEFAULT 9.5"
    );
}

#[test]
fn identity_columns_need_firebird_3() {
    let id = ColumnDefinition::new("id", ColumnType::BigInteger).auto_increment();
    assert_eq!(
        schema_for(EngineVersion::V3_0).column_definition(&id).unwrap(),
        "\"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY"
    );
    assert!(matches!(
        schema().column_definition(&id),
        Err(FirebirdError::Unsupported(_))
    ));

    let text_id = ColumnDefinition::new("id", ColumnType::String(10)).auto_increment();
    assert!(schema_for(EngineVersion::V4_0).column_definition(&text_id).is_err());
}

#[test]
fn unmapped_column_type_fails_create() {
    let description = SchemaDescription::create("places")
        .column(ColumnDefinition::new("shape", ColumnType::Geometry));
    assert!(matches!(
        schema().compile(&description),
        Err(FirebirdError::Unsupported(_))
    ));
}

#[test]
fn rename_column() {
    assert_eq!(
        schema().compile_rename_column("users", "mail", "email"),
        "ALTER TABLE \"users\" ALTER COLUMN \"mail\" TO \"email\""
    );
}

#[test]
fn catalog_queries() {
    let compiler = schema();
    assert_eq!(
        compiler.compile_table_exists(),
        "select rdb$relation_name from rdb$relations where rdb$relation_name = ?"
    );
    assert_eq!(
        compiler.compile_tables(),
        "select trim(rdb$relation_name) as \"name\" from rdb$relations where rdb$system_flag = 0"
    );
    assert!(compiler.compile_columns("o'neil").ends_with("rdb$relation_name = 'o''neil'"));
}
