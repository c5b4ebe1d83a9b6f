#![allow(dead_code)]

use oxide_sql_core::{QueryDescription, SchemaDescription, SqlValue};
use oxide_sql_firebird::{
    DialectConfig, EngineVersion, FirebirdError, PaginationStyle, QueryCompiler, SchemaCompiler,
};

pub fn config(version: EngineVersion, pagination: PaginationStyle) -> DialectConfig {
    DialectConfig::new(version, pagination)
        .unwrap_or_else(|e| panic!("Invalid config {version}/{pagination}: {e}"))
}

/// Firebird 2.5 with FIRST/SKIP pagination.
pub fn prefix() -> QueryCompiler {
    QueryCompiler::new(config(EngineVersion::V2_5, PaginationStyle::Prefix))
}

/// Firebird 2.5 with ROWS pagination.
pub fn rows() -> QueryCompiler {
    QueryCompiler::new(config(EngineVersion::V2_5, PaginationStyle::Rows))
}

pub fn compiler_for(version: EngineVersion) -> QueryCompiler {
    QueryCompiler::new(config(version, PaginationStyle::Prefix))
}

pub fn schema_for(version: EngineVersion) -> SchemaCompiler {
    SchemaCompiler::new(config(version, PaginationStyle::Prefix))
}

pub fn select(compiler: &QueryCompiler, query: &QueryDescription) -> (String, Vec<SqlValue>) {
    compiler
        .compile_select(query)
        .unwrap_or_else(|e| panic!("Failed to compile: {query:?}\nError: {e}"))
}

pub fn select_err(compiler: &QueryCompiler, query: &QueryDescription) -> FirebirdError {
    compiler
        .compile_select(query)
        .expect_err(&format!("Expected compile error for: {query:?}"))
}

pub fn ddl(compiler: &SchemaCompiler, schema: &SchemaDescription) -> Vec<String> {
    compiler
        .compile(schema)
        .unwrap_or_else(|e| panic!("Failed to compile: {schema:?}\nError: {e}"))
}

/// Loads a JSON fixture from `tests/fixtures`.
pub fn fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse {path}: {e}"))
}

pub fn ints(range: std::ops::Range<i64>) -> Vec<SqlValue> {
    range.map(SqlValue::Int).collect()
}
