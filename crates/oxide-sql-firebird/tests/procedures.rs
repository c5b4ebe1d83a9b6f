//! Tests for stored procedure and function invocation.

mod common;
use common::*;

use oxide_sql_core::{ProcedureArg, ProcedureCall, SqlValue};

fn call() -> ProcedureCall {
    ProcedureCall::new("GET_INVOICES")
        .arg(SqlValue::Int(42))
        .arg(ProcedureArg::Expression(String::from("CURRENT_DATE")))
        .arg(SqlValue::Text(String::from("EUR")))
}

#[test]
fn selectable_procedure() {
    let (sql, params) = prefix().compile_procedure_select(&call()).unwrap();
    assert_eq!(sql, "SELECT * FROM \"GET_INVOICES\" (?, CURRENT_DATE, ?)");
    assert_eq!(
        params,
        vec![SqlValue::Int(42), SqlValue::Text(String::from("EUR"))]
    );
}

#[test]
fn executable_procedure() {
    let (sql, params) = prefix().compile_execute_procedure(&call());
    assert_eq!(sql, "EXECUTE PROCEDURE \"GET_INVOICES\" (?, CURRENT_DATE, ?)");
    assert_eq!(params.len(), 2);
}

#[test]
fn function_call() {
    let call = ProcedureCall::new("TAX_RATE").arg(SqlValue::Text(String::from("BE")));
    let (sql, params) = prefix().compile_function_call(&call);
    assert_eq!(sql, "SELECT \"TAX_RATE\"(?) FROM RDB$DATABASE");
    assert_eq!(params, vec![SqlValue::Text(String::from("BE"))]);
}

#[test]
fn procedure_without_args() {
    let (sql, params) = rows()
        .compile_procedure_select(&ProcedureCall::new("ACTIVE_USERS"))
        .unwrap();
    assert_eq!(sql, "SELECT * FROM \"ACTIVE_USERS\"");
    assert!(params.is_empty());
}
