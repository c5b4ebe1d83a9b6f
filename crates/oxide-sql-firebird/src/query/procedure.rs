//! Stored procedure and function invocation.
//!
//! Firebird has two kinds of procedures. Selectable procedures behave like
//! tables and are queried with `SELECT * FROM "PROC" (?, ?)`. Executable
//! procedures return at most one row and are called with
//! `EXECUTE PROCEDURE "PROC" (?, ?)`. Stored functions (3.0+) and UDFs are
//! evaluated against the single-row `RDB$DATABASE` table.

use oxide_sql_core::dialect::Dialect;
use oxide_sql_core::{ProcedureArg, ProcedureCall, QueryDescription, Source};
use tracing::debug;

use super::{Compiled, QueryCompiler};
use crate::error::Result;

impl QueryCompiler {
    /// `"NAME" (args)`, or just `"NAME"` without arguments.
    pub(crate) fn compile_procedure_source(&self, call: &ProcedureCall) -> Compiled {
        let name = self.dialect.wrap(&call.name);
        if call.args.is_empty() {
            return (name, Vec::new());
        }
        let (args, params) = self.compile_procedure_args(&call.args);
        (format!("{name} ({args})"), params)
    }

    /// Value arguments become placeholders, expressions are inlined.
    fn compile_procedure_args(&self, args: &[ProcedureArg]) -> Compiled {
        let mut params = Vec::new();
        let rendered: Vec<String> = args
            .iter()
            .map(|arg| match arg {
                ProcedureArg::Value(value) => {
                    params.push(value.clone());
                    self.dialect.parameter_placeholder().to_string()
                }
                ProcedureArg::Expression(sql) => sql.clone(),
            })
            .collect();
        (rendered.join(", "), params)
    }

    /// Selects every row from a selectable procedure.
    pub fn compile_procedure_select(&self, call: &ProcedureCall) -> Result<Compiled> {
        self.compile_select(&QueryDescription {
            from: Some(Source::Procedure(call.clone())),
            ..QueryDescription::default()
        })
    }

    /// Runs an executable procedure.
    #[must_use]
    pub fn compile_execute_procedure(&self, call: &ProcedureCall) -> Compiled {
        let (target, params) = self.compile_procedure_source(call);
        let sql = format!("EXECUTE PROCEDURE {target}");
        debug!(sql = %sql, params = params.len(), "Compiled procedure call");
        (sql, params)
    }

    /// Evaluates a stored function or UDF.
    #[must_use]
    pub fn compile_function_call(&self, call: &ProcedureCall) -> Compiled {
        let (args, params) = self.compile_procedure_args(&call.args);
        let sql = format!(
            "SELECT {}({args}) FROM RDB$DATABASE",
            self.dialect.wrap(&call.name)
        );
        debug!(sql = %sql, params = params.len(), "Compiled function call");
        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use oxide_sql_core::SqlValue;

    use super::*;

    #[test]
    fn test_expression_args_are_not_bound() {
        let call = ProcedureCall::new("GET_ORDERS")
            .arg(SqlValue::Int(7))
            .arg(ProcedureArg::Expression(String::from("CURRENT_DATE")));
        let (sql, params) = QueryCompiler::default().compile_procedure_source(&call);
        assert_eq!(sql, "\"GET_ORDERS\" (?, CURRENT_DATE)");
        assert_eq!(params, vec![SqlValue::Int(7)]);
    }

    #[test]
    fn test_no_args_omits_parentheses() {
        let (sql, params) =
            QueryCompiler::default().compile_execute_procedure(&ProcedureCall::new("REINDEX"));
        assert_eq!(sql, "EXECUTE PROCEDURE \"REINDEX\"");
        assert!(params.is_empty());
    }

    #[test]
    fn test_function_without_args_keeps_parentheses() {
        let (sql, _) =
            QueryCompiler::default().compile_function_call(&ProcedureCall::new("GEN_UUID"));
        assert_eq!(sql, "SELECT \"GEN_UUID\"() FROM RDB$DATABASE");
    }
}
