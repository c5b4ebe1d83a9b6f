//! fbsqlc CLI
//!
//! Compiles JSON query, procedure and schema descriptions into Firebird SQL.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_sql_core::{ProcedureCall, QueryDescription, SchemaDescription, SqlValue};
use oxide_sql_firebird::{DialectConfig, QueryCompiler, SchemaCompiler};

/// Firebird SQL compiler for oxide-sql descriptions.
#[derive(Parser)]
#[command(name = "fbsqlc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target Firebird version (1.5, 2.5, 3.0, 4.0, 5.0).
    #[arg(short, long, env = "FIREBIRD_VERSION", default_value = "2.5")]
    engine_version: String,

    /// Pagination style (prefix or rows).
    #[arg(short, long, env = "FIREBIRD_PAGINATION", default_value = "prefix")]
    pagination: String,

    /// Print a JSON object instead of plain SQL.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query description.
    Select {
        /// JSON file, or `-` for stdin.
        input: PathBuf,

        /// Compile the row count of the query instead.
        #[arg(long)]
        count: bool,
    },

    /// Compile a stored procedure or function call.
    Procedure {
        /// JSON file, or `-` for stdin.
        input: PathBuf,

        /// How the procedure is invoked.
        #[arg(short, long, value_enum, default_value_t = CallMode::Select)]
        mode: CallMode,
    },

    /// Compile a schema description into DDL statements.
    Schema {
        /// JSON file, or `-` for stdin.
        input: PathBuf,
    },

    /// Print a catalog query.
    Catalog {
        #[command(subcommand)]
        query: CatalogQuery,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CallMode {
    /// `SELECT * FROM "PROC" (...)`
    Select,
    /// `EXECUTE PROCEDURE "PROC" (...)`
    Execute,
    /// `SELECT "FN"(...) FROM RDB$DATABASE`
    Function,
}

#[derive(Subcommand)]
enum CatalogQuery {
    /// Check whether a table exists (binds the table name).
    TableExists,
    /// List user tables.
    Tables,
    /// List the columns of a table.
    Columns { table: String },
}

#[derive(Serialize)]
struct Output<'a> {
    statements: &'a [String],
    params: &'a [SqlValue],
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print(json: bool, statements: &[String], params: &[SqlValue]) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&Output { statements, params })?);
        return Ok(());
    }
    for statement in statements {
        println!("{statement};");
    }
    if !params.is_empty() {
        println!("-- params: {}", serde_json::to_string(params)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = DialectConfig::new(cli.engine_version.parse()?, cli.pagination.parse()?)?;
    debug!(version = %config.version(), pagination = %config.pagination(), "Configured dialect");

    match cli.command {
        Commands::Select { input, count } => {
            let query: QueryDescription = serde_json::from_str(&read_input(&input)?)
                .context("Invalid query description")?;
            let compiler = QueryCompiler::new(config);
            let (sql, params) = if count {
                compiler.compile_count(&query)?
            } else {
                compiler.compile_select(&query)?
            };
            print(cli.json, &[sql], &params)?;
        }

        Commands::Procedure { input, mode } => {
            let call: ProcedureCall = serde_json::from_str(&read_input(&input)?)
                .context("Invalid procedure call")?;
            let compiler = QueryCompiler::new(config);
            let (sql, params) = match mode {
                CallMode::Select => compiler.compile_procedure_select(&call)?,
                CallMode::Execute => compiler.compile_execute_procedure(&call),
                CallMode::Function => compiler.compile_function_call(&call),
            };
            print(cli.json, &[sql], &params)?;
        }

        Commands::Schema { input } => {
            let schema: SchemaDescription = serde_json::from_str(&read_input(&input)?)
                .context("Invalid schema description")?;
            let statements = SchemaCompiler::new(config).compile(&schema)?;
            print(cli.json, &statements, &[])?;
        }

        Commands::Catalog { query } => {
            let compiler = SchemaCompiler::new(config);
            let sql = match query {
                CatalogQuery::TableExists => compiler.compile_table_exists().to_string(),
                CatalogQuery::Tables => compiler.compile_tables().to_string(),
                CatalogQuery::Columns { table } => compiler.compile_columns(&table),
            };
            print(cli.json, &[sql], &[])?;
        }
    }

    Ok(())
}
