//! Column type mapping.

use oxide_sql_core::dialect::Dialect;
use oxide_sql_core::{ColumnDefinition, ColumnType};
use tracing::debug;

use crate::dialect::FirebirdDialect;
use crate::error::{FirebirdError, Result};

/// Maps an abstract column type onto a Firebird type name.
///
/// Firebird has no timezone-aware types before 4.0, so the `*Tz` types map
/// to their plain counterparts.
pub fn type_sql(column_type: &ColumnType) -> Result<String> {
    if column_type.has_timezone() {
        debug!(column_type = column_type.name(), "Timezone dropped from column type");
    }
    let sql = match column_type {
        ColumnType::Char(length) => format!("CHAR({length})"),
        ColumnType::String(length) => format!("VARCHAR({length})"),
        ColumnType::Text | ColumnType::MediumText | ColumnType::LongText => {
            String::from("BLOB SUB_TYPE TEXT")
        }
        ColumnType::Integer | ColumnType::MediumInteger => String::from("INTEGER"),
        ColumnType::BigInteger => String::from("BIGINT"),
        ColumnType::SmallInteger | ColumnType::TinyInteger => String::from("SMALLINT"),
        ColumnType::Float => String::from("FLOAT"),
        ColumnType::Double => String::from("DOUBLE PRECISION"),
        ColumnType::Decimal { precision, scale } => format!("DECIMAL({precision}, {scale})"),
        ColumnType::Boolean => String::from("CHAR(1)"),
        ColumnType::Enum(_) => String::from("VARCHAR(255)"),
        ColumnType::Json => String::from("VARCHAR(8191)"),
        ColumnType::Jsonb => String::from("VARCHAR(8191) CHARACTER SET OCTETS"),
        ColumnType::Date => String::from("DATE"),
        ColumnType::DateTime
        | ColumnType::DateTimeTz
        | ColumnType::Timestamp
        | ColumnType::TimestampTz => String::from("TIMESTAMP"),
        ColumnType::Time | ColumnType::TimeTz => String::from("TIME"),
        ColumnType::Binary => String::from("BLOB SUB_TYPE BINARY"),
        ColumnType::Uuid => String::from("CHAR(36)"),
        ColumnType::IpAddress => String::from("VARCHAR(45)"),
        ColumnType::MacAddress => String::from("VARCHAR(17)"),
        ColumnType::Set(_) | ColumnType::Geometry => {
            return Err(FirebirdError::Unsupported(format!(
                "column type '{}'",
                column_type.name()
            )));
        }
    };
    Ok(sql)
}

/// `CHECK ("col" IN ('a', 'b'))` for enum columns.
pub fn check_sql(dialect: &FirebirdDialect, column: &ColumnDefinition) -> Option<String> {
    let ColumnType::Enum(allowed) = &column.column_type else {
        return None;
    };
    let values: Vec<String> = allowed.iter().map(|value| dialect.quote_string(value)).collect();
    Some(format!(
        "CHECK ({} IN ({}))",
        dialect.quote_identifier(&column.name),
        values.join(", ")
    ))
}

/// Whether a `use_current` flag applies to the type.
pub const fn accepts_current_timestamp(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::Timestamp
            | ColumnType::TimestampTz
            | ColumnType::DateTime
            | ColumnType::DateTimeTz
    )
}
