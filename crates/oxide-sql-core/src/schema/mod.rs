//! Table schema descriptions.
//!
//! A [`SchemaDescription`] describes one table-level DDL action: creating a
//! table, altering it (adding or dropping columns and constraints) or
//! dropping it. Dialects map the abstract [`ColumnType`]s onto their own
//! type names.

use serde::{Deserialize, Serialize};

use crate::value::SqlValue;

/// Abstract column types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Fixed-length character string.
    Char(u32),
    /// Variable-length character string.
    String(u32),
    Text,
    MediumText,
    LongText,
    Integer,
    BigInteger,
    MediumInteger,
    SmallInteger,
    TinyInteger,
    Float,
    Double,
    Decimal {
        precision: u8,
        scale: u8,
    },
    Boolean,
    /// A string restricted to the listed values.
    Enum(Vec<String>),
    /// A set of the listed values.
    Set(Vec<String>),
    Json,
    Jsonb,
    Date,
    DateTime,
    DateTimeTz,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
    Binary,
    Uuid,
    IpAddress,
    MacAddress,
    Geometry,
}

impl ColumnType {
    /// Returns the snake-case name of the type, as used in JSON.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char(_) => "char",
            Self::String(_) => "string",
            Self::Text => "text",
            Self::MediumText => "medium_text",
            Self::LongText => "long_text",
            Self::Integer => "integer",
            Self::BigInteger => "big_integer",
            Self::MediumInteger => "medium_integer",
            Self::SmallInteger => "small_integer",
            Self::TinyInteger => "tiny_integer",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal { .. } => "decimal",
            Self::Boolean => "boolean",
            Self::Enum(_) => "enum",
            Self::Set(_) => "set",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::DateTimeTz => "date_time_tz",
            Self::Time => "time",
            Self::TimeTz => "time_tz",
            Self::Timestamp => "timestamp",
            Self::TimestampTz => "timestamp_tz",
            Self::Binary => "binary",
            Self::Uuid => "uuid",
            Self::IpAddress => "ip_address",
            Self::MacAddress => "mac_address",
            Self::Geometry => "geometry",
        }
    }

    /// Returns true for the integer family.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::BigInteger
                | Self::MediumInteger
                | Self::SmallInteger
                | Self::TinyInteger
        )
    }

    /// Returns true for types carrying a timezone.
    #[must_use]
    pub const fn has_timezone(&self) -> bool {
        matches!(self, Self::DateTimeTz | Self::TimeTz | Self::TimestampTz)
    }
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// A literal, rendered inline.
    Value(SqlValue),
    /// A raw SQL expression such as `CURRENT_DATE`.
    Expression(String),
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub collation: Option<String>,
    /// Timestamps default to the current timestamp.
    #[serde(default)]
    pub use_current: bool,
    #[serde(default)]
    pub auto_increment: bool,
}

impl ColumnDefinition {
    /// Creates a NOT NULL column with no default.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            default: None,
            charset: None,
            collation: None,
            use_current: false,
            auto_increment: false,
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: SqlValue) -> Self {
        self.default = Some(DefaultValue::Value(value));
        self
    }

    #[must_use]
    pub fn default_expression(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    #[must_use]
    pub const fn use_current(mut self) -> Self {
        self.use_current = true;
        self
    }

    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}

/// Action to take on referenced rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ForeignKeyAction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Kind of a table constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Primary,
    Unique,
    /// A plain (non-unique) index.
    Index,
    Foreign {
        references_table: String,
        references: Vec<String>,
        #[serde(default)]
        on_delete: Option<ForeignKeyAction>,
        #[serde(default)]
        on_update: Option<ForeignKeyAction>,
    },
}

impl ConstraintKind {
    /// Suffix used when deriving a default constraint name.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Unique => "unique",
            Self::Index => "index",
            Self::Foreign { .. } => "foreign",
        }
    }
}

/// A table constraint or index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Explicit name; dialects derive one when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub kind: ConstraintKind,
}

impl Constraint {
    fn with_kind(columns: impl IntoIterator<Item = impl Into<String>>, kind: ConstraintKind) -> Self {
        Self {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
            kind,
        }
    }

    pub fn primary(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::with_kind(columns, ConstraintKind::Primary)
    }

    pub fn unique(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::with_kind(columns, ConstraintKind::Unique)
    }

    pub fn index(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::with_kind(columns, ConstraintKind::Index)
    }

    /// A foreign key referencing `references` on `table`.
    pub fn foreign(
        columns: impl IntoIterator<Item = impl Into<String>>,
        table: impl Into<String>,
        references: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::with_kind(
            columns,
            ConstraintKind::Foreign {
                references_table: table.into(),
                references: references.into_iter().map(Into::into).collect(),
                on_delete: None,
                on_update: None,
            },
        )
    }

    /// Sets an explicit name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the ON DELETE action. No effect on non-foreign constraints.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        if let ConstraintKind::Foreign { on_delete, .. } = &mut self.kind {
            *on_delete = Some(action);
        }
        self
    }

    /// Sets the ON UPDATE action. No effect on non-foreign constraints.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        if let ConstraintKind::Foreign { on_update, .. } = &mut self.kind {
            *on_update = Some(action);
        }
        self
    }
}

/// Table-level DDL action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaAction {
    #[default]
    Create,
    Alter,
    Drop,
    DropIfExists,
}

/// A table schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub table: String,
    #[serde(default)]
    pub action: SchemaAction,
    #[serde(default)]
    pub temporary: bool,
    /// Columns to create (or add, when altering).
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    /// Constraints to create (or add, when altering).
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub dropped_columns: Vec<String>,
    #[serde(default)]
    pub dropped_constraints: Vec<Constraint>,
}

impl SchemaDescription {
    fn with_action(table: impl Into<String>, action: SchemaAction) -> Self {
        Self {
            table: table.into(),
            action,
            temporary: false,
            columns: Vec::new(),
            constraints: Vec::new(),
            dropped_columns: Vec::new(),
            dropped_constraints: Vec::new(),
        }
    }

    pub fn create(table: impl Into<String>) -> Self {
        Self::with_action(table, SchemaAction::Create)
    }

    pub fn alter(table: impl Into<String>) -> Self {
        Self::with_action(table, SchemaAction::Alter)
    }

    pub fn drop(table: impl Into<String>) -> Self {
        Self::with_action(table, SchemaAction::Drop)
    }

    pub fn drop_if_exists(table: impl Into<String>) -> Self {
        Self::with_action(table, SchemaAction::DropIfExists)
    }

    #[must_use]
    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    #[must_use]
    pub fn drop_column(mut self, column: impl Into<String>) -> Self {
        self.dropped_columns.push(column.into());
        self
    }

    #[must_use]
    pub fn drop_constraint(mut self, constraint: Constraint) -> Self {
        self.dropped_constraints.push(constraint);
        self
    }

    #[must_use]
    pub const fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }
}
