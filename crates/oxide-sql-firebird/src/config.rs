//! Dialect configuration.
//!
//! The configuration is fixed when a compiler is constructed. Invalid
//! combinations (unknown versions, ROWS pagination on 1.5) are rejected
//! here so that compilation never has to re-check them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FirebirdError, Result};

/// Firebird engine version the output must run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EngineVersion {
    V1_5,
    #[default]
    V2_5,
    V3_0,
    V4_0,
    V5_0,
}

impl EngineVersion {
    /// Returns the version as written in configuration (`"2.5"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_5 => "1.5",
            Self::V2_5 => "2.5",
            Self::V3_0 => "3.0",
            Self::V4_0 => "4.0",
            Self::V5_0 => "5.0",
        }
    }

    /// `ROWS m TO n` exists since 2.0.
    #[must_use]
    pub const fn supports_rows(self) -> bool {
        !matches!(self, Self::V1_5)
    }

    /// `IS [NOT] DISTINCT FROM` exists since 2.0.
    #[must_use]
    pub const fn supports_distinct_from(self) -> bool {
        !matches!(self, Self::V1_5)
    }

    /// `SIMILAR TO` exists since 2.5.
    #[must_use]
    pub const fn supports_similar_to(self) -> bool {
        !matches!(self, Self::V1_5)
    }

    /// Identity columns exist since 3.0.
    #[must_use]
    pub const fn supports_identity(self) -> bool {
        matches!(self, Self::V3_0 | Self::V4_0 | Self::V5_0)
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineVersion {
    type Err = FirebirdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1.5" => Ok(Self::V1_5),
            "2.5" => Ok(Self::V2_5),
            "3" | "3.0" => Ok(Self::V3_0),
            "4" | "4.0" => Ok(Self::V4_0),
            "5" | "5.0" => Ok(Self::V5_0),
            other => Err(FirebirdError::UnknownVersion(other.to_string())),
        }
    }
}

impl TryFrom<String> for EngineVersion {
    type Error = FirebirdError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EngineVersion> for String {
    fn from(version: EngineVersion) -> Self {
        version.as_str().to_string()
    }
}

/// How LIMIT/OFFSET are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationStyle {
    /// `SELECT FIRST n SKIP m ...`, available on every version.
    #[default]
    Prefix,
    /// `... ROWS m TO n`, since 2.0.
    Rows,
}

impl fmt::Display for PaginationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => f.write_str("FIRST/SKIP"),
            Self::Rows => f.write_str("ROWS"),
        }
    }
}

impl FromStr for PaginationStyle {
    type Err = FirebirdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" | "first-skip" | "first_skip" => Ok(Self::Prefix),
            "rows" => Ok(Self::Rows),
            _ => Err(FirebirdError::UnknownPagination(s.to_string())),
        }
    }
}

/// Validated dialect configuration.
///
/// Defaults to Firebird 2.5 with `FIRST`/`SKIP` pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawDialectConfig")]
pub struct DialectConfig {
    version: EngineVersion,
    pagination: PaginationStyle,
}

#[derive(Deserialize)]
struct RawDialectConfig {
    #[serde(default)]
    version: EngineVersion,
    #[serde(default)]
    pagination: PaginationStyle,
}

impl TryFrom<RawDialectConfig> for DialectConfig {
    type Error = FirebirdError;

    fn try_from(raw: RawDialectConfig) -> Result<Self> {
        Self::new(raw.version, raw.pagination)
    }
}

impl DialectConfig {
    /// Creates a configuration, rejecting ROWS pagination before 2.0.
    pub fn new(version: EngineVersion, pagination: PaginationStyle) -> Result<Self> {
        if pagination == PaginationStyle::Rows && !version.supports_rows() {
            return Err(FirebirdError::PaginationUnavailable {
                style: pagination,
                version,
            });
        }
        Ok(Self {
            version,
            pagination,
        })
    }

    /// Parses a version string and uses prefix pagination.
    pub fn for_version(version: &str) -> Result<Self> {
        Self::new(version.parse()?, PaginationStyle::Prefix)
    }

    #[must_use]
    pub const fn version(&self) -> EngineVersion {
        self.version
    }

    #[must_use]
    pub const fn pagination(&self) -> PaginationStyle {
        self.pagination
    }
}
