//! SQL dialects.
//!
//! The translator emits dialect-agnostic structure and asks the
//! [`SqlGenerator`] for every dialect-specific primitive.

pub mod mysql;
pub mod sqlite;

use serde::{Deserialize, Serialize};

use crate::ast::{CombineKind, FieldConversion, JoinKind};
use crate::error::TranslateResult;
use mysql::MysqlGenerator;
use sqlite::SqliteGenerator;

/// Trait for dialect-specific SQL generation.
pub trait SqlGenerator {
    /// Human readable dialect name used in errors.
    fn name(&self) -> &'static str;
    /// Quote an identifier (table or column name).
    fn quote_identifier(&self, name: &str) -> String;
    /// Prefix placed before a named parameter (`@name`).
    fn parameter_prefix(&self) -> &'static str;
    /// Row limit clause.
    fn limit(&self, offset: usize, count: usize) -> String {
        format!("LIMIT {},{}", offset, count)
    }
    fn join_operator(&self, kind: JoinKind) -> &'static str {
        kind.keyword()
    }
    /// Native set operator, or `None` when the dialect lacks it.
    fn combine_operator(&self, kind: CombineKind) -> Option<&'static str>;
    /// Render a converted column reference, e.g. `LOWER(TB.`Name`)`.
    fn convert_field(&self, conversion: &FieldConversion, object_name: &str, column: &str) -> TranslateResult<String>;
}

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn generator(&self) -> Box<dyn SqlGenerator + Send + Sync> {
        match self {
            Dialect::MySql => Box::new(MysqlGenerator),
            Dialect::Sqlite => Box::new(SqliteGenerator),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(format!("unknown dialect '{}'. Expected: mysql or sqlite", other)),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.generator().name())
    }
}
