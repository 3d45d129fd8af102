use crate::ast::{CombineKind, FieldConversion};
use crate::dialect::SqlGenerator;
use crate::error::{TranslateError, TranslateResult};

/// SQLite Generator.
///
/// SQLite has native EXCEPT/INTERSECT, so combines are never rewritten.
pub struct SqliteGenerator;

impl SqlGenerator for SqliteGenerator {
    fn name(&self) -> &'static str {
        "SQLite"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn parameter_prefix(&self) -> &'static str {
        "@"
    }

    fn combine_operator(&self, kind: CombineKind) -> Option<&'static str> {
        Some(match kind {
            CombineKind::Union => "UNION",
            CombineKind::UnionAll => "UNION ALL",
            CombineKind::Except => "EXCEPT",
            CombineKind::Intersect => "INTERSECT",
        })
    }

    fn convert_field(&self, conversion: &FieldConversion, object_name: &str, column: &str) -> TranslateResult<String> {
        let col = format!("{}.{}", object_name, self.quote_identifier(column));
        let sql = match conversion.name.to_ascii_lowercase().as_str() {
            "lower" => format!("lower({})", col),
            "upper" => format!("upper({})", col),
            "trim" => format!("trim({})", col),
            "length" => format!("length({})", col),
            "date" => format!("date({})", col),
            "json_value" if !conversion.args.is_empty() => {
                format!("json_extract({}, '{}')", col, conversion.args[0].replace('\'', "''"))
            }
            _ => {
                return Err(TranslateError::UnsupportedConversion {
                    dialect: self.name(),
                    conversion: conversion.name.clone(),
                });
            }
        };
        Ok(sql)
    }
}
