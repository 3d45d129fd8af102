use crate::ast::{CombineKind, FieldConversion};
use crate::dialect::SqlGenerator;
use crate::error::{TranslateError, TranslateResult};

/// MySQL Generator.
pub struct MysqlGenerator;

impl SqlGenerator for MysqlGenerator {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn parameter_prefix(&self) -> &'static str {
        "@"
    }

    fn combine_operator(&self, kind: CombineKind) -> Option<&'static str> {
        // EXCEPT and INTERSECT are rewritten into joins
        match kind {
            CombineKind::Union => Some("UNION"),
            CombineKind::UnionAll => Some("UNION ALL"),
            CombineKind::Except | CombineKind::Intersect => None,
        }
    }

    fn convert_field(&self, conversion: &FieldConversion, object_name: &str, column: &str) -> TranslateResult<String> {
        let col = format!("{}.{}", object_name, self.quote_identifier(column));
        let sql = match conversion.name.to_ascii_lowercase().as_str() {
            "lower" => format!("LOWER({})", col),
            "upper" => format!("UPPER({})", col),
            "trim" => format!("TRIM({})", col),
            "length" => format!("CHAR_LENGTH({})", col),
            "date" => format!("DATE({})", col),
            "json_value" => match conversion.args.first() {
                Some(path) => format!("JSON_UNQUOTE(JSON_EXTRACT({}, '{}'))", col, path.replace('\'', "''")),
                None => return Err(self.unsupported(conversion)),
            },
            _ => return Err(self.unsupported(conversion)),
        };
        Ok(sql)
    }
}

impl MysqlGenerator {
    fn unsupported(&self, conversion: &FieldConversion) -> TranslateError {
        TranslateError::UnsupportedConversion {
            dialect: self.name(),
            conversion: conversion.name.clone(),
        }
    }
}
