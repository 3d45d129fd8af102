//! Full statement assembly from a translation.

use serde::Serialize;

use crate::ast::Query;
use crate::error::TranslateResult;
use crate::translator::result::clause;
use crate::translator::{DEFAULT_OBJECT_ALIAS, Parameters, QueryTranslator, Translation};

/// Executable SQL with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub parameters: Parameters,
}

impl QueryTranslator<'_> {
    /// Generate a SELECT for `query`.
    ///
    /// When the query combines results, the combined set is wrapped as a
    /// derived table before ordering and limiting.
    pub fn build_select(&self, query: &Query) -> TranslateResult<Statement> {
        let translation = self.translate(query)?;
        let fields = self.field_list(&query.entity, DEFAULT_OBJECT_ALIAS, &self.selected_fields(query))?;
        let source = self.source(query, &fields, &translation)?;
        let limit = if query.size > 0 {
            self.generator.limit(0, query.size)
        } else {
            String::new()
        };
        let order_by = if translation.combine_script.is_empty() {
            translation.order_by_clause()
        } else {
            let sort = self.exposed_sort(query, DEFAULT_OBJECT_ALIAS)?;
            if sort.is_empty() { sort } else { format!("ORDER BY {}", sort) }
        };
        let pre_script = translation.pre_script.as_deref().unwrap_or("");

        let sql = if translation.combine_script.is_empty() {
            clause(&[pre_script, "SELECT", &fields, &source, &order_by, &limit])
        } else {
            clause(&[pre_script, "SELECT", "*", &source, &order_by, &limit])
        };
        Ok(Statement {
            sql,
            parameters: translation.parameters,
        })
    }

    /// Generate a `SELECT COUNT(*)` over the rows `query` selects.
    pub fn build_count(&self, query: &Query) -> TranslateResult<Statement> {
        let translation = self.translate(query)?;
        let fields = self.field_list(&query.entity, DEFAULT_OBJECT_ALIAS, &self.selected_fields(query))?;
        let source = self.source(query, &fields, &translation)?;
        let pre_script = translation.pre_script.as_deref().unwrap_or("");
        Ok(Statement {
            sql: clause(&[pre_script, "SELECT COUNT(*)", &source]),
            parameters: translation.parameters,
        })
    }

    /// `FROM ... [joins] [WHERE ...]`, or the derived combined set.
    fn source(&self, query: &Query, fields: &str, translation: &Translation) -> TranslateResult<String> {
        let table = self.quoted_object_name(query)?;
        let where_clause = translation.where_clause();
        if translation.combine_script.is_empty() {
            return Ok(clause(&[
                "FROM",
                &table,
                "AS",
                DEFAULT_OBJECT_ALIAS,
                translation.joins(),
                &where_clause,
            ]));
        }
        let combined = clause(&[
            "SELECT",
            fields,
            "FROM",
            &table,
            "AS",
            DEFAULT_OBJECT_ALIAS,
            translation.joins(),
            &where_clause,
            &translation.combine_script,
        ]);
        Ok(format!("FROM ({}) AS {}", combined, DEFAULT_OBJECT_ALIAS))
    }
}
