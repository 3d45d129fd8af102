//! Query-to-SQL translator.
//!
//! Walks a [`Query`] tree and produces dialect-specific condition, sort,
//! join and combine fragments plus the bound parameters. Every node (the
//! top query, each join filter, each combine branch, each subquery) goes
//! through the same recursive node translation, sharing one
//! [`TranslationState`] so aliases and parameter names stay unique within
//! a run.

mod combine;
mod conditions;
mod criterion;
mod joins;
mod node;
mod recurse;
mod result;
pub mod state;
pub mod statement;
mod subquery;

#[cfg(test)]
mod tests;

use serde::Serialize;
use tracing::debug;

use crate::ast::{FieldRef, Query};
use crate::dialect::{Dialect, SqlGenerator};
use crate::error::TranslateResult;
use crate::metadata::EntityMetadata;
use state::TranslationState;

pub use state::{Parameters, RecurseTable};
pub use statement::Statement;

/// Alias of the top-level object.
pub const DEFAULT_OBJECT_ALIAS: &str = "TB";

/// Output of one translation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    /// `WITH RECURSIVE ...` preamble when hierarchy traversal was used.
    pub pre_script: Option<String>,
    /// WHERE condition without the keyword.
    pub condition: String,
    /// ORDER BY list without the keyword.
    pub sort: String,
    pub join_script: String,
    /// False when joins were folded into a recursive CTE.
    pub allow_join: bool,
    pub combine_script: String,
    pub recurse_table: Option<RecurseTable>,
    pub parameters: Parameters,
}

impl Translation {
    /// Join text safe to place after the FROM clause.
    pub fn joins(&self) -> &str {
        if self.allow_join { &self.join_script } else { "" }
    }

    pub fn where_clause(&self) -> String {
        if self.condition.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.condition)
        }
    }

    pub fn order_by_clause(&self) -> String {
        if self.sort.is_empty() {
            String::new()
        } else {
            format!("ORDER BY {}", self.sort)
        }
    }
}

/// Translates query trees for one dialect against one metadata source.
///
/// The translator itself is immutable; all per-run state lives in a fresh
/// [`TranslationState`] created by [`QueryTranslator::translate`], so one
/// translator can serve independent translations.
pub struct QueryTranslator<'a> {
    metadata: &'a dyn EntityMetadata,
    generator: Box<dyn SqlGenerator + Send + Sync>,
}

impl<'a> QueryTranslator<'a> {
    pub fn new(metadata: &'a dyn EntityMetadata, dialect: Dialect) -> Self {
        Self::with_generator(metadata, dialect.generator())
    }

    /// Use a custom dialect generator.
    pub fn with_generator(metadata: &'a dyn EntityMetadata, generator: Box<dyn SqlGenerator + Send + Sync>) -> Self {
        Self { metadata, generator }
    }

    pub fn generator(&self) -> &dyn SqlGenerator {
        self.generator.as_ref()
    }

    /// Translate a query tree.
    pub fn translate(&self, query: &Query) -> TranslateResult<Translation> {
        debug!(entity = %query.entity, dialect = self.generator.name(), "translating query");
        let mut state = TranslationState::new();
        let result = self.translate_node(query, &mut state, DEFAULT_OBJECT_ALIAS, true)?;

        let pre_script = if result.with_scripts.is_empty() {
            None
        } else {
            Some(format!("WITH RECURSIVE {}", result.with_scripts.join(", ")))
        };
        let mut condition = result.condition;
        result::and_append(&mut condition, &result.join_extra);

        debug!(
            parameters = state.parameters.len(),
            ctes = result.with_scripts.len(),
            "translation finished"
        );
        Ok(Translation {
            pre_script,
            condition,
            sort: result.sort,
            join_script: result.join,
            allow_join: result.allow_join,
            combine_script: result.combine,
            recurse_table: result.recurse,
            parameters: state.parameters,
        })
    }

    /// `alias.column`, or the dialect rendering of a converted field.
    pub(crate) fn field_name(&self, entity: &str, alias: &str, field: &FieldRef) -> TranslateResult<String> {
        let column = self.metadata.resolve_field(entity, &field.name)?;
        match &field.conversion {
            None => Ok(format!("{}.{}", alias, self.generator.quote_identifier(&column))),
            Some(conversion) => self.generator.convert_field(conversion, alias, &column),
        }
    }

    pub(crate) fn quoted_column(&self, entity: &str, field: &str) -> TranslateResult<String> {
        let column = self.metadata.resolve_field(entity, field)?;
        Ok(self.generator.quote_identifier(&column))
    }

    /// Quoted physical object name, honouring the query's override.
    pub(crate) fn quoted_object_name(&self, query: &Query) -> TranslateResult<String> {
        let name = match &query.object_name {
            Some(name) => name.clone(),
            None => self.metadata.object_name(&query.entity)?,
        };
        Ok(self.generator.quote_identifier(&name))
    }

    /// Declared query fields, or every queryable field of the entity.
    pub(crate) fn selected_fields(&self, query: &Query) -> Vec<String> {
        if query.query_fields.is_empty() {
            self.metadata.query_fields(&query.entity)
        } else {
            query.query_fields.clone()
        }
    }

    /// Select list of bare physical columns: `alias.col, ...`.
    pub(crate) fn column_list(&self, entity: &str, alias: &str, fields: &[String]) -> TranslateResult<String> {
        let columns = fields
            .iter()
            .map(|field| Ok(format!("{}.{}", alias, self.quoted_column(entity, field)?)))
            .collect::<TranslateResult<Vec<_>>>()?;
        Ok(columns.join(", "))
    }

    /// ORDER BY list over a derived set whose columns carry logical names.
    pub(crate) fn exposed_sort(&self, query: &Query, alias: &str) -> TranslateResult<String> {
        let sorts = query
            .sorts
            .iter()
            .map(|entry| {
                let field = match &entry.field.conversion {
                    None => format!("{}.{}", alias, self.generator.quote_identifier(&entry.field.name)),
                    Some(conversion) => self.generator.convert_field(conversion, alias, &entry.field.name)?,
                };
                Ok(format!("{} {}", field, if entry.desc { "DESC" } else { "ASC" }))
            })
            .collect::<TranslateResult<Vec<_>>>()?;
        Ok(sorts.join(", "))
    }

    /// Explicit select list: `alias.col` or `alias.col AS name`.
    pub(crate) fn field_list(&self, entity: &str, alias: &str, fields: &[String]) -> TranslateResult<String> {
        let columns = fields
            .iter()
            .map(|field| {
                let column = self.metadata.resolve_field(entity, field)?;
                let quoted = format!("{}.{}", alias, self.generator.quote_identifier(&column));
                Ok(if column == *field {
                    quoted
                } else {
                    format!("{} AS {}", quoted, self.generator.quote_identifier(field))
                })
            })
            .collect::<TranslateResult<Vec<_>>>()?;
        Ok(columns.join(", "))
    }
}
