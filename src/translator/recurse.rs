//! Hierarchy traversal through a generated recursive CTE.

use tracing::debug;

use crate::ast::{Query, Recurse, RecurseDirection};
use crate::error::TranslateResult;
use crate::translator::QueryTranslator;
use crate::translator::result::{NodeResult, clause};
use crate::translator::state::TranslationState;

impl QueryTranslator<'_> {
    /// Build the CTE for `recurse` and rewrite the node condition into a
    /// membership test against it.
    ///
    /// The seed selects rows matching `seed_condition` (joins included);
    /// the recursive step follows the relation field up or down. Joins are
    /// no longer valid on the base table afterwards.
    pub(super) fn translate_recurse(
        &self,
        query: &Query,
        recurse: &Recurse,
        state: &mut TranslationState,
        object_alias: &str,
        seed_condition: &str,
        join_script: &str,
    ) -> TranslateResult<NodeResult> {
        let data = self.quoted_column(&query.entity, &recurse.data_field)?;
        let relation = self.quoted_column(&query.entity, &recurse.relation_field)?;
        let object = self.quoted_object_name(query)?;
        let table = state.next_recurse_table();
        debug!(entity = %query.entity, table = %table.name, direction = ?recurse.direction, "building recursive table");

        let data_column = format!("{}.{}", object_alias, data);
        let relation_column = format!("{}.{}", object_alias, relation);
        let columns = format!("{}, {}", data_column, relation_column);
        let seed_where = if seed_condition.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", seed_condition)
        };
        let seed = clause(&["SELECT", &columns, "FROM", &object, "AS", object_alias, join_script, &seed_where]);
        let link = match recurse.direction {
            RecurseDirection::Up => format!("{} = {}.{}", data_column, table.alias, relation),
            RecurseDirection::Down => format!("{} = {}.{}", relation_column, table.alias, data),
        };
        let step = format!(
            "SELECT {} FROM {} AS {} JOIN {} AS {} ON {}",
            columns, object, object_alias, table.name, table.alias, link
        );
        let script = format!("{} AS ({} UNION ALL {})", table.name, seed, step);
        let condition = format!(
            "{} IN (SELECT {}.{} FROM {} AS {})",
            data_column, table.alias, data, table.name, table.alias
        );

        Ok(NodeResult {
            condition,
            with_scripts: vec![script],
            allow_join: false,
            recurse: Some(table),
            ..Default::default()
        })
    }
}
