//! Per-node orchestration.

use tracing::trace;

use crate::ast::Query;
use crate::error::TranslateResult;
use crate::translator::joins::JoinSpec;
use crate::translator::result::{NodeResult, and_append};
use crate::translator::state::TranslationState;
use crate::translator::QueryTranslator;

impl QueryTranslator<'_> {
    /// Translate one query node.
    ///
    /// Order: conditions, sorts, combines (which may synthesize joins),
    /// joins, then the recursive rewrite.
    pub(super) fn translate_node(
        &self,
        query: &Query,
        state: &mut TranslationState,
        object_alias: &str,
        use_sort: bool,
    ) -> TranslateResult<NodeResult> {
        if let Some(raw) = &query.text {
            trace!(entity = %query.entity, "raw text node");
            for (name, value) in &raw.parameters {
                state.parameters.add(name.clone(), value.clone());
            }
            return Ok(NodeResult::with_condition(raw.text.clone()));
        }
        trace!(entity = %query.entity, alias = object_alias, "translating node");

        let mut result = NodeResult::default();

        let conditions = self.translate_conditions(&query.entity, &query.conditions, state, object_alias)?;
        result.absorb_scripts(&conditions);
        let mut condition = conditions.condition;

        if use_sort {
            let sorts = query
                .sorts
                .iter()
                .map(|entry| {
                    let field = self.field_name(&query.entity, object_alias, &entry.field)?;
                    Ok(format!("{} {}", field, if entry.desc { "DESC" } else { "ASC" }))
                })
                .collect::<TranslateResult<Vec<_>>>()?;
            result.sort = sorts.join(", ");
        }

        let (combined, rewritten) = self.translate_combines(query, state)?;
        result.absorb_scripts(&combined);
        result.combine = combined.combine;

        let joins: Vec<JoinSpec<'_>> = query
            .joins
            .iter()
            .map(JoinSpec::plain)
            .chain(rewritten.iter().map(|r| JoinSpec {
                join: &r.join,
                isolated: r.isolated,
            }))
            .collect();
        let joined = self.translate_joins(query, &joins, state, object_alias)?;
        result.absorb_scripts(&joined);
        and_append(&mut condition, &joined.condition);
        result.join = joined.join;
        let mut join_extra = joined.join_extra;

        if let Some(recurse) = &query.recurse {
            // Joins now live inside the CTE seed, so pending joined-side
            // filters must apply there too.
            let mut seed_condition = condition;
            and_append(&mut seed_condition, &join_extra);
            join_extra = String::new();

            let recursed = self.translate_recurse(query, recurse, state, object_alias, &seed_condition, &result.join)?;
            result.absorb_scripts(&recursed);
            result.allow_join = false;
            condition = recursed.condition;
        }

        result.condition = condition;
        result.join_extra = join_extra;
        Ok(result)
    }
}
