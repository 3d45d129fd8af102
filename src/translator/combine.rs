//! Set combinations.
//!
//! Native set operators are emitted as text. Operators the dialect lacks
//! are rewritten into joins before the join phase. EXCEPT becomes a left
//! join against the filtered other side plus a test for an unmatched key.
//! INTERSECT becomes an inner join on the combine fields.

use tracing::debug;

use crate::ast::{Combine, CombineKind, Join, JoinCriterion, JoinKind, Query};
use crate::error::{TranslateError, TranslateResult};
use crate::translator::result::{NodeResult, clause, push_fragment};
use crate::translator::state::TranslationState;
use crate::translator::QueryTranslator;

/// A join produced by rewriting a combine.
pub(super) struct SynthesizedJoin {
    pub(super) join: Join,
    pub(super) isolated: bool,
}

impl QueryTranslator<'_> {
    /// Returns the combine text and any joins synthesized by rewriting.
    pub(super) fn translate_combines(
        &self,
        query: &Query,
        state: &mut TranslationState,
    ) -> TranslateResult<(NodeResult, Vec<SynthesizedJoin>)> {
        let mut result = NodeResult::default();
        let mut rewritten = Vec::new();
        for combine in &query.combines {
            match self.generator.combine_operator(combine.kind) {
                Some(operator) => {
                    let alias = state.next_sub_alias();
                    let branch = self.translate_node(&combine.query, state, &alias, true)?;
                    // Both sides of a set operator must agree on arity and order
                    let fields = self.field_list(&combine.query.entity, &alias, &self.selected_fields(query))?;
                    let table = self.quoted_object_name(&combine.query)?;
                    let text = clause(&[
                        operator,
                        "SELECT",
                        &fields,
                        "FROM",
                        &table,
                        "AS",
                        &alias,
                        branch.joinable(),
                        &branch.where_clause(),
                    ]);
                    push_fragment(&mut result.combine, &text);
                    result.absorb_scripts(&branch);
                }
                None => {
                    debug!(kind = %combine.kind, entity = %query.entity, "rewriting combine into join");
                    let join = match combine.kind {
                        CombineKind::Except => self.except_join(combine),
                        CombineKind::Intersect => self.intersect_join(combine),
                        CombineKind::Union | CombineKind::UnionAll => {
                            return Err(TranslateError::UnsupportedCombine {
                                dialect: self.generator.name(),
                                kind: combine.kind,
                            });
                        }
                    };
                    rewritten.push(join);
                }
            }
        }
        Ok((result, rewritten))
    }

    /// Rows of A with no match in B.
    ///
    /// Everything filtering B stays inside a derived table on the right of
    /// a LEFT JOIN; only the first combine field is then tested for NULL.
    fn except_join(&self, combine: &Combine) -> SynthesizedJoin {
        let fields = self.combine_fields(&combine.query);
        let mut filtered = combine.query.clone();
        filtered.query_fields = fields.clone();
        let mut join = Join::new(JoinKind::Left, filtered);
        join.criteria = equal_criteria(&fields);
        if let Some(first) = fields.first() {
            join.extra_filter = Some(Query::new(combine.query.entity.clone()).is_null(first.as_str()));
        }
        SynthesizedJoin { join, isolated: true }
    }

    /// Rows of A that also appear in B.
    fn intersect_join(&self, combine: &Combine) -> SynthesizedJoin {
        let fields = self.combine_fields(&combine.query);
        let mut join = Join::new(JoinKind::Inner, combine.query.clone());
        join.criteria = equal_criteria(&fields);
        SynthesizedJoin { join, isolated: false }
    }

    /// Declared query fields, else primary keys, else every queryable field.
    fn combine_fields(&self, query: &Query) -> Vec<String> {
        if !query.query_fields.is_empty() {
            return query.query_fields.clone();
        }
        let keys = self.metadata.primary_keys(&query.entity);
        if keys.is_empty() {
            self.metadata.query_fields(&query.entity)
        } else {
            keys
        }
    }
}

fn equal_criteria(fields: &[String]) -> Vec<JoinCriterion> {
    fields
        .iter()
        .map(|f| JoinCriterion::field_equal(f.as_str(), f.as_str()))
        .collect()
}
