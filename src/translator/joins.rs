//! Join clauses and ON-predicate resolution.

use tracing::debug;

use crate::ast::{Join, JoinCriterion, JoinKind, JoinValue, Query};
use crate::error::{TranslateError, TranslateResult};
use crate::translator::result::{NodeResult, and_append, clause, push_fragment};
use crate::translator::state::TranslationState;
use crate::translator::QueryTranslator;

/// A join handed to the join phase.
#[derive(Clone, Copy)]
pub(super) struct JoinSpec<'a> {
    pub(super) join: &'a Join,
    /// Keep every filter of the joined side inside a derived table.
    pub(super) isolated: bool,
}

impl<'a> JoinSpec<'a> {
    pub(super) fn plain(join: &'a Join) -> Self {
        Self { join, isolated: false }
    }
}

impl QueryTranslator<'_> {
    /// Translate the joins of `query`.
    ///
    /// The result carries the join text, conditions of the joined nodes
    /// (appended to the owner's WHERE) and extra-filter text (surfaced as
    /// `join_extra`). A joined side that combines results, or an isolated
    /// one, is joined as a derived table exposing physical column names.
    pub(super) fn translate_joins(
        &self,
        query: &Query,
        joins: &[JoinSpec<'_>],
        state: &mut TranslationState,
        object_alias: &str,
    ) -> TranslateResult<NodeResult> {
        let mut result = NodeResult::default();
        for spec in joins {
            let join = spec.join;
            let join_alias = state.next_sub_alias();
            let joined = self.translate_node(&join.query, state, &join_alias, true)?;
            let table = self.quoted_object_name(&join.query)?;
            let operator = self.generator.join_operator(join.kind);

            if joined.combine.is_empty() && !spec.isolated {
                let on = self.join_condition(query, join, state, object_alias, &join_alias)?;
                result.absorb_scripts(&on);
                and_append(&mut result.condition, &joined.condition);
                and_append(&mut result.condition, &joined.join_extra);
                push_fragment(
                    &mut result.join,
                    &join_fragment(operator, &table, &join_alias, &on.condition),
                );
                push_fragment(&mut result.join, joined.joinable());
                self.apply_extra_filter(join, state, &join_alias, &mut result)?;
            } else {
                let derived_alias = state.next_sub_alias();
                let on = self.join_condition(query, join, state, object_alias, &derived_alias)?;
                result.absorb_scripts(&on);
                let fields = self.column_list(&join.query.entity, &join_alias, &self.selected_fields(&join.query))?;
                let source = clause(&[
                    "SELECT",
                    &fields,
                    "FROM",
                    &table,
                    "AS",
                    &join_alias,
                    joined.joinable(),
                    &joined.where_clause(),
                    &joined.combine,
                ]);
                push_fragment(
                    &mut result.join,
                    &join_fragment(operator, &format!("({})", source), &derived_alias, &on.condition),
                );
                self.apply_extra_filter(join, state, &derived_alias, &mut result)?;
            }
            result.absorb_scripts(&joined);
        }
        Ok(result)
    }

    /// Translate the join's extra filter under `alias` into `join_extra`.
    fn apply_extra_filter(
        &self,
        join: &Join,
        state: &mut TranslationState,
        alias: &str,
        result: &mut NodeResult,
    ) -> TranslateResult<()> {
        let Some(filter) = &join.extra_filter else {
            return Ok(());
        };
        let filtered = self.translate_node(filter, state, alias, false)?;
        result.absorb_scripts(&filtered);
        push_fragment(&mut result.join, filtered.joinable());
        and_append(&mut result.join_extra, &filtered.condition);
        and_append(&mut result.join_extra, &filtered.join_extra);
        Ok(())
    }

    /// ON predicate text (without the keyword); empty for cross joins.
    fn join_condition(
        &self,
        query: &Query,
        join: &Join,
        state: &mut TranslationState,
        source_alias: &str,
        target_alias: &str,
    ) -> TranslateResult<NodeResult> {
        if join.kind == JoinKind::Cross {
            return Ok(NodeResult::default());
        }
        let source_entity = query.entity.as_str();
        let target_entity = join.query.entity.as_str();
        let derived;
        let criteria = if join.criteria.is_empty() {
            derived = self.derive_join_criteria(source_entity, target_entity)?;
            &derived
        } else {
            &join.criteria
        };
        let side = |right: bool| {
            if right {
                (target_entity, target_alias)
            } else {
                (source_entity, source_alias)
            }
        };

        let mut result = NodeResult::default();
        let mut parts: Vec<String> = Vec::with_capacity(criteria.len());
        for criterion in criteria {
            let text = match criterion {
                JoinCriterion::Regular {
                    field,
                    operator,
                    value,
                    right,
                    ..
                } => match value {
                    JoinValue::Field(target_field) => {
                        let source_name = self.field_name(source_entity, source_alias, field)?;
                        let target_name = self.field_name(target_entity, target_alias, target_field)?;
                        let (left, right_operand) = if *right {
                            (target_name, source_name)
                        } else {
                            (source_name, target_name)
                        };
                        format!("{} {} {}", left, operator.symbol(), right_operand)
                    }
                    JoinValue::Query(subquery) => {
                        let (entity, alias) = side(*right);
                        let name = self.field_name(entity, alias, field)?;
                        let embedded = self.translate_subquery(subquery, state, &name, *operator)?;
                        result.absorb_scripts(&embedded);
                        embedded.condition
                    }
                    JoinValue::Value(value) => {
                        let (entity, alias) = side(*right);
                        let name = self.field_name(entity, alias, field)?;
                        if operator.needs_value() {
                            let placeholder = self.bind_parameter(state, &field.name, *operator, value.clone());
                            format!("{} {} {}", name, operator.symbol(), placeholder)
                        } else {
                            format!("{} {}", name, operator.symbol())
                        }
                    }
                },
                JoinCriterion::Query {
                    query: criteria_query,
                    right,
                    ..
                } => {
                    let (_, alias) = side(*right);
                    let translated = self.translate_node(criteria_query, state, alias, false)?;
                    result.absorb_scripts(&translated);
                    if translated.condition.is_empty() {
                        continue;
                    }
                    format!("({})", translated.condition)
                }
            };
            if parts.is_empty() {
                parts.push(text);
            } else {
                parts.push(format!("{} {}", criterion.connector().keyword(), text));
            }
        }
        result.condition = parts.join(" ");
        Ok(result)
    }

    /// Primary-key equality for a self join, declared relation pairs otherwise.
    fn derive_join_criteria(&self, source_entity: &str, target_entity: &str) -> TranslateResult<Vec<JoinCriterion>> {
        let criteria: Vec<JoinCriterion> = if source_entity == target_entity {
            self.metadata
                .primary_keys(source_entity)
                .into_iter()
                .map(|key| JoinCriterion::field_equal(key.clone(), key))
                .collect()
        } else {
            self.metadata
                .relation_fields(source_entity, target_entity)
                .into_iter()
                .map(|(from, to)| JoinCriterion::field_equal(from, to))
                .collect()
        };
        if criteria.is_empty() {
            return Err(TranslateError::missing_relation(source_entity, target_entity));
        }
        debug!(
            source = source_entity,
            target = target_entity,
            criteria = criteria.len(),
            "derived join criteria"
        );
        Ok(criteria)
    }
}

fn join_fragment(operator: &str, source: &str, alias: &str, on: &str) -> String {
    if on.is_empty() {
        format!("{} {} AS {}", operator, source, alias)
    } else {
        format!("{} {} AS {} ON {}", operator, source, alias, on)
    }
}
