//! Condition tree flattening.

use crate::ast::Condition;
use crate::error::TranslateResult;
use crate::translator::QueryTranslator;
use crate::translator::result::NodeResult;
use crate::translator::state::TranslationState;

impl QueryTranslator<'_> {
    /// Join conditions into one boolean expression, in input order.
    ///
    /// The first condition carries no connector; every later one is
    /// prefixed by its own.
    pub(super) fn translate_conditions(
        &self,
        entity: &str,
        conditions: &[Condition],
        state: &mut TranslationState,
        object_alias: &str,
    ) -> TranslateResult<NodeResult> {
        let mut result = NodeResult::default();
        let mut parts: Vec<String> = Vec::with_capacity(conditions.len());
        for condition in conditions {
            let translated = self.translate_condition(entity, condition, state, object_alias)?;
            result.absorb_scripts(&translated);
            if translated.condition.is_empty() {
                continue;
            }
            if parts.is_empty() {
                parts.push(translated.condition);
            } else {
                parts.push(format!("{} {}", condition.connector().keyword(), translated.condition));
            }
        }
        result.condition = parts.join(" ");
        Ok(result)
    }

    fn translate_condition(
        &self,
        entity: &str,
        condition: &Condition,
        state: &mut TranslationState,
        object_alias: &str,
    ) -> TranslateResult<NodeResult> {
        match condition {
            Condition::Criterion(criterion) => self.translate_criterion(entity, criterion, state, object_alias),
            Condition::Group(group) => match group.conditions.as_slice() {
                [] => Ok(NodeResult::default()),
                // A singleton group needs no parentheses
                [single] => self.translate_condition(entity, single, state, object_alias),
                inner => {
                    let mut translated = self.translate_conditions(entity, inner, state, object_alias)?;
                    if !translated.condition.is_empty() {
                        translated.condition = format!("({})", translated.condition);
                    }
                    Ok(translated)
                }
            },
        }
    }
}
