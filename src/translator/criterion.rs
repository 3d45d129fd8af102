use crate::ast::{Criterion, Operator, Value};
use crate::error::TranslateResult;
use crate::translator::QueryTranslator;
use crate::translator::result::NodeResult;
use crate::translator::state::TranslationState;

impl QueryTranslator<'_> {
    /// `<field> <op> <placeholder>`, `<field> <op>` for null tests, or an
    /// embedded subquery.
    pub(super) fn translate_criterion(
        &self,
        entity: &str,
        criterion: &Criterion,
        state: &mut TranslationState,
        object_alias: &str,
    ) -> TranslateResult<NodeResult> {
        let field = self.field_name(entity, object_alias, &criterion.field)?;
        let operator = criterion.operator;
        if !operator.needs_value() {
            return Ok(NodeResult::with_condition(format!("{} {}", field, operator.symbol())));
        }
        match &criterion.value {
            Value::Query(subquery) => self.translate_subquery(subquery, state, &field, operator),
            value => {
                let placeholder = self.bind_parameter(state, &criterion.field.name, operator, value.clone());
                Ok(NodeResult::with_condition(format!(
                    "{} {} {}",
                    field,
                    operator.symbol(),
                    placeholder
                )))
            }
        }
    }

    /// Add a value to the shared collector and return its placeholder.
    pub(super) fn bind_parameter(
        &self,
        state: &mut TranslationState,
        field: &str,
        operator: Operator,
        value: Value,
    ) -> String {
        let value = match operator.wildcards() {
            Some((leading, trailing)) => value.with_wildcards(leading, trailing),
            None => value,
        };
        let name = state.next_parameter_name(field);
        let placeholder = format!("{}{}", self.generator.parameter_prefix(), name);
        state.parameters.add(name, value);
        placeholder
    }
}
