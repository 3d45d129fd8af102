//! Queries embedded as predicate values.

use tracing::trace;

use crate::ast::{Operator, Query};
use crate::error::{TranslateError, TranslateResult};
use crate::translator::result::{NodeResult, clause};
use crate::translator::state::TranslationState;
use crate::translator::QueryTranslator;

impl QueryTranslator<'_> {
    /// `<field> <op> (SELECT ...)`.
    ///
    /// Membership operators with a positive row cap get a wrapping select so
    /// the cap applies to the candidate rows only; any other operator takes
    /// a single row. When the subquery itself combines results, its full
    /// field list is selected first so every branch has the same arity.
    pub(super) fn translate_subquery(
        &self,
        subquery: &Query,
        state: &mut TranslationState,
        field: &str,
        operator: Operator,
    ) -> TranslateResult<NodeResult> {
        let target_field = subquery
            .query_fields
            .first()
            .ok_or_else(|| TranslateError::MissingQueryFields {
                entity: subquery.entity.clone(),
            })?;
        let column = self.quoted_column(&subquery.entity, target_field)?;
        let table = self.quoted_object_name(subquery)?;
        let alias = state.next_sub_alias();

        let (wrap, limit) = if operator.is_membership() {
            if subquery.size > 0 {
                (true, self.generator.limit(0, subquery.size))
            } else {
                (false, String::new())
            }
        } else {
            (false, self.generator.limit(0, 1))
        };
        let use_sort = !limit.is_empty();
        trace!(entity = %subquery.entity, %alias, wrap, "embedding subquery");

        let inner = self.translate_node(subquery, state, &alias, use_sort)?;
        let where_clause = inner.where_clause();
        // A combined source exposes logical names, a plain table exposes columns
        let sort = if inner.combine.is_empty() || !use_sort {
            inner.sort.clone()
        } else {
            self.exposed_sort(subquery, &alias)?
        };
        let order_by = if sort.is_empty() {
            String::new()
        } else {
            format!("ORDER BY {}", sort)
        };
        let exposed = if inner.combine.is_empty() {
            column
        } else {
            self.generator.quote_identifier(target_field)
        };
        let target = format!("{}.{}", alias, exposed);

        let source = if inner.combine.is_empty() {
            clause(&["FROM", &table, "AS", &alias, inner.joinable(), &where_clause])
        } else {
            let fields = self.field_list(&subquery.entity, &alias, &self.selected_fields(subquery))?;
            let combined = clause(&[
                "SELECT",
                &fields,
                "FROM",
                &table,
                "AS",
                &alias,
                inner.joinable(),
                &where_clause,
                &inner.combine,
            ]);
            format!("FROM ({}) AS {}", combined, alias)
        };
        let select = clause(&["SELECT", &target, &source, &order_by, &limit]);

        let condition = if wrap {
            format!(
                "{} {} (SELECT {} FROM ({}) AS S{})",
                field,
                operator.symbol(),
                exposed,
                select,
                alias
            )
        } else {
            format!("{} {} ({})", field, operator.symbol(), select)
        };

        let mut result = NodeResult::with_condition(condition);
        result.absorb_scripts(&inner);
        Ok(result)
    }
}
