//! Partial result threaded through recursive node translation.

use crate::translator::state::RecurseTable;

/// Fragments produced for one query node.
///
/// Everything except the parameters (kept in the shared state) is returned
/// by value and merged explicitly by the caller.
#[derive(Debug, Clone)]
pub(crate) struct NodeResult {
    pub(crate) condition: String,
    pub(crate) sort: String,
    pub(crate) join: String,
    pub(crate) combine: String,
    pub(crate) with_scripts: Vec<String>,
    /// False once the node is sourced from a recursive CTE.
    pub(crate) allow_join: bool,
    /// Joined-side filters destined for the outer WHERE clause.
    pub(crate) join_extra: String,
    pub(crate) recurse: Option<RecurseTable>,
}

impl Default for NodeResult {
    fn default() -> Self {
        Self {
            condition: String::new(),
            sort: String::new(),
            join: String::new(),
            combine: String::new(),
            with_scripts: Vec::new(),
            allow_join: true,
            join_extra: String::new(),
            recurse: None,
        }
    }
}

impl NodeResult {
    pub(crate) fn with_condition(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            ..Default::default()
        }
    }

    /// Take over CTE scripts and the recursive table identity of a child.
    pub(crate) fn absorb_scripts(&mut self, child: &NodeResult) {
        if child.with_scripts.is_empty() {
            return;
        }
        self.with_scripts.extend(child.with_scripts.iter().cloned());
        self.recurse = child.recurse.clone();
    }

    /// Join text, or nothing when joins were folded into a CTE.
    pub(crate) fn joinable(&self) -> &str {
        if self.allow_join { &self.join } else { "" }
    }

    /// `WHERE ...` including pending join-extra conditions, or empty.
    pub(crate) fn where_clause(&self) -> String {
        let mut condition = self.condition.clone();
        and_append(&mut condition, &self.join_extra);
        if condition.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", condition)
        }
    }
}

/// Append `text` to `target` with an AND connector.
pub(crate) fn and_append(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push_str(" AND ");
    }
    target.push_str(text);
}

/// Append a space separated fragment.
pub(crate) fn push_fragment(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

/// Join the non-empty parts with single spaces.
pub(crate) fn clause(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
