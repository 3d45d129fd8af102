//! Per-run translation state: alias counters and the parameter collector.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ast::Value;

const SUB_OBJECT_ALIAS_PREFIX: &str = "TSB";
const RECURSE_TABLE_NAME: &str = "RecurseTable";
const RECURSE_TABLE_ALIAS: &str = "RTT";

/// Bound parameters in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    entries: Vec<(String, Value)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Generated name of a recursive CTE and its alias.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecurseTable {
    pub alias: String,
    pub name: String,
}

/// Counters and parameters shared by every recursive call of one run.
#[derive(Debug, Default)]
pub(crate) struct TranslationState {
    sub_object_sequence: usize,
    recurse_sequence: usize,
    parameter_sequence: usize,
    pub(crate) parameters: Parameters,
}

impl TranslationState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Next alias for a joined, combined or embedded object (`TSB0`, `TSB1`, ...).
    pub(crate) fn next_sub_alias(&mut self) -> String {
        let alias = format!("{}{}", SUB_OBJECT_ALIAS_PREFIX, self.sub_object_sequence);
        self.sub_object_sequence += 1;
        alias
    }

    pub(crate) fn next_recurse_table(&mut self) -> RecurseTable {
        let index = self.recurse_sequence;
        self.recurse_sequence += 1;
        RecurseTable {
            alias: format!("{}{}", RECURSE_TABLE_ALIAS, index),
            name: format!("{}{}", RECURSE_TABLE_NAME, index),
        }
    }

    /// `<field><sequence>`, unique within the run.
    pub(crate) fn next_parameter_name(&mut self, field: &str) -> String {
        let name = format!("{}{}", field, self.parameter_sequence);
        self.parameter_sequence += 1;
        name
    }
}
