use serde::{Deserialize, Serialize};

use crate::ast::{Connector, Operator, Value};

/// A dialect-rendered transform applied to a column reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConversion {
    /// Conversion name (`lower`, `upper`, `json_value`, ...)
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl FieldConversion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Reference to a logical entity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,
    #[serde(default)]
    pub conversion: Option<FieldConversion>,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conversion: None,
        }
    }

    pub fn convert(mut self, conversion: FieldConversion) -> Self {
        self.conversion = Some(conversion);
        self
    }
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        FieldRef::new(name)
    }
}

impl From<String> for FieldRef {
    fn from(name: String) -> Self {
        FieldRef::new(name)
    }
}

/// A single field/operator/value predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub field: FieldRef,
    pub operator: Operator,
    #[serde(default = "null_value")]
    pub value: Value,
    #[serde(default)]
    pub connector: Connector,
}

fn null_value() -> Value {
    Value::Null
}

/// A parenthesized list of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub connector: Connector,
}

/// A criterion or a nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Criterion(Criterion),
    Group(ConditionGroup),
}

impl Condition {
    /// Connector to the preceding condition.
    pub fn connector(&self) -> Connector {
        match self {
            Condition::Criterion(c) => c.connector,
            Condition::Group(g) => g.connector,
        }
    }

    pub fn criterion(
        connector: Connector,
        field: impl Into<FieldRef>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        Condition::Criterion(Criterion {
            field: field.into(),
            operator,
            value: value.into(),
            connector,
        })
    }

    pub fn group(connector: Connector, conditions: Vec<Condition>) -> Self {
        Condition::Group(ConditionGroup {
            conditions,
            connector,
        })
    }
}
