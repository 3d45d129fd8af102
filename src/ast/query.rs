//! The query node and its builder methods.

use serde::{Deserialize, Serialize};

use crate::ast::{
    CombineKind, Condition, Connector, FieldRef, Join, JoinKind, Operator, RecurseDirection, Value,
};

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    pub field: FieldRef,
    #[serde(default)]
    pub desc: bool,
}

/// A set operation against another query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combine {
    pub kind: CombineKind,
    pub query: Query,
}

/// Hierarchy traversal over a self-referential relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurse {
    /// Field identifying a row (e.g. `Id`).
    pub data_field: String,
    /// Field pointing at the related row (e.g. `ParentId`).
    pub relation_field: String,
    pub direction: RecurseDirection,
}

/// Raw condition text with its own parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawText {
    pub text: String,
    #[serde(default)]
    pub parameters: Vec<(String, Value)>,
}

/// An abstract, dialect-independent query over one entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    /// Logical entity name resolved through the metadata service.
    pub entity: String,
    /// Overrides the entity's physical object name.
    #[serde(default)]
    pub object_name: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub sorts: Vec<SortEntry>,
    #[serde(default)]
    pub joins: Vec<Join>,
    #[serde(default)]
    pub combines: Vec<Combine>,
    #[serde(default)]
    pub recurse: Option<Recurse>,
    /// Logical fields to select. Empty means every queryable field.
    #[serde(default)]
    pub query_fields: Vec<String>,
    /// Result-row cap. Zero means uncapped.
    #[serde(default)]
    pub size: usize,
    /// When set, the node is raw text and structured parts are ignored.
    #[serde(default)]
    pub text: Option<RawText>,
}

impl Query {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Default::default()
        }
    }

    /// A raw-text node.
    pub fn raw(entity: impl Into<String>, text: impl Into<String>, parameters: Vec<(String, Value)>) -> Self {
        Self {
            entity: entity.into(),
            text: Some(RawText {
                text: text.into(),
                parameters,
            }),
            ..Default::default()
        }
    }

    pub fn is_raw(&self) -> bool {
        self.text.is_some()
    }

    /// Append a criterion joined with AND.
    pub fn filter(self, field: impl Into<FieldRef>, operator: Operator, value: impl Into<Value>) -> Self {
        self.condition(Condition::criterion(Connector::And, field, operator, value))
    }

    /// Append a criterion joined with OR.
    pub fn or_filter(self, field: impl Into<FieldRef>, operator: Operator, value: impl Into<Value>) -> Self {
        self.condition(Condition::criterion(Connector::Or, field, operator, value))
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn equal(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::Equal, value)
    }

    pub fn not_equal(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::NotEqual, value)
    }

    pub fn greater_than(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::GreaterThan, value)
    }

    pub fn less_than(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::LessThan, value)
    }

    pub fn is_in(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::In, value)
    }

    pub fn not_in(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::NotIn, value)
    }

    pub fn like(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::Like, value)
    }

    pub fn begins_with(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::BeginsWith, value)
    }

    pub fn ends_with(self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.filter(field, Operator::EndsWith, value)
    }

    pub fn is_null(self, field: impl Into<FieldRef>) -> Self {
        self.filter(field, Operator::IsNull, Value::Null)
    }

    pub fn is_not_null(self, field: impl Into<FieldRef>) -> Self {
        self.filter(field, Operator::IsNotNull, Value::Null)
    }

    /// Append a parenthesized group joined with AND.
    pub fn and_group(self, conditions: Vec<Condition>) -> Self {
        self.condition(Condition::group(Connector::And, conditions))
    }

    /// Append a parenthesized group joined with OR.
    pub fn or_group(self, conditions: Vec<Condition>) -> Self {
        self.condition(Condition::group(Connector::Or, conditions))
    }

    pub fn order_by(mut self, field: impl Into<FieldRef>, desc: bool) -> Self {
        self.sorts.push(SortEntry {
            field: field.into(),
            desc,
        });
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Join with criteria derived from metadata.
    pub fn join_with(self, kind: JoinKind, query: Query) -> Self {
        self.join(Join::new(kind, query))
    }

    pub fn combine(mut self, kind: CombineKind, query: Query) -> Self {
        self.combines.push(Combine { kind, query });
        self
    }

    pub fn recurse(
        mut self,
        data_field: impl Into<String>,
        relation_field: impl Into<String>,
        direction: RecurseDirection,
    ) -> Self {
        self.recurse = Some(Recurse {
            data_field: data_field.into(),
            relation_field: relation_field.into(),
            direction,
        });
        self
    }

    /// Set the logical fields to select.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Cap the number of result rows.
    pub fn take(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }
}
