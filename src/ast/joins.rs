use serde::{Deserialize, Serialize};

use crate::ast::{Connector, FieldRef, JoinKind, Operator, Query, Value};

/// A join definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    /// Filtered query on the joined side.
    pub query: Query,
    /// Explicit ON criteria. Derived from metadata when empty.
    #[serde(default)]
    pub criteria: Vec<JoinCriterion>,
    /// Filter restricted to the joined side, applied to the outer WHERE.
    #[serde(default)]
    pub extra_filter: Option<Query>,
}

impl Join {
    pub fn new(kind: JoinKind, query: Query) -> Self {
        Self {
            kind,
            query,
            criteria: Vec::new(),
            extra_filter: None,
        }
    }

    /// Add a `source.field <op> target.target_field` criterion.
    pub fn on(mut self, field: impl Into<FieldRef>, operator: Operator, target_field: impl Into<FieldRef>) -> Self {
        self.criteria.push(JoinCriterion::Regular {
            field: field.into(),
            operator,
            value: JoinValue::Field(target_field.into()),
            right: false,
            connector: Connector::And,
        });
        self
    }

    pub fn criterion(mut self, criterion: JoinCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn extra_filter(mut self, filter: Query) -> Self {
        self.extra_filter = Some(filter);
        self
    }
}

/// Right-hand operand of a regular join criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinValue {
    /// Field of the joined entity.
    Field(FieldRef),
    /// Bound parameter value.
    Value(Value),
    /// Subquery.
    Query(Box<Query>),
}

/// One ON-clause criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinCriterion {
    /// Field compared against a field, a value or a subquery.
    ///
    /// `right` flips the textual operand order of field-to-field criteria and
    /// resolves value/subquery criteria against the joined side.
    Regular {
        field: FieldRef,
        operator: Operator,
        value: JoinValue,
        #[serde(default)]
        right: bool,
        #[serde(default)]
        connector: Connector,
    },
    /// A whole condition tree evaluated against one side.
    Query {
        query: Box<Query>,
        #[serde(default)]
        right: bool,
        #[serde(default)]
        connector: Connector,
    },
}

impl JoinCriterion {
    pub fn connector(&self) -> Connector {
        match self {
            JoinCriterion::Regular { connector, .. } | JoinCriterion::Query { connector, .. } => *connector,
        }
    }

    /// Field-to-field equality used for derived criteria.
    pub fn field_equal(field: impl Into<FieldRef>, target_field: impl Into<FieldRef>) -> Self {
        JoinCriterion::Regular {
            field: field.into(),
            operator: Operator::Equal,
            value: JoinValue::Field(target_field.into()),
            right: false,
            connector: Connector::And,
        }
    }
}
