use serde::{Deserialize, Serialize};

/// Comparison operator of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    /// `%value%`
    Like,
    NotLike,
    /// `value%`
    BeginsWith,
    NotBeginsWith,
    /// `%value`
    EndsWith,
    NotEndsWith,
    IsNull,
    IsNotNull,
}

impl Operator {
    /// SQL symbol emitted for this operator.
    ///
    /// Pattern operators all degrade to plain `LIKE` / `NOT LIKE`; the
    /// wildcard placement lives in the bound value.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Like | Operator::BeginsWith | Operator::EndsWith => "LIKE",
            Operator::NotLike | Operator::NotBeginsWith | Operator::NotEndsWith => "NOT LIKE",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Whether the operator binds a value (null tests do not).
    pub fn needs_value(self) -> bool {
        !matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// Set-membership operators may carry a multi-row subquery.
    pub fn is_membership(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Wildcard placement for pattern operators: `(leading, trailing)`.
    pub fn wildcards(self) -> Option<(bool, bool)> {
        match self {
            Operator::Like | Operator::NotLike => Some((true, true)),
            Operator::BeginsWith | Operator::NotBeginsWith => Some((false, true)),
            Operator::EndsWith | Operator::NotEndsWith => Some((true, false)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Logical connector between a condition and its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    pub fn keyword(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// Set operation between two query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineKind {
    Union,
    UnionAll,
    Except,
    Intersect,
}

impl std::fmt::Display for CombineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombineKind::Union => write!(f, "UNION"),
            CombineKind::UnionAll => write!(f, "UNION ALL"),
            CombineKind::Except => write!(f, "EXCEPT"),
            CombineKind::Intersect => write!(f, "INTERSECT"),
        }
    }
}

/// Traversal direction of a self-referential hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurseDirection {
    /// Toward ancestors.
    Up,
    /// Toward descendants.
    Down,
}
