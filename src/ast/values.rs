use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ast::Query;

/// A value bound to a criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// Text
    Text(String),
    /// Timestamp
    DateTime(DateTime<Utc>),
    /// List of values (IN / NOT IN)
    List(Vec<Value>),
    /// Nested query used as a predicate value
    Query(Box<Query>),
}

impl Value {
    /// Wrap the value with `%` wildcards for pattern operators.
    ///
    /// Scalars are rendered as text first; null, lists and queries are
    /// returned unchanged.
    pub fn with_wildcards(self, leading: bool, trailing: bool) -> Value {
        let text = match self {
            Value::Text(s) => s,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::DateTime(_) => self.to_string(),
            other => return other,
        };
        let lead = if leading { "%" } else { "" };
        let trail = if trailing { "%" } else { "" };
        Value::Text(format!("{}{}{}", lead, text, trail))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::DateTime(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Query(q) => write!(f, "(QUERY {})", q.entity),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::DateTime(d)
    }
}

impl From<Query> for Value {
    fn from(q: Query) -> Self {
        Value::Query(Box::new(q))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
