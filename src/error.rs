//! Error types for querymill.

use crate::ast::CombineKind;
use thiserror::Error;

/// The main error type for translation and configuration.
///
/// Every variant is fatal: a translation either succeeds completely or
/// aborts with one of these.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The metadata service does not know the entity.
    #[error("Unknown entity: '{0}'")]
    UnknownEntity(String),

    /// The entity has no field with this logical name.
    #[error("Unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: String, field: String },

    /// A join has no explicit criteria and none can be derived.
    #[error("No relation key between {source_entity} and {target_entity}")]
    MissingRelation {
        source_entity: String,
        target_entity: String,
    },

    /// A query used as a predicate value declares no query fields.
    #[error("The {entity} query used as a subquery must select at least one query field")]
    MissingQueryFields { entity: String },

    /// The dialect cannot express this combine kind.
    #[error("{dialect} does not support {kind} combines")]
    UnsupportedCombine {
        dialect: &'static str,
        kind: CombineKind,
    },

    /// The dialect has no rendering for this field conversion.
    #[error("{dialect} does not support field conversion '{conversion}'")]
    UnsupportedConversion {
        dialect: &'static str,
        conversion: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed TOML configuration.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranslateError {
    /// Create an unknown field error.
    pub fn unknown_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Create a missing relation error.
    pub fn missing_relation(source_entity: &str, target_entity: &str) -> Self {
        Self::MissingRelation {
            source_entity: source_entity.to_string(),
            target_entity: target_entity.to_string(),
        }
    }
}

/// Result type alias for querymill operations.
pub type TranslateResult<T> = Result<T, TranslateError>;
