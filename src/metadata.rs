//! Entity metadata lookup.
//!
//! The translator never hard-codes table or column names: every logical
//! name goes through [`EntityMetadata`]. [`EntityRegistry`] is the in-memory
//! implementation, usually loaded from the `[entities]` table of the config.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{TranslateError, TranslateResult};

/// Metadata service consulted during translation.
pub trait EntityMetadata {
    /// Physical object (table) name of the entity.
    fn object_name(&self, entity: &str) -> TranslateResult<String>;
    /// Physical column name of a logical field.
    fn resolve_field(&self, entity: &str, field: &str) -> TranslateResult<String>;
    /// Primary key fields, in declaration order.
    fn primary_keys(&self, entity: &str) -> Vec<String>;
    /// Field pairs `(source_field, target_field)` relating two entities.
    fn relation_fields(&self, source: &str, target: &str) -> Vec<(String, String)>;
    /// Fields selected when a query declares none.
    fn query_fields(&self, entity: &str) -> Vec<String>;
}

fn default_queryable() -> bool {
    true
}

/// A mapped field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Physical column. Defaults to the logical name.
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default = "default_queryable")]
    pub queryable: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            queryable: true,
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

/// A declared relation to another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub target: String,
    /// `(this_field, target_field)` pairs.
    pub pairs: Vec<(String, String)>,
}

/// Everything known about one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub table: String,
    #[serde(default)]
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,
}

impl EntityDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_keys: Vec::new(),
            fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Add a field whose column equals its name.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor::new(name));
        self
    }

    pub fn mapped_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a field and mark it as part of the primary key.
    pub fn key(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.primary_keys.push(name.clone());
        self.fields.push(FieldDescriptor::new(name));
        self
    }

    pub fn relation<I, A, B>(mut self, target: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        self.relations.push(RelationDescriptor {
            target: target.into(),
            pairs: pairs.into_iter().map(|(a, b)| (a.into(), b.into())).collect(),
        });
        self
    }
}

/// In-memory metadata keyed by entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRegistry {
    entities: HashMap<String, EntityDescriptor>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, name: impl Into<String>, entity: EntityDescriptor) -> Self {
        self.entities.insert(name.into(), entity);
        self
    }

    pub fn get(&self, entity: &str) -> TranslateResult<&EntityDescriptor> {
        self.entities
            .get(entity)
            .ok_or_else(|| TranslateError::UnknownEntity(entity.to_string()))
    }

    /// Entity names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityMetadata for EntityRegistry {
    fn object_name(&self, entity: &str) -> TranslateResult<String> {
        Ok(self.get(entity)?.table.clone())
    }

    fn resolve_field(&self, entity: &str, field: &str) -> TranslateResult<String> {
        self.get(entity)?
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.column_name().to_string())
            .ok_or_else(|| TranslateError::unknown_field(entity, field))
    }

    fn primary_keys(&self, entity: &str) -> Vec<String> {
        self.entities
            .get(entity)
            .map(|e| e.primary_keys.clone())
            .unwrap_or_default()
    }

    fn relation_fields(&self, source: &str, target: &str) -> Vec<(String, String)> {
        let declared = |from: &str, to: &str| {
            self.entities
                .get(from)
                .and_then(|e| e.relations.iter().find(|r| r.target == to))
                .map(|r| r.pairs.clone())
        };
        if let Some(pairs) = declared(source, target) {
            return pairs;
        }
        // Fall back to the reverse declaration
        declared(target, source)
            .map(|pairs| pairs.into_iter().map(|(a, b)| (b, a)).collect())
            .unwrap_or_default()
    }

    fn query_fields(&self, entity: &str) -> Vec<String> {
        self.entities
            .get(entity)
            .map(|e| {
                e.fields
                    .iter()
                    .filter(|f| f.queryable)
                    .map(|f| f.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
