//! # querymill
//!
//! Translates abstract, dialect-independent query trees into SQL text plus
//! an ordered list of bound parameters.
//!
//! ## Quick Example
//!
//! ```
//! use querymill::prelude::*;
//!
//! let entities = EntityRegistry::new().register(
//!     "User",
//!     EntityDescriptor::new("users").key("Id").field("Age").field("Status"),
//! );
//! let translator = QueryTranslator::new(&entities, Dialect::MySql);
//!
//! let query = Query::new("User").greater_than("Age", 18).equal("Status", "A");
//! let translation = translator.translate(&query).unwrap();
//! assert_eq!(translation.condition, "TB.`Age` > @Age0 AND TB.`Status` = @Status1");
//! assert_eq!(translation.parameters.len(), 2);
//! ```
//!
//! ## What gets translated
//!
//! | Query part  | SQL                                               |
//! |-------------|---------------------------------------------------|
//! | conditions  | `a = @a0 AND (b LIKE @b1 OR c IS NULL)`           |
//! | joins       | `LEFT JOIN t AS TSB0 ON ...`                      |
//! | subqueries  | `a IN (SELECT ... LIMIT 0,5)`                     |
//! | combines    | `UNION SELECT ...`, EXCEPT/INTERSECT as joins     |
//! | recurse     | `WITH RECURSIVE RecurseTable0 AS (... UNION ALL ...)` |

pub mod ast;
pub mod config;
pub mod dialect;
pub mod error;
pub mod metadata;
pub mod translator;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::TranslatorConfig;
    pub use crate::dialect::{Dialect, SqlGenerator};
    pub use crate::error::*;
    pub use crate::metadata::{EntityDescriptor, EntityMetadata, EntityRegistry, FieldDescriptor};
    pub use crate::translator::{Parameters, QueryTranslator, Statement, Translation};
}

/// Translate `query` with the given metadata and dialect.
pub fn translate(
    query: &ast::Query,
    metadata: &dyn metadata::EntityMetadata,
    dialect: dialect::Dialect,
) -> error::TranslateResult<translator::Translation> {
    translator::QueryTranslator::new(metadata, dialect).translate(query)
}
