//! Abstract query model consumed by the translator.
//!
//! A [`Query`] is a tree: conditions may nest groups, criteria may carry
//! subqueries, and joins/combines carry further query nodes.

pub mod conditions;
pub mod joins;
pub mod operators;
pub mod query;
pub mod values;

pub use conditions::*;
pub use joins::*;
pub use operators::*;
pub use query::*;
pub use values::*;
