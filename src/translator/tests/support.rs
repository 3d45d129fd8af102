//! Shared entity fixtures.

use crate::dialect::Dialect;
use crate::error::TranslateResult;
use crate::metadata::{EntityDescriptor, EntityRegistry, FieldDescriptor};
use crate::prelude::Query;
use crate::translator::{QueryTranslator, Translation};

/// `User` -> `Dept` and `Order` -> `User` relations; `Tag` has no key.
pub fn registry() -> EntityRegistry {
    EntityRegistry::new()
        .register(
            "User",
            EntityDescriptor::new("users")
                .key("Id")
                .mapped_field(FieldDescriptor::new("Name").column("user_name"))
                .field("Age")
                .field("Status")
                .field("DeptId")
                .relation("Dept", [("DeptId", "Id")]),
        )
        .register(
            "Dept",
            EntityDescriptor::new("departments")
                .key("Id")
                .field("Name")
                .field("ParentId"),
        )
        .register(
            "Order",
            EntityDescriptor::new("orders")
                .key("Id")
                .field("UserId")
                .field("Total")
                .field("Status")
                .relation("User", [("UserId", "Id")]),
        )
        .register("Tag", EntityDescriptor::new("tags").field("Name").field("Color"))
}

pub fn translate(query: &Query) -> TranslateResult<Translation> {
    let entities = registry();
    QueryTranslator::new(&entities, Dialect::MySql).translate(query)
}

pub fn translate_sqlite(query: &Query) -> TranslateResult<Translation> {
    let entities = registry();
    QueryTranslator::new(&entities, Dialect::Sqlite).translate(query)
}
