use pretty_assertions::assert_eq;

use super::support::registry;
use crate::prelude::*;

fn mysql(query: &Query) -> Statement {
    let entities = registry();
    QueryTranslator::new(&entities, Dialect::MySql).build_select(query).unwrap()
}

#[test]
fn test_select() {
    let query = Query::new("User")
        .select(["Id", "Name"])
        .equal("Status", "A")
        .order_by("Age", true)
        .take(10);
    assert_eq!(
        mysql(&query).sql,
        "SELECT TB.`Id`, TB.`user_name` AS `Name` FROM `users` AS TB WHERE TB.`Status` = @Status0 \
         ORDER BY TB.`Age` DESC LIMIT 0,10"
    );
}

#[test]
fn test_select_all_fields_with_object_name() {
    let query = Query::new("User").object_name("users_2024");
    assert_eq!(
        mysql(&query).sql,
        "SELECT TB.`Id`, TB.`user_name` AS `Name`, TB.`Age`, TB.`Status`, TB.`DeptId` FROM `users_2024` AS TB"
    );
}

#[test]
fn test_select_with_join() {
    let query = Query::new("User")
        .select(["Id"])
        .join_with(JoinKind::Inner, Query::new("Order").greater_than("Total", 5));
    assert_eq!(
        mysql(&query).sql,
        "SELECT TB.`Id` FROM `users` AS TB INNER JOIN `orders` AS TSB0 ON TB.`Id` = TSB0.`UserId` \
         WHERE TSB0.`Total` > @Total0"
    );
}

#[test]
fn test_select_union() {
    let query = Query::new("User")
        .select(["Id"])
        .equal("Status", "A")
        .combine(CombineKind::UnionAll, Query::new("User").equal("Status", "B"))
        .order_by("Id", false)
        .take(3);
    assert_eq!(
        mysql(&query).sql,
        "SELECT * FROM (SELECT TB.`Id` FROM `users` AS TB WHERE TB.`Status` = @Status0 \
         UNION ALL SELECT TSB0.`Id` FROM `users` AS TSB0 WHERE TSB0.`Status` = @Status1) AS TB \
         ORDER BY TB.`Id` ASC LIMIT 0,3"
    );
}

#[test]
fn test_select_union_sorts_on_exposed_names() {
    let query = Query::new("User")
        .select(["Id", "Name"])
        .combine(CombineKind::Union, Query::new("User"))
        .order_by("Name", false);
    assert_eq!(
        mysql(&query).sql,
        "SELECT * FROM (SELECT TB.`Id`, TB.`user_name` AS `Name` FROM `users` AS TB \
         UNION SELECT TSB0.`Id`, TSB0.`user_name` AS `Name` FROM `users` AS TSB0) AS TB \
         ORDER BY TB.`Name` ASC"
    );
}

#[test]
fn test_select_recursive() {
    let query = Query::new("Dept").equal("Id", 1).recurse("Id", "ParentId", RecurseDirection::Down);
    let statement = mysql(&query);
    assert!(statement.sql.starts_with("WITH RECURSIVE RecurseTable0 AS ("));
    assert!(statement.sql.ends_with(
        ") SELECT TB.`Id`, TB.`Name`, TB.`ParentId` FROM `departments` AS TB \
         WHERE TB.`Id` IN (SELECT RTT0.`Id` FROM RecurseTable0 AS RTT0)"
    ));
    assert_eq!(statement.parameters.names(), vec!["Id0"]);
}

#[test]
fn test_count() {
    let entities = registry();
    let translator = QueryTranslator::new(&entities, Dialect::MySql);
    let statement = translator
        .build_count(&Query::new("User").equal("Status", "A").take(10))
        .unwrap();
    assert_eq!(
        statement.sql,
        "SELECT COUNT(*) FROM `users` AS TB WHERE TB.`Status` = @Status0"
    );
    assert_eq!(statement.parameters.len(), 1);
}

#[test]
fn test_sqlite_select() {
    let entities = registry();
    let translator = QueryTranslator::new(&entities, Dialect::Sqlite);
    let statement = translator
        .build_select(&Query::new("Order").select(["Id", "Total"]).take(2))
        .unwrap();
    assert_eq!(statement.sql, "SELECT TB.\"Id\", TB.\"Total\" FROM \"orders\" AS TB LIMIT 0,2");
}
