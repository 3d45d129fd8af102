//! Queries embedded as criterion values.

use pretty_assertions::assert_eq;

use super::support::translate;
use crate::prelude::*;

#[test]
fn test_membership_without_cap() {
    let departments = Query::new("Dept").select(["Id"]).equal("Name", "R&D");
    let translation = translate(&Query::new("User").is_in("DeptId", departments)).unwrap();
    assert_eq!(
        translation.condition,
        "TB.`DeptId` IN (SELECT TSB0.`Id` FROM `departments` AS TSB0 WHERE TSB0.`Name` = @Name0)"
    );
}

#[test]
fn test_comparison_takes_one_row() {
    let first = Query::new("Dept").select(["Id"]).order_by("Name", false);
    let translation = translate(&Query::new("User").equal("DeptId", first)).unwrap();
    assert_eq!(
        translation.condition,
        "TB.`DeptId` = (SELECT TSB0.`Id` FROM `departments` AS TSB0 ORDER BY TSB0.`Name` ASC LIMIT 0,1)"
    );
}

#[test]
fn test_membership_cap_is_wrapped() {
    let departments = Query::new("Dept").select(["Id"]).take(5);
    let translation = translate(&Query::new("User").is_in("DeptId", departments)).unwrap();
    assert_eq!(
        translation.condition,
        "TB.`DeptId` IN (SELECT `Id` FROM (SELECT TSB0.`Id` FROM `departments` AS TSB0 LIMIT 0,5) AS STSB0)"
    );
}

#[test]
fn test_capped_union_subquery() {
    let departments = Query::new("Dept")
        .select(["Id"])
        .equal("Name", "a")
        .combine(CombineKind::Union, Query::new("Dept").equal("Name", "b"))
        .take(5);
    let translation = translate(&Query::new("User").is_in("DeptId", departments)).unwrap();
    assert_eq!(
        translation.condition,
        "TB.`DeptId` IN (SELECT `Id` FROM (SELECT TSB0.`Id` FROM (SELECT TSB0.`Id` FROM `departments` AS TSB0 \
         WHERE TSB0.`Name` = @Name0 UNION SELECT TSB1.`Id` FROM `departments` AS TSB1 \
         WHERE TSB1.`Name` = @Name1) AS TSB0 LIMIT 0,5) AS STSB0)"
    );
    assert_eq!(translation.parameters.names(), vec!["Name0", "Name1"]);
}

#[test]
fn test_combined_subquery_sorts_on_exposed_names() {
    let names = Query::new("User")
        .select(["Name"])
        .combine(CombineKind::Union, Query::new("User"))
        .order_by("Name", false);
    let translation = translate(&Query::new("User").equal("Name", names)).unwrap();
    assert_eq!(
        translation.condition,
        "TB.`user_name` = (SELECT TSB0.`Name` FROM (SELECT TSB0.`user_name` AS `Name` FROM `users` AS TSB0 \
         UNION SELECT TSB1.`user_name` AS `Name` FROM `users` AS TSB1) AS TSB0 ORDER BY TSB0.`Name` ASC LIMIT 0,1)"
    );
}

#[test]
fn test_subquery_without_fields() {
    let err = translate(&Query::new("User").is_in("DeptId", Query::new("Dept"))).unwrap_err();
    assert!(matches!(err, TranslateError::MissingQueryFields { entity } if entity == "Dept"));
}

#[test]
fn test_subquery_parameters_share_the_counter() {
    let query = Query::new("User")
        .equal("Status", "A")
        .not_in("DeptId", Query::new("Dept").select(["Id"]).equal("Name", "x"))
        .greater_than("Age", 3);
    let translation = translate(&query).unwrap();
    assert_eq!(translation.parameters.names(), vec!["Status0", "Name1", "Age2"]);
}
