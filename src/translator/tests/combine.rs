//! Set combinations, native and rewritten.

use pretty_assertions::assert_eq;

use super::support::{translate, translate_sqlite};
use crate::prelude::*;

#[test]
fn test_union() {
    let query = Query::new("User")
        .select(["Id", "Name"])
        .equal("Status", "A")
        .combine(CombineKind::Union, Query::new("User").equal("Status", "B"));
    let translation = translate(&query).unwrap();
    assert_eq!(translation.condition, "TB.`Status` = @Status0");
    assert_eq!(
        translation.combine_script,
        "UNION SELECT TSB0.`Id`, TSB0.`user_name` AS `Name` FROM `users` AS TSB0 WHERE TSB0.`Status` = @Status1"
    );
}

#[test]
fn test_union_all() {
    let query = Query::new("User")
        .select(["Id"])
        .combine(CombineKind::UnionAll, Query::new("User"));
    let translation = translate(&query).unwrap();
    assert_eq!(translation.combine_script, "UNION ALL SELECT TSB0.`Id` FROM `users` AS TSB0");
}

#[test]
fn test_except_rewritten_as_left_join() {
    let query = Query::new("Order").combine(CombineKind::Except, Query::new("Order").equal("Status", "void"));
    let translation = translate(&query).unwrap();
    assert_eq!(translation.combine_script, "");
    assert_eq!(
        translation.join_script,
        "LEFT JOIN (SELECT TSB0.`Id` FROM `orders` AS TSB0 WHERE TSB0.`Status` = @Status0) AS TSB1 \
         ON TB.`Id` = TSB1.`Id`"
    );
    assert_eq!(translation.condition, "TSB1.`Id` IS NULL");
}

#[test]
fn test_except_keeps_base_conditions() {
    let query = Query::new("Order")
        .greater_than("Total", 10)
        .combine(CombineKind::Except, Query::new("Order"));
    let translation = translate(&query).unwrap();
    assert_eq!(
        translation.join_script,
        "LEFT JOIN (SELECT TSB0.`Id` FROM `orders` AS TSB0) AS TSB1 ON TB.`Id` = TSB1.`Id`"
    );
    assert_eq!(translation.condition, "TB.`Total` > @Total0 AND TSB1.`Id` IS NULL");
}

#[test]
fn test_except_branch_joins_stay_inside_derived_table() {
    let branch = Query::new("Order").join_with(JoinKind::Inner, Query::new("User").equal("Status", "x"));
    let query = Query::new("Order").combine(CombineKind::Except, branch);
    let translation = translate(&query).unwrap();
    assert_eq!(
        translation.join_script,
        "LEFT JOIN (SELECT TSB0.`Id` FROM `orders` AS TSB0 \
         INNER JOIN `users` AS TSB1 ON TSB0.`UserId` = TSB1.`Id` \
         WHERE TSB1.`Status` = @Status0) AS TSB2 ON TB.`Id` = TSB2.`Id`"
    );
    assert_eq!(translation.condition, "TSB2.`Id` IS NULL");
}

#[test]
fn test_except_raw_branch_stays_inside_derived_table() {
    let branch = Query::raw("Order", "TSB0.`Status` = 'void'", vec![]);
    let query = Query::new("Order").combine(CombineKind::Except, branch);
    let translation = translate(&query).unwrap();
    assert_eq!(
        translation.join_script,
        "LEFT JOIN (SELECT TSB0.`Id` FROM `orders` AS TSB0 WHERE TSB0.`Status` = 'void') AS TSB1 \
         ON TB.`Id` = TSB1.`Id`"
    );
    assert_eq!(translation.condition, "TSB1.`Id` IS NULL");
}

#[test]
fn test_intersect_rewritten_as_inner_join() {
    let query = Query::new("Order").equal("Total", 10).combine(
        CombineKind::Intersect,
        Query::new("Order").select(["UserId"]).equal("Status", "paid"),
    );
    let translation = translate(&query).unwrap();
    assert_eq!(
        translation.join_script,
        "INNER JOIN `orders` AS TSB0 ON TB.`UserId` = TSB0.`UserId`"
    );
    assert_eq!(translation.condition, "TB.`Total` = @Total0 AND TSB0.`Status` = @Status1");
}

#[test]
fn test_combine_fields_fall_back_to_all_fields() {
    let query = Query::new("Tag").combine(CombineKind::Intersect, Query::new("Tag"));
    let translation = translate(&query).unwrap();
    assert_eq!(
        translation.join_script,
        "INNER JOIN `tags` AS TSB0 ON TB.`Name` = TSB0.`Name` AND TB.`Color` = TSB0.`Color`"
    );
}

#[test]
fn test_sqlite_native_except() {
    let query = Query::new("Order")
        .select(["Id"])
        .combine(CombineKind::Except, Query::new("Order").equal("Status", "void"));
    let translation = translate_sqlite(&query).unwrap();
    assert_eq!(translation.join_script, "");
    assert_eq!(
        translation.combine_script,
        "EXCEPT SELECT TSB0.\"Id\" FROM \"orders\" AS TSB0 WHERE TSB0.\"Status\" = @Status0"
    );
}

#[test]
fn test_combine_aliases_are_unique() {
    let query = Query::new("User")
        .select(["Id"])
        .combine(CombineKind::Union, Query::new("User").equal("Status", "B"))
        .combine(CombineKind::Union, Query::new("User").equal("Status", "C"));
    let translation = translate(&query).unwrap();
    assert_eq!(
        translation.combine_script,
        "UNION SELECT TSB0.`Id` FROM `users` AS TSB0 WHERE TSB0.`Status` = @Status0 \
         UNION SELECT TSB1.`Id` FROM `users` AS TSB1 WHERE TSB1.`Status` = @Status1"
    );
}
