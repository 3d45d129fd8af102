//! End-to-end translation through the public API: TOML metadata, JSON query.

use pretty_assertions::assert_eq;
use querymill::prelude::*;

const CONFIG: &str = r#"
dialect = "mysql"

[entities.User]
table = "users"
primary_keys = ["Id"]
fields = [{ name = "Id" }, { name = "Name", column = "user_name" }, { name = "Age" }, { name = "Status" }]

[entities.Order]
table = "orders"
primary_keys = ["Id"]
fields = [{ name = "Id" }, { name = "UserId" }, { name = "Total" }, { name = "Note", queryable = false }]
relations = [{ target = "User", pairs = [["UserId", "Id"]] }]
"#;

const QUERY: &str = r#"
{
  "entity": "User",
  "conditions": [
    { "Criterion": { "field": { "name": "Age" }, "operator": "GreaterThan", "value": { "Int": 18 } } },
    { "Criterion": { "field": { "name": "Status" }, "operator": "Equal", "value": { "Text": "A" } } }
  ],
  "joins": [
    {
      "kind": "Left",
      "query": {
        "entity": "Order",
        "conditions": [
          { "Criterion": { "field": { "name": "Total" }, "operator": "GreaterThan", "value": { "Float": 5.5 } } }
        ]
      }
    }
  ],
  "sorts": [{ "field": { "name": "Name" }, "desc": true }],
  "query_fields": ["Id", "Name"],
  "size": 20
}
"#;

fn setup() -> (TranslatorConfig, Query) {
    let config = TranslatorConfig::from_toml(CONFIG).unwrap();
    let query: Query = serde_json::from_str(QUERY).unwrap();
    (config, query)
}

#[test]
fn test_translate_from_json() {
    let (config, query) = setup();
    let translation = querymill::translate(&query, &config.entities, config.dialect).unwrap();

    assert_eq!(
        translation.condition,
        "TB.`Age` > @Age0 AND TB.`Status` = @Status1 AND TSB0.`Total` > @Total2"
    );
    assert_eq!(translation.sort, "TB.`user_name` DESC");
    assert_eq!(translation.joins(), "LEFT JOIN `orders` AS TSB0 ON TB.`Id` = TSB0.`UserId`");
    assert_eq!(translation.parameters.get("Total2"), Some(&Value::Float(5.5)));
}

#[test]
fn test_build_select_from_json() {
    let (config, query) = setup();
    let translator = QueryTranslator::new(&config.entities, config.dialect);
    let statement = translator.build_select(&query).unwrap();
    assert_eq!(
        statement.sql,
        "SELECT TB.`Id`, TB.`user_name` AS `Name` FROM `users` AS TB \
         LEFT JOIN `orders` AS TSB0 ON TB.`Id` = TSB0.`UserId` \
         WHERE TB.`Age` > @Age0 AND TB.`Status` = @Status1 AND TSB0.`Total` > @Total2 \
         ORDER BY TB.`user_name` DESC LIMIT 0,20"
    );
    assert_eq!(statement.parameters.names(), vec!["Age0", "Status1", "Total2"]);
}

#[test]
fn test_translation_serializes_parameters_in_order() {
    let (config, query) = setup();
    let translation = querymill::translate(&query, &config.entities, config.dialect).unwrap();
    assert_eq!(
        serde_json::to_string(&translation.parameters).unwrap(),
        r#"{"Age0":{"Int":18},"Status1":{"Text":"A"},"Total2":{"Float":5.5}}"#
    );
    let json = serde_json::to_value(&translation).unwrap();
    assert_eq!(json["allow_join"], serde_json::Value::Bool(true));

    let reversed = Query::new("User").equal("Status", "B").greater_than("Age", 1);
    let translation = querymill::translate(&reversed, &config.entities, config.dialect).unwrap();
    assert_eq!(
        serde_json::to_string(&translation.parameters).unwrap(),
        r#"{"Status0":{"Text":"B"},"Age1":{"Int":1}}"#
    );
}

#[test]
fn test_non_queryable_fields_are_not_selected() {
    let (config, _) = setup();
    let translator = QueryTranslator::new(&config.entities, Dialect::Sqlite);
    let statement = translator.build_select(&Query::new("Order")).unwrap();
    assert_eq!(
        statement.sql,
        "SELECT TB.\"Id\", TB.\"UserId\", TB.\"Total\" FROM \"orders\" AS TB"
    );
}

#[test]
fn test_dialect_override() {
    let (config, query) = setup();
    let translation = querymill::translate(&query, &config.entities, Dialect::Sqlite).unwrap();
    assert_eq!(translation.joins(), "LEFT JOIN \"orders\" AS TSB0 ON TB.\"Id\" = TSB0.\"UserId\"");
}
