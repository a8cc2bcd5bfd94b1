mod common;

use common::{app, context};
use join_query::{GroupBy, Hook, JoinQueryError};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn transforms_group_by() {
    let mut ctx = context(json!({ "service": "users", "params": { "query": { "$groupBy": "team" } } }));

    GroupBy.run(&mut ctx).unwrap();

    assert_eq!(
        serde_json::to_value(&ctx.params).unwrap(),
        json!({ "query": {}, "sequelize": { "group": ["team"] } })
    );
}

#[test]
fn rejects_non_string_values_without_mutating() {
    let values = [
        json!(1),
        json!(-1),
        json!(0),
        json!(1.5),
        json!(null),
        json!(true),
        json!(false),
        json!({}),
        json!([]),
        json!(["teamId"]),
    ];

    for value in values {
        let mut ctx = context(json!({ "service": "users", "params": { "query": { "$groupBy": value } } }));
        let before = ctx.clone();

        let err = GroupBy.run(&mut ctx).unwrap_err();

        assert!(matches!(err, JoinQueryError::InvalidArgument { .. }), "{value}");
        assert_eq!(err.to_string(), "$groupBy must be a string");
        assert!(err.is_client_error());
        assert_eq!(ctx, before, "{value}");
    }
}

#[test]
fn absent_key_is_a_no_op() {
    for value in [
        json!({ "service": "users", "params": { "query": { "name": "x" } } }),
        json!({ "service": "users", "params": {} }),
        json!({ "service": "users" }),
    ] {
        let mut ctx = context(value);
        let before = ctx.clone();

        GroupBy.run(&mut ctx).unwrap();

        assert_eq!(ctx, before);
    }
}

#[test]
fn empty_string_is_accepted() {
    let mut ctx = context(json!({ "service": "users", "params": { "query": { "$groupBy": "" } } }));

    GroupBy.run(&mut ctx).unwrap();

    assert_eq!(ctx.params.group(), Some(&[String::new()][..]));
    assert_eq!(ctx.params.query, Some(Default::default()));
}

#[test]
fn group_by_then_join_query() {
    let app = app();
    let mut ctx = context(json!({
        "service": "users",
        "params": { "query": { "$groupBy": "teamId", "team.name": "team1" } }
    }));

    app.group_by().run(&mut ctx).unwrap();
    app.join_query().run(&mut ctx).unwrap();

    assert_eq!(
        serde_json::to_value(&ctx.params).unwrap(),
        json!({
            "query": { "$team.name$": "team1" },
            "sequelize": {
                "include": [{ "model": "teams", "as": "team", "attributes": [] }],
                "group": ["teamId"]
            }
        })
    );
}
