//! Integration tests for whitelist projection.

use loch::{allower, AllowList, Document};
use serde_json::{json, Value};

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn profile_list() -> AllowList {
    AllowList::new()
        .allow("name")
        .allow("email")
        .nested(
            "address",
            AllowList::new().allow("city").allow("country"),
        )
        .nested("pets", AllowList::new().allow("name"))
}

#[test]
fn test_projection_drops_unlisted_keys() {
    let clean = allower(profile_list());
    let body = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "isAdmin": true,
        "address": {"city": "London", "country": "UK", "secret": "x"},
        "pets": [{"name": "Tom", "chip": 123}]
    });

    assert_eq!(
        Value::Object(clean(&doc(body))),
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "address": {"city": "London", "country": "UK"},
            "pets": [{"name": "Tom"}]
        })
    );
}

#[test]
fn test_empty_input_gives_empty_output() {
    let clean = allower(profile_list());
    assert!(clean(&Document::new()).is_empty());
}

#[test]
fn test_empty_allow_list_drops_everything() {
    let clean = allower(AllowList::new());
    assert!(clean(&doc(json!({"a": 1, "b": {"c": 2}}))).is_empty());
}

#[test]
fn test_cleaning_is_idempotent() {
    let clean = allower(profile_list());
    let body = doc(json!({
        "name": "Ada",
        "role": "admin",
        "address": {"city": "London", "zip": "N1"},
        "pets": [{"name": "Tom", "age": 3}, "goldfish"]
    }));

    let once = clean(&body);
    let twice = clean(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_mapping_renames_key() {
    let clean = allower(AllowList::new().map("user_name", |value: &Value, _: &str| {
        let mut out = Document::new();
        out.insert("userName".to_string(), value.clone());
        out
    }));

    assert_eq!(
        Value::Object(clean(&doc(json!({"user_name": "ada", "other": 1})))),
        json!({"userName": "ada"})
    );
}

#[test]
fn test_mapping_fans_out() {
    let clean = allower(AllowList::new().map("range", |value: &Value, _: &str| {
        let mut out = Document::new();
        if let Some([from, to]) = value.as_array().map(Vec::as_slice) {
            out.insert("from".to_string(), from.clone());
            out.insert("to".to_string(), to.clone());
        }
        out
    }));

    assert_eq!(
        Value::Object(clean(&doc(json!({"range": [1, 9]})))),
        json!({"from": 1, "to": 9})
    );
    assert!(clean(&doc(json!({"range": "1-9"}))).is_empty());
}

#[test]
fn test_allower_reused_across_documents() {
    let clean = allower(AllowList::new().allow("id"));
    let outputs: Vec<Value> = (0..3)
        .map(|i| Value::Object(clean(&doc(json!({"id": i, "junk": i})))))
        .collect();
    assert_eq!(outputs, vec![json!({"id": 0}), json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn test_allow_list_from_json() {
    let list = AllowList::from_json(&json!({
        "name": null,
        "address": {"city": null}
    }))
    .unwrap();
    let clean = allower(list);

    assert_eq!(
        Value::Object(clean(&doc(json!({
            "name": "Ada",
            "address": {"city": "London", "street": "Baker"},
            "token": "abc"
        })))),
        json!({"name": "Ada", "address": {"city": "London"}})
    );
}

#[test]
fn test_input_left_intact() {
    let clean = allower(profile_list());
    let body = doc(json!({"name": "Ada", "isAdmin": true}));
    let snapshot = body.clone();
    let _ = clean(&body);
    assert_eq!(body, snapshot);
}
