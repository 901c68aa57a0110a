use apigw_handler::validation::{
    NoValidation, PartSchema, RawRequest, Request, Rules, Unchecked, Validate, Validator,
};
use apigw_handler::errors::StatusError;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    name: String,
    #[serde(default)]
    quantity: u32,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ItemPath {
    id: u64,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct Paging {
    #[serde(default)]
    limit: Option<u32>,
}

fn raw(params: Value, body: Value, query: Value) -> RawRequest {
    RawRequest::new(params, body, query)
}

#[test]
fn test_unchecked_parts_pass_unchanged() {
    let validator = Validator::new();
    let input = raw(json!({ "x": [1, 2] }), json!("anything"), json!(null));

    let out = validator.validate(input.clone()).unwrap();
    assert_eq!(out, input);
}

#[test]
fn test_no_validation_accepts_everything() {
    let input = raw(json!(1), json!({ "deep": { "a": true } }), json!([]));
    assert_eq!(NoValidation.validate(input.clone()).unwrap(), input);
}

#[test]
fn test_declared_body_is_typed_and_defaulted() {
    let validator = Validator::new().body(Rules::<Item>::new());

    let out = validator
        .validate(raw(json!({}), json!({ "name": "apple" }), json!({ "q": "1" })))
        .unwrap();

    assert_eq!(
        out.body,
        Item {
            name: "apple".to_string(),
            quantity: 0
        }
    );
    // undeclared parts untouched
    assert_eq!(out.params, json!({}));
    assert_eq!(out.query, json!({ "q": "1" }));
}

#[test]
fn test_body_failure_is_bad_request_with_details() {
    let validator = Validator::new().body(Rules::<Item>::new());

    let err = validator
        .validate(raw(json!({}), json!({ "quantity": 3 }), json!({})))
        .unwrap_err();

    assert_eq!(err.status, 400);
    assert_eq!(err.message, "Bad Request");
    let details = err.details.unwrap();
    assert!(details.starts_with("body: "), "details: {details}");
    assert!(details.contains("missing field `name`"), "details: {details}");
}

#[test]
fn test_body_checked_before_params_and_query() {
    let validator = Validator::new()
        .params(Rules::<ItemPath>::new())
        .body(Rules::<Item>::new())
        .query(Rules::<Paging>::new());

    // all three parts are invalid; only the body error surfaces
    let err = validator
        .validate(raw(json!({}), json!({}), json!({ "bogus": 1 })))
        .unwrap_err();
    assert!(err.details.unwrap().starts_with("body: "));

    // body ok, params and query invalid; params comes next
    let err = validator
        .validate(raw(json!({}), json!({ "name": "a" }), json!({ "bogus": 1 })))
        .unwrap_err();
    assert!(err.details.unwrap().starts_with("params: "));

    // only query invalid
    let err = validator
        .validate(raw(json!({ "id": 9 }), json!({ "name": "a" }), json!({ "bogus": 1 })))
        .unwrap_err();
    let details = err.details.unwrap();
    assert!(details.starts_with("query: "));
    assert!(details.contains("unknown field `bogus`"), "details: {details}");
}

#[test]
fn test_path_strings_are_converted_by_default() {
    let validator = Validator::new().params(Rules::<ItemPath>::new());
    let out = validator
        .validate(raw(json!({ "id": "42" }), json!({}), json!({})))
        .unwrap();
    assert_eq!(out.params, ItemPath { id: 42 });

    let strict = Validator::new().params(Rules::<ItemPath>::new().strict());
    let err = strict
        .validate(raw(json!({ "id": "42" }), json!({}), json!({})))
        .unwrap_err();
    assert!(err.details.unwrap().starts_with("params: invalid type"));
}

#[test]
fn test_failed_conversion_reports_original_error() {
    let validator = Validator::new().params(Rules::<ItemPath>::new());
    let err = validator
        .validate(raw(json!({ "id": "forty-two" }), json!({}), json!({})))
        .unwrap_err();
    assert!(err.details.unwrap().contains("invalid type"));
}

#[test]
fn test_conversion_keeps_string_fields_intact() {
    #[derive(Debug, Deserialize)]
    struct Code {
        code: String,
    }

    let validator = Validator::new().query(Rules::<Code>::new());
    let out = validator
        .validate(raw(json!({}), json!({}), json!({ "code": "007" })))
        .unwrap();
    assert_eq!(out.query.code, "007");
}

#[test]
fn test_undeclared_keys_are_rejected_by_default() {
    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    let validator = Validator::new().body(Rules::<Named>::new());
    let err = validator
        .validate(raw(json!({}), json!({ "name": "a", "extra": 1 }), json!({})))
        .unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.details.as_deref(), Some("body: unknown field `extra`"));

    let lenient = Validator::new().body(Rules::<Named>::new().allow_unknown());
    let out = lenient
        .validate(raw(json!({}), json!({ "name": "a", "extra": 1 }), json!({})))
        .unwrap();
    assert_eq!(out.body.name, "a");
}

#[test]
fn test_undeclared_nested_keys_are_rejected() {
    #[derive(Debug, Deserialize)]
    struct Inner {
        #[allow(dead_code)]
        x: u8,
    }
    #[derive(Debug, Deserialize)]
    struct Outer {
        #[allow(dead_code)]
        inner: Inner,
    }

    let err = Rules::<Outer>::new()
        .apply(json!({ "inner": { "x": 1, "y": 2 } }))
        .unwrap_err();
    assert_eq!(err, "unknown field `inner.y`");
}

#[test]
fn test_checks_run_in_order_after_deserialize() {
    let rules = Rules::<Item>::new()
        .check(|i| {
            if i.name.is_empty() {
                Err("name must not be empty".to_string())
            } else {
                Ok(())
            }
        })
        .check(|i| {
            if i.quantity > 10 {
                Err("quantity must be at most 10".to_string())
            } else {
                Ok(())
            }
        });

    assert_eq!(
        rules.apply(json!({ "name": "", "quantity": 99 })),
        Err("name must not be empty".to_string())
    );
    assert_eq!(
        rules.apply(json!({ "name": "x", "quantity": 99 })),
        Err("quantity must be at most 10".to_string())
    );
    assert!(rules.apply(json!({ "name": "x", "quantity": 2 })).is_ok());
}

#[test]
fn test_unchecked_schema_returns_value() {
    assert_eq!(Unchecked.apply(json!([1, "a"])), Ok(json!([1, "a"])));
}

#[test]
fn test_closure_validator() {
    let only_get = |r: RawRequest| -> Result<Request<Value, String, Value>, StatusError> {
        match r.body.as_str() {
            Some(s) => Ok(Request::new(r.params, s.to_string(), r.query)),
            None => Err(StatusError::bad_request().with_details("body must be a string")),
        }
    };

    let out = only_get
        .validate(raw(json!({}), json!("hello"), json!({})))
        .unwrap();
    assert_eq!(out.body, "hello");

    let err = only_get.validate(raw(json!({}), json!(1), json!({}))).unwrap_err();
    assert_eq!(err.details.as_deref(), Some("body must be a string"));
}
