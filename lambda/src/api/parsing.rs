use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use super::event::ProxyEvent;
use crate::validation::RawRequest;

/// Build the raw request triple from a gateway event.
///
/// Missing parts become empty objects. The body is parsed as JSON; anything
/// that doesn't parse is treated as an empty object rather than an error.
pub fn raw_request(event: &ProxyEvent) -> RawRequest {
    RawRequest::new(
        string_map(event.path_parameters.as_ref()),
        parse_body(event.body.as_deref(), event.is_base64_encoded.unwrap_or(false)),
        string_map(event.query_string_parameters.as_ref()),
    )
}

pub fn parse_body(body: Option<&str>, is_base64: bool) -> Value {
    let Some(body) = body else {
        return empty_object();
    };

    let parsed = if is_base64 {
        STANDARD
            .decode(body)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
    } else {
        serde_json::from_str::<Value>(body).ok()
    };

    match parsed {
        Some(Value::Null) | None => empty_object(),
        Some(v) => v,
    }
}

pub fn string_map(map: Option<&HashMap<String, String>>) -> Value {
    map.map_or_else(empty_object, |m| {
        Value::Object(
            m.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    })
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
