//! Response model and builders.
//!
//! Every response carries a JSON body and a `content-type: application/json`
//! header.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::StatusError;

/// API Gateway proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Response {
    fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self {
            status_code,
            body,
            headers,
        }
    }
}

/// Error body. `details` is left out entirely when absent.
#[derive(Debug, Serialize)]
struct ErrorMessage<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ErrorMessage<'_> {
    fn to_body(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// 200 with `value` serialized as the body.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized to JSON.
pub fn ok_json<T: Serialize + ?Sized>(value: &T) -> Result<Response, serde_json::Error> {
    Ok(Response::json(200, serde_json::to_string(value)?))
}

/// Rejected input: `{message, details}` with the error's own status.
#[must_use]
pub fn validation_error(error: &StatusError) -> Response {
    let body = ErrorMessage {
        message: &error.message,
        details: error.details.as_deref(),
    };
    Response::json(error.status, body.to_body())
}

/// Declared domain failure: `{message}` only, details stay server-side.
#[must_use]
pub fn domain_error(error: &StatusError) -> Response {
    let body = ErrorMessage {
        message: &error.message,
        details: None,
    };
    Response::json(error.status, body.to_body())
}

/// Fixed 500 response for anything uncontrolled.
#[must_use]
pub fn internal_error() -> Response {
    domain_error(&StatusError::internal())
}
