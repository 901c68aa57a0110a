//! apigw-handler - typed handlers behind AWS API Gateway proxy events.
//!
//! This crate wraps a business function so it can serve API Gateway proxy
//! events on AWS Lambda:
//! 1. The incoming event is turned into a raw request (params, body, query)
//! 2. A validator turns that into a typed request or a 400 response
//! 3. The business function runs with the typed request, a request id, the
//!    caller's identity and a per-request logger
//! 4. Its result becomes a JSON response; anything uncontrolled becomes a 500
//!
//! # Example
//!
//! ```no_run
//! use apigw_handler::api::{api_gateway, HandlerInput};
//! use apigw_handler::errors::{HandlerError, StatusError};
//! use apigw_handler::logging::Logger;
//! use apigw_handler::validation::{Request, Rules, Validator};
//! use serde::Deserialize;
//! use serde_json::{json, Value};
//!
//! #[derive(Deserialize)]
//! struct Greeting {
//!     name: String,
//! }
//!
//! async fn greet(
//!     input: HandlerInput<Request<Value, Greeting, Value>>,
//! ) -> Result<Value, HandlerError> {
//!     if input.data.body.name == "nobody" {
//!         return Err(StatusError::not_found().into());
//!     }
//!     Ok(json!({ "hello": input.data.body.name }))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     // Set up structured logging
//!     apigw_handler::setup_logging();
//!
//!     let validator = Validator::new().body(Rules::<Greeting>::new());
//!     let handler = api_gateway(Logger::new("greeter"), validator, greet);
//!     apigw_handler::api::run(handler).await
//! }
//! ```
// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod logging;
pub mod validation;

use crate::core::config::{AppConfig, LogFormat};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`). It
/// may be called more than once; only the first call installs a subscriber.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// apigw_handler::setup_logging();
/// ```
pub fn setup_logging() {
    setup_logging_with(&AppConfig::default());
}

/// Like [`setup_logging`], with the output format taken from `config`.
pub fn setup_logging_with(config: &AppConfig) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match config.log_format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_span_list(false);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
    };

    // A subscriber installed earlier (tests, a host binary) wins.
    let _ = result;
}
