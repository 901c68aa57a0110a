//! API Gateway handler adapter.
//!
//! Binds a [`Validate`] implementation and a business function into one entry
//! point. Each invocation:
//! - derives a per-request [`Logger`]
//! - builds and validates the raw request (rejections return early)
//! - runs validation and the business function inside a panic boundary
//! - maps the outcome to exactly one [`Response`]

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde::Serialize;

use super::event::ProxyEvent;
use super::helpers::{self, Response};
use super::parsing;
use crate::errors::HandlerError;
use crate::logging::Logger;
use crate::validation::Validate;

/// What the business function receives.
#[derive(Debug, Clone)]
pub struct HandlerInput<T> {
    pub user_id: Option<String>,
    pub request_id: String,
    pub logger: Logger,
    pub data: T,
}

pub struct ApiGatewayHandler<V, F> {
    logger: Logger,
    validator: Arc<V>,
    func: Arc<F>,
}

impl<V, F> Clone for ApiGatewayHandler<V, F> {
    fn clone(&self) -> Self {
        Self {
            logger: self.logger.clone(),
            validator: Arc::clone(&self.validator),
            func: Arc::clone(&self.func),
        }
    }
}

/// Wrap `func` so it can serve API Gateway proxy events.
pub fn api_gateway<V, F, Fut, T>(logger: Logger, validator: V, func: F) -> ApiGatewayHandler<V, F>
where
    V: Validate,
    F: Fn(HandlerInput<V::Output>) -> Fut,
    Fut: Future<Output = Result<T, HandlerError>>,
    T: Serialize,
{
    ApiGatewayHandler {
        logger,
        validator: Arc::new(validator),
        func: Arc::new(func),
    }
}

impl<V, F, Fut, T> ApiGatewayHandler<V, F>
where
    V: Validate,
    F: Fn(HandlerInput<V::Output>) -> Fut,
    Fut: Future<Output = Result<T, HandlerError>>,
    T: Serialize,
{
    /// Handle one event. Never fails: every path yields a response.
    pub async fn handle(&self, event: ProxyEvent) -> Response {
        let logger = self.logger.child(event.trace_id());

        let raw = parsing::raw_request(&event);
        let validated =
            std::panic::catch_unwind(AssertUnwindSafe(|| self.validator.validate(raw)));

        let data = match validated {
            Ok(Ok(data)) => data,
            Ok(Err(e)) => {
                logger.info(&format!(
                    "Request rejected: {}",
                    e.details.as_deref().unwrap_or(&e.message)
                ));
                return helpers::validation_error(&e);
            }
            Err(panic) => return uncontrolled(&logger, &panic_message(&*panic)),
        };

        let input = HandlerInput {
            user_id: event.user_id().map(ToString::to_string),
            request_id: event.request_id().to_string(),
            logger: logger.clone(),
            data,
        };

        let func = &self.func;
        let outcome = AssertUnwindSafe(async move { func(input).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(value)) => match helpers::ok_json(&value) {
                Ok(response) => response,
                Err(e) => uncontrolled(&logger, &format!("response serialization failed: {e}")),
            },
            Ok(Err(HandlerError::Status(e))) => helpers::domain_error(&e),
            Ok(Err(HandlerError::Unexpected(e))) => uncontrolled(&logger, &format!("{e:#}")),
            Err(panic) => uncontrolled(&logger, &panic_message(&*panic)),
        }
    }
}

fn uncontrolled(logger: &Logger, cause: &str) -> Response {
    logger.error(&format!("Uncontrolled error caught in wrapper: {cause}"));
    helpers::internal_error()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Serve `handler` on the Lambda runtime until the process is shut down.
///
/// # Errors
///
/// Returns an error if the runtime API cannot be reached.
pub async fn run<V, F, Fut, T>(handler: ApiGatewayHandler<V, F>) -> Result<(), Error>
where
    V: Validate + 'static,
    V::Output: Send,
    F: Fn(HandlerInput<V::Output>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, HandlerError>> + Send,
    T: Serialize + Send,
{
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyEvent>| {
        let handler = handler.clone();
        async move { Ok::<Response, Error>(handler.handle(event.payload).await) }
    }))
    .await
}
