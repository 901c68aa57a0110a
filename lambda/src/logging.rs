//! Base and per-request loggers.
//!
//! A [`Logger`] is a thin handle over a `tracing` span. The base logger is
//! built once at startup and handed to the adapter; every invocation derives a
//! child carrying the request identifier, so all events it emits are tagged
//! with that id in the JSON output.

use tracing::{Span, debug, error, info, info_span, warn};

#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
    service: String,
    request_id: Option<String>,
}

impl Logger {
    /// Create a base logger for `service`.
    pub fn new(service: impl Into<String>) -> Self {
        let service = service.into();
        let span = info_span!("service", service = %service);
        Self {
            span,
            service,
            request_id: None,
        }
    }

    /// Derive a logger scoped to one request.
    #[must_use]
    pub fn child(&self, request_id: &str) -> Self {
        let span = info_span!(parent: &self.span, "request", request_id = %request_id);
        Self {
            span,
            service: self.service.clone(),
            request_id: Some(request_id.to_string()),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// The request id this logger was derived with, `None` for a base logger.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn error(&self, message: &str) {
        self.span.in_scope(|| {
            error!(request_id = self.request_id(), "{}", message);
        });
    }

    pub fn warn(&self, message: &str) {
        self.span.in_scope(|| {
            warn!(request_id = self.request_id(), "{}", message);
        });
    }

    pub fn info(&self, message: &str) {
        self.span.in_scope(|| {
            info!(request_id = self.request_id(), "{}", message);
        });
    }

    pub fn debug(&self, message: &str) {
        self.span.in_scope(|| {
            debug!(request_id = self.request_id(), "{}", message);
        });
    }
}
