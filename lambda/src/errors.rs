use thiserror::Error;

/// A structured failure carrying the HTTP status it should be reported with.
///
/// Validators return it for rejected input and business functions return it
/// (wrapped in [`HandlerError::Status`]) for declared domain failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status} {message}")]
pub struct StatusError {
    pub status: u16,
    pub message: String,
    pub details: Option<String>,
}

impl StatusError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn bad_request() -> Self {
        Self::new(400, "Bad Request")
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden")
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self::new(404, "Not Found")
    }

    #[must_use]
    pub fn conflict() -> Self {
        Self::new(409, "Conflict")
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(500, "Internal Server Error")
    }

    /// Attach a human-readable explanation to the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Everything a business function can fail with.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Declared domain failure; its status and message reach the caller.
    #[error("Domain failure: {0}")]
    Status(StatusError),

    /// Anything else. Logged and reported as a generic 500.
    #[error("Uncontrolled error: {0}")]
    Unexpected(anyhow::Error),
}

impl From<StatusError> for HandlerError {
    fn from(error: StatusError) -> Self {
        HandlerError::Status(error)
    }
}

impl From<anyhow::Error> for HandlerError {
    fn from(error: anyhow::Error) -> Self {
        HandlerError::Unexpected(error)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        HandlerError::Unexpected(error.into())
    }
}
