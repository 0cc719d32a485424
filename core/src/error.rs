//! Error types for the roster API client.
//!
//! # Design
//! `NotFound` keeps a dedicated variant for callers that address a resource
//! directly, but single-record lookups do not surface it: `parse_get` turns a
//! 404 into `Ok(None)` so screens can render a not-found state. Every other
//! non-2xx response lands in `HttpError` with the raw status code and body.
//! `Transport` covers failures before any response arrived. Together these
//! form the remote-failure class that controllers report to the user and
//! never retry.

use thiserror::Error;

/// Errors returned by `ApiClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for a resource that had to exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Returned by `CreateController::submit` when the draft does not satisfy
/// every field rule. Carries the names of the failing fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("form has invalid fields: {}", .fields.join(", "))]
pub struct FormInvalid {
    pub fields: Vec<&'static str>,
}

/// Why `CreateController::submit` did not produce a request.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormInvalid),

    #[error(transparent)]
    Api(#[from] ApiError),
}
