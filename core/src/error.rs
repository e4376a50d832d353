//! Error types for the campaigns API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the campaign does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. The `Display` text is what the store
//! records as its user-facing error message, so status failures read as
//! `API error: <status>` without the body.

use thiserror::Error;

/// Errors returned by `CampaignClient` parse methods and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("API error: 404")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("API error: {status}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (DNS, connect, TLS, I/O).
    #[error("network error: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failures_render_without_body() {
        let err = ApiError::HttpError {
            status: 500,
            body: "<html>traceback</html>".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500");
        assert_eq!(ApiError::NotFound.to_string(), "API error: 404");
    }

    #[test]
    fn transport_failures_carry_their_cause() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
