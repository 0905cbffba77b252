//! Error types for the blocking HTTP client.
//!
//! # Design
//! Transport failures are carried verbatim: `ClientError::Transport` is a
//! transparent wrapper, so `Display` and `source()` are the transport's own
//! and callers can downcast to the concrete error their transport reports.
//! Every other variant is produced by this crate while building the request
//! or interpreting the outcome.

use thiserror::Error;

use crate::transport::{ResponseMetadata, TransportError};

/// Errors returned by `HttpClient::send` and `RequestBuilder::build`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport finished without an error but did not report an HTTP
    /// response. Carries whatever metadata it did report.
    #[error("invalid response: {0:?}")]
    InvalidResponse(Option<ResponseMetadata>),

    /// The configured deadline passed before the transport completed.
    #[error("request timed out")]
    Timeout,

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A caller-supplied header cannot be put on the wire.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The transport dropped the completion handler without calling it.
    #[error("transport dropped the request without reporting an outcome")]
    CompletionDropped,

    /// Whatever the transport reported, untouched.
    #[error(transparent)]
    Transport(TransportError),
}

impl ClientError {
    /// Take back the transport's own error, if this is one.
    pub fn into_transport_error(self) -> Result<TransportError, Self> {
        match self {
            ClientError::Transport(err) => Ok(err),
            other => Err(other),
        }
    }
}

impl From<plist::Error> for ClientError {
    fn from(err: plist::Error) -> Self {
        ClientError::SerializationError(err.to_string())
    }
}
