//! The seam between the blocking client and the asynchronous transport.
//!
//! # Design
//! The transport is injected, never constructed here. It hands back an inert
//! `DataTask` for each `WireRequest`; nothing happens on the network until the
//! client calls `resume`. The transport then reports a `TransportOutcome`
//! through the completion handler on whatever thread or task it likes.
//!
//! The handler is a boxed `FnOnce`, so "called at most once" is enforced by
//! the type system. A transport that drops it without calling it is detected
//! by the client rather than leaving the caller blocked.

use http::HeaderMap;
use url::Url;

use crate::http::HttpMethod;

/// Opaque error reported by a transport. Passed through to the caller as-is.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Callback a transport invokes with the result of a data task.
pub type CompletionHandler = Box<dyn FnOnce(TransportOutcome) + Send + 'static>;

/// A fully resolved request, ready for a transport to put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub url: Url,
    pub method: HttpMethod,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Metadata describing what came back from the network.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseMetadata {
    /// An HTTP response with a status line.
    Http { status_code: u16, headers: HeaderMap },

    /// Something that is not an HTTP response, e.g. a `file:` or `data:`
    /// load. Carries no status code.
    Other {
        url: Option<Url>,
        mime_type: Option<String>,
    },
}

impl ResponseMetadata {
    pub fn http(status_code: u16) -> Self {
        ResponseMetadata::Http {
            status_code,
            headers: HeaderMap::new(),
        }
    }

    /// The HTTP status code, or `None` if this is not an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ResponseMetadata::Http { status_code, .. } => Some(*status_code),
            ResponseMetadata::Other { .. } => None,
        }
    }
}

/// Everything a transport reports when a data task completes. Any
/// combination of fields may be present; the client decides what it means.
#[derive(Debug, Default)]
pub struct TransportOutcome {
    pub data: Option<Vec<u8>>,
    pub response: Option<ResponseMetadata>,
    pub error: Option<TransportError>,
}

impl TransportOutcome {
    pub fn success(response: ResponseMetadata, data: Option<Vec<u8>>) -> Self {
        Self {
            data,
            response: Some(response),
            error: None,
        }
    }

    pub fn failure(error: impl Into<TransportError>) -> Self {
        Self {
            data: None,
            response: None,
            error: Some(error.into()),
        }
    }
}

/// A constructed but not yet started transport operation.
pub trait DataTask {
    /// Start the operation. The completion handler fires later, possibly
    /// before this returns.
    fn resume(self);
}

/// Asynchronous, callback-based HTTP transport.
pub trait Transport: Send + Sync {
    type Task: DataTask;

    /// Create an inert task for `request` that reports to `completion`
    /// exactly once after it is resumed.
    fn data_task(&self, request: WireRequest, completion: CompletionHandler) -> Self::Task;
}
