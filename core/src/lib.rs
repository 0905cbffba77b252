//! Blocking HTTP client core over an asynchronous, callback-based transport.
//!
//! # Overview
//! Callers describe a request abstractly (`HttpRequest`: endpoint, method,
//! one payload encoding, headers) and call `HttpClient::send`, which blocks
//! until the injected `Transport` reports back. The transport does the
//! network I/O on its own threads; this crate only decides what goes on the
//! wire and waits for the answer.
//!
//! # Design
//! - `RequestBuilder` is a pure transform from `HttpRequest` to `WireRequest`.
//! - `HttpClient` is stateless apart from its transport and config. Each call
//!   gets its own one-shot signal, so concurrent calls never interact.
//! - `Transport` is a trait so tests (and embedders) inject their own.
//! - By default the wait has no deadline. `ClientConfig::timeout` adds one.

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod signal;
pub mod transport;

pub use builder::RequestBuilder;
pub use client::{HttpClient, SendRequest};
pub use config::ClientConfig;
pub use error::ClientError;
pub use self::http::{Endpoint, HttpMethod, HttpRequest, HttpResponse, Payload};
pub use transport::{
    CompletionHandler, DataTask, ResponseMetadata, Transport, TransportError, TransportOutcome,
    WireRequest,
};
