//! Transport-agnostic request and response types.
//!
//! # Design
//! These types describe what the caller wants sent, not how it travels. An
//! `HttpRequest` names an endpoint, a method, exactly one payload encoding and
//! a set of caller headers; `RequestBuilder` turns it into a `WireRequest` for
//! the transport. `Payload` is a sum type so "exactly one encoding" is checked
//! by the compiler rather than by runtime validation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ClientError;

/// HTTP method for a request. Decides where a url-encoded payload lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// The method token as it appears on the request line.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved URL a request is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl From<Url> for Endpoint {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

impl FromStr for Endpoint {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(Url::parse(s)?))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.url, f)
    }
}

/// How request data is encoded. Exactly one variant applies per request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// No body and no query mutation.
    #[default]
    None,

    /// Ordered key/value pairs, form-encoded into the query (GET) or the
    /// body (POST). An empty list adds nothing at all.
    UrlEncoding(Vec<(String, String)>),

    /// A property-list value serialized as an XML plist body.
    Xml(plist::Value),
}

impl Payload {
    /// Build a `UrlEncoding` payload from any pairs whose values have a
    /// textual representation.
    pub fn url_encoded<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Payload::UrlEncoding(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

/// An abstract HTTP request. Built by the caller, consumed by
/// `HttpClient::send`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub endpoint: Endpoint,
    pub method: HttpMethod,
    pub payload: Payload,
    /// Applied after payload-implied headers, so these win on collision.
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    pub fn new(endpoint: impl Into<Endpoint>, method: HttpMethod) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            payload: Payload::None,
            headers: HashMap::new(),
        }
    }

    pub fn get(endpoint: impl Into<Endpoint>) -> Self {
        Self::new(endpoint, HttpMethod::Get)
    }

    pub fn post(endpoint: impl Into<Endpoint>) -> Self {
        Self::new(endpoint, HttpMethod::Post)
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// The outcome of a successful send: a status code and whatever bytes the
/// transport delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub data: Option<Vec<u8>>,
}
