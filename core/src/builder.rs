//! Turns an abstract `HttpRequest` into a `WireRequest`.
//!
//! # Design
//! A pure transform: no I/O, no shared state. The payload decides the
//! implied `Content-Type` and where encoded data goes; caller headers are
//! applied last so they override anything the payload implied. Header names
//! are case-insensitive, so `content-type` replaces `Content-Type`.
//!
//! Pairs are encoded with `application/x-www-form-urlencoded` rules in both
//! the query and the body, so a space becomes `+` rather than `%20`.
//!
//! | payload       | GET                   | POST                  |
//! |---------------|-----------------------|-----------------------|
//! | `None`        | untouched             | untouched             |
//! | `UrlEncoding` | query replaced        | form body             |
//! | empty pairs   | query removed         | no body               |
//! | `Xml`         | plist XML body        | plist XML body        |

use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::HeaderMap;
use tracing::trace;
use url::form_urlencoded;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, Payload};
use crate::transport::WireRequest;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const XML: &str = "application/xml";

/// Stateless request builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn build(&self, request: &HttpRequest) -> Result<WireRequest, ClientError> {
        let mut wire = WireRequest {
            url: request.endpoint.url().clone(),
            method: request.method,
            headers: HeaderMap::new(),
            body: None,
        };

        match &request.payload {
            Payload::None => {
                trace!("no payload");
            }
            Payload::UrlEncoding(pairs) => {
                wire.headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
                // An empty list means "no query items", not an empty query:
                // GET drops any existing query without leaving a bare `?`,
                // POST sends no body.
                match request.method {
                    HttpMethod::Get => {
                        wire.url.set_query(None);
                        if !pairs.is_empty() {
                            wire.url.query_pairs_mut().extend_pairs(pairs);
                        }
                    }
                    HttpMethod::Post if !pairs.is_empty() => {
                        let encoded = form_urlencoded::Serializer::new(String::new())
                            .extend_pairs(pairs)
                            .finish();
                        wire.body = Some(encoded.into_bytes());
                    }
                    HttpMethod::Post => {}
                }
                trace!(pairs = pairs.len(), method = %request.method, "url-encoded payload");
            }
            Payload::Xml(value) => {
                wire.headers.insert(CONTENT_TYPE, HeaderValue::from_static(XML));
                let mut body = Vec::new();
                value.to_writer_xml(&mut body)?;
                trace!(bytes = body.len(), "xml payload");
                wire.body = Some(body);
            }
        }

        for (name, value) in &request.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            wire.headers.insert(header_name, header_value);
        }

        Ok(wire)
    }
}
