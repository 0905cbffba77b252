//! Blocking HTTP client over a callback-based transport.
//!
//! # Design
//! `HttpClient` owns an injected `Transport` and no mutable state. Each
//! `send` builds the wire request, asks the transport for a data task whose
//! completion handler fires a fresh one-shot signal, resumes the task, and
//! parks the calling thread on the signal. Nothing is shared between calls,
//! so concurrent `send`s from different threads need no locking here.
//!
//! The outcome is interpreted in a fixed order: a transport error wins, then
//! a missing or non-HTTP response is `InvalidResponse`, otherwise the status
//! code and data become the `HttpResponse`.

use tracing::{debug, debug_span};
use uuid::Uuid;

use crate::builder::RequestBuilder;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::signal::{self, WaitError};
use crate::transport::{DataTask, Transport, TransportOutcome};

/// Anything that can send an `HttpRequest` and block for the response.
pub trait SendRequest {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// Synchronous client bridging to an asynchronous `Transport`.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    transport: T,
    builder: RequestBuilder,
    config: ClientConfig,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            builder: RequestBuilder,
            config,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request` and block until the transport reports an outcome.
    ///
    /// A build failure returns before the transport is contacted. Without a
    /// configured timeout the wait is unbounded.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let request_id = Uuid::new_v4();
        let span = debug_span!(
            "send",
            %request_id,
            method = %request.method,
            url = %request.endpoint
        );
        let _enter = span.enter();

        let wire = self.builder.build(request)?;

        let (signal, waiter) = signal::one_shot::<TransportOutcome>();
        let task = self
            .transport
            .data_task(wire, Box::new(move |outcome| signal.fire(outcome)));
        task.resume();
        debug!("dispatched, waiting for transport");

        let outcome = waiter.wait(self.config.timeout).map_err(|err| match err {
            WaitError::TimedOut => {
                debug!(timeout = ?self.config.timeout, "deadline passed");
                ClientError::Timeout
            }
            WaitError::Abandoned => {
                debug!("completion handler dropped");
                ClientError::CompletionDropped
            }
        })?;

        let result = interpret(outcome);
        match &result {
            Ok(response) => debug!(status = response.status_code, "completed"),
            Err(err) => debug!(error = %err, "failed"),
        }
        result
    }
}

impl<T: Transport> SendRequest for HttpClient<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        HttpClient::send(self, request)
    }
}

fn interpret(outcome: TransportOutcome) -> Result<HttpResponse, ClientError> {
    if let Some(err) = outcome.error {
        return Err(ClientError::Transport(err));
    }
    let Some(status_code) = outcome.response.as_ref().and_then(|r| r.status_code()) else {
        return Err(ClientError::InvalidResponse(outcome.response));
    };
    Ok(HttpResponse {
        status_code,
        data: outcome.data,
    })
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::http::{Endpoint, Payload};
    use crate::transport::{CompletionHandler, ResponseMetadata, WireRequest};

    /// What the fake transport does once a task is resumed.
    #[derive(Clone)]
    enum Behavior {
        /// Complete on the resuming thread before `resume` returns.
        Inline(fn() -> TransportOutcome),
        /// Complete from a spawned thread after a delay.
        Delayed(Duration, fn() -> TransportOutcome),
        /// Keep the handler and never call it.
        Silent,
        /// Drop the handler without calling it.
        Drop,
    }

    struct FakeTransport {
        behavior: Behavior,
        seen: Mutex<Vec<WireRequest>>,
        resumed: Arc<AtomicUsize>,
        parked: Arc<Mutex<Vec<CompletionHandler>>>,
    }

    impl FakeTransport {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                seen: Mutex::new(Vec::new()),
                resumed: Arc::new(AtomicUsize::new(0)),
                parked: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    struct FakeTask {
        behavior: Behavior,
        completion: CompletionHandler,
        resumed: Arc<AtomicUsize>,
        parked: Arc<Mutex<Vec<CompletionHandler>>>,
    }

    impl DataTask for FakeTask {
        fn resume(self) {
            self.resumed.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Inline(make) => (self.completion)(make()),
                Behavior::Delayed(delay, make) => {
                    let completion = self.completion;
                    thread::spawn(move || {
                        thread::sleep(delay);
                        completion(make());
                    });
                }
                Behavior::Silent => self.parked.lock().unwrap().push(self.completion),
                Behavior::Drop => drop(self.completion),
            }
        }
    }

    impl Transport for FakeTransport {
        type Task = FakeTask;

        fn data_task(&self, request: WireRequest, completion: CompletionHandler) -> FakeTask {
            self.seen.lock().unwrap().push(request);
            FakeTask {
                behavior: self.behavior.clone(),
                completion,
                resumed: Arc::clone(&self.resumed),
                parked: Arc::clone(&self.parked),
            }
        }
    }

    fn ok_with_body() -> TransportOutcome {
        TransportOutcome::success(ResponseMetadata::http(200), Some(b"hello".to_vec()))
    }

    fn request() -> HttpRequest {
        HttpRequest::get("https://api.example.com/items".parse::<Endpoint>().unwrap())
            .with_payload(Payload::url_encoded([("q", "1")]))
    }

    #[test]
    fn inline_completion_returns_response() {
        let client = HttpClient::new(FakeTransport::new(Behavior::Inline(ok_with_body)));
        let response = client.send(&request()).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.data.as_deref(), Some(&b"hello"[..]));

        let transport = client.transport();
        assert_eq!(transport.resumed.load(Ordering::SeqCst), 1);
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url.as_str(), "https://api.example.com/items?q=1");
    }

    #[test]
    fn delayed_completion_from_another_thread() {
        fn not_found() -> TransportOutcome {
            TransportOutcome::success(ResponseMetadata::http(404), None)
        }
        let client = HttpClient::new(FakeTransport::new(Behavior::Delayed(
            Duration::from_millis(30),
            not_found,
        )));
        let response = client.send(&request()).unwrap();
        assert_eq!(
            response,
            HttpResponse {
                status_code: 404,
                data: None
            }
        );
    }

    #[test]
    fn transport_error_is_passed_through() {
        fn refused() -> TransportOutcome {
            TransportOutcome::failure(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
        }
        let client = HttpClient::new(FakeTransport::new(Behavior::Inline(refused)));
        let err = client.send(&request()).unwrap_err();
        assert_eq!(err.to_string(), "refused");
        let inner = err.into_transport_error().unwrap();
        assert_eq!(
            inner.downcast_ref::<io::Error>().unwrap().kind(),
            io::ErrorKind::ConnectionRefused
        );
    }

    #[test]
    fn error_wins_over_response() {
        fn both() -> TransportOutcome {
            TransportOutcome {
                data: Some(b"partial".to_vec()),
                response: Some(ResponseMetadata::http(200)),
                error: Some("reset by peer".into()),
            }
        }
        let client = HttpClient::new(FakeTransport::new(Behavior::Inline(both)));
        let err = client.send(&request()).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn missing_response_is_invalid() {
        fn empty() -> TransportOutcome {
            TransportOutcome::default()
        }
        let client = HttpClient::new(FakeTransport::new(Behavior::Inline(empty)));
        let err = client.send(&request()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(None)));
    }

    #[test]
    fn non_http_response_is_invalid() {
        fn file_load() -> TransportOutcome {
            TransportOutcome::success(
                ResponseMetadata::Other {
                    url: None,
                    mime_type: Some("text/plain".to_string()),
                },
                Some(b"data".to_vec()),
            )
        }
        let client = HttpClient::new(FakeTransport::new(Behavior::Inline(file_load)));
        let err = client.send(&request()).unwrap_err();
        match err {
            ClientError::InvalidResponse(Some(ResponseMetadata::Other { mime_type, .. })) => {
                assert_eq!(mime_type.as_deref(), Some("text/plain"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn build_failure_never_reaches_transport() {
        let client = HttpClient::new(FakeTransport::new(Behavior::Inline(ok_with_body)));
        let bad = request().with_header("Bad Header", "x");
        let err = client.send(&bad).unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeader { .. }));
        assert!(client.transport().seen.lock().unwrap().is_empty());
        assert_eq!(client.transport().resumed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn silent_transport_times_out_when_deadline_configured() {
        let client = HttpClient::with_config(
            FakeTransport::new(Behavior::Silent),
            ClientConfig::default().with_timeout(Duration::from_millis(20)),
        );
        let err = client.send(&request()).unwrap_err();
        assert!(matches!(err, ClientError::Timeout));

        // A completion arriving after the deadline goes nowhere.
        let late = client.transport().parked.lock().unwrap().pop().unwrap();
        late(ok_with_body());
    }

    #[test]
    fn late_completion_within_deadline_succeeds() {
        let client = HttpClient::with_config(
            FakeTransport::new(Behavior::Delayed(Duration::from_millis(10), ok_with_body)),
            ClientConfig::default().with_timeout(Duration::from_secs(5)),
        );
        assert_eq!(client.send(&request()).unwrap().status_code, 200);
    }

    #[test]
    fn dropped_completion_is_reported() {
        let client = HttpClient::new(FakeTransport::new(Behavior::Drop));
        let err = client.send(&request()).unwrap_err();
        assert!(matches!(err, ClientError::CompletionDropped));
    }

    #[test]
    fn usable_through_send_request_trait() {
        fn fetch(client: &dyn SendRequest) -> u16 {
            client.send(&request()).unwrap().status_code
        }
        let client = HttpClient::new(FakeTransport::new(Behavior::Inline(ok_with_body)));
        assert_eq!(fetch(&client), 200);
    }
}
