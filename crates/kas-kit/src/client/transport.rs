//! The transport capability and its HTTP implementation.
//!
//! Resource clients never talk to the network directly. They hand a
//! [`RequestDescriptor`] and a [`Completion`] to a [`Transport`], which
//! delivers the outcome asynchronously through the completion.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{TransportError, is_retryable_status};
use crate::types::{HttpMethod, RequestDescriptor, Service, ServiceErrorPayload};

// ============================================================================
// Capability
// ============================================================================

/// The raw HTTP response behind a call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Header names are lowercase.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

type CompletionFn = Box<dyn FnOnce(Option<TransportError>, Option<Value>, Option<RawResponse>) + Send>;

/// Completion handler passed to [`Transport::submit`].
///
/// Must be completed at most once; consuming `self` enforces it. Dropping a
/// completion without completing it fails the call with
/// [`TransportError::Dropped`].
pub struct Completion(CompletionFn);

impl Completion {
    pub fn new(
        f: impl FnOnce(Option<TransportError>, Option<Value>, Option<RawResponse>) + Send + 'static,
    ) -> Self {
        Self(Box::new(f))
    }

    /// Deliver an outcome.
    pub fn complete(
        self,
        error: Option<TransportError>,
        data: Option<Value>,
        raw_response: Option<RawResponse>,
    ) {
        (self.0)(error, data, raw_response)
    }

    /// Deliver decoded data.
    pub fn succeed(self, data: Value, raw_response: RawResponse) {
        self.complete(None, Some(data), Some(raw_response))
    }

    /// Deliver a failure.
    pub fn fail(self, error: TransportError, raw_response: Option<RawResponse>) {
        self.complete(Some(error), None, raw_response)
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Completion")
    }
}

/// An asynchronous, callback-based request executor.
///
/// Implementations must return from `submit` promptly and complete the
/// handler later (or immediately, for in-memory transports).
pub trait Transport: Send + Sync {
    fn submit(&self, request: RequestDescriptor, done: Completion);
}

// ============================================================================
// HTTP transport
// ============================================================================

/// Retry configuration for HTTP requests.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retries.
    pub max_retries: u32,
    /// Initial delay in milliseconds.
    pub initial_delay_ms: u64,
    /// Maximum delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            max_delay_ms: 5000,
        }
    }
}

impl RetryConfig {
    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt));
        Duration::from_millis(std::cmp::min(delay, self.max_delay_ms))
    }
}

type Attempt = Result<(Value, RawResponse), (TransportError, Option<RawResponse>)>;

/// [`Transport`] over HTTPS with `reqwest`.
///
/// Each request runs on a spawned tokio task, so `submit` must be called
/// from within a tokio runtime. Retryable statuses (408, 429, 5xx) and
/// connection failures are retried with exponential backoff.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<HttpInner>,
}

#[derive(Clone)]
struct HttpInner {
    client: reqwest::Client,
    endpoints: BTreeMap<Service, String>,
    auth: String,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a transport sending `auth` as the `Authorization` header.
    pub fn new(auth: impl Into<String>) -> Self {
        Self::with_retry_config(auth, RetryConfig::default())
    }

    /// Create a transport with custom retry configuration.
    pub fn with_retry_config(auth: impl Into<String>, retry_config: RetryConfig) -> Self {
        Self {
            inner: Arc::new(HttpInner {
                client: reqwest::Client::new(),
                endpoints: BTreeMap::new(),
                auth: auth.into(),
                retry_config,
            }),
        }
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS, timeouts).
    pub fn client(mut self, client: reqwest::Client) -> Self {
        Arc::make_mut(&mut self.inner).client = client;
        self
    }

    /// Set the base URL of one service, e.g. `https://kip17-api.klaytnapi.com/v1`.
    pub fn endpoint(mut self, service: Service, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Arc::make_mut(&mut self.inner).endpoints.insert(service, base_url);
        self
    }

    /// The configured base URL of a service.
    pub fn base_url(&self, service: Service) -> Option<&str> {
        self.inner.endpoints.get(&service).map(String::as_str)
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }

    /// Build the full URL of a request.
    pub fn url_for(&self, request: &RequestDescriptor) -> Result<Url, TransportError> {
        let base = self.base_url(request.service).ok_or_else(|| {
            TransportError::network(
                format!("no endpoint configured for the {} service", request.service),
                None,
                false,
            )
        })?;
        let mut url = Url::parse(&format!("{base}{}", request.resolved_path()))
            .map_err(|e| TransportError::network(format!("invalid URL: {e}"), None, false))?;
        if !request.query_params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query_params.iter());
        }
        Ok(url)
    }

    /// Send a request, retrying retryable failures.
    async fn execute(&self, request: &RequestDescriptor) -> Attempt {
        let retry_config = &self.inner.retry_config;
        let total_attempts = retry_config.max_retries + 1;

        for attempt in 0..total_attempts {
            match self.try_execute(request).await {
                Ok(ok) => return Ok(ok),
                Err((e, _)) if e.is_retryable() && attempt < total_attempts - 1 => {
                    let delay = retry_config.delay(attempt);
                    warn!(
                        service = %request.service,
                        path = request.path_template,
                        attempt = attempt + 1,
                        ?delay,
                        error = %e,
                        "retrying KAS request"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err((TransportError::Timeout(total_attempts), None))
    }

    /// Single attempt.
    async fn try_execute(&self, request: &RequestDescriptor) -> Attempt {
        let url = self.url_for(request).map_err(|e| (e, None))?;

        let mut builder = self.inner.client.request(method(request.method), url);
        for (name, value) in &request.header_params {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if request.auth_names.contains(&"basic") {
            builder = builder.header(AUTHORIZATION, self.inner.auth.as_str());
        }
        if !request.accepts.is_empty() {
            builder = builder.header(ACCEPT, request.accepts.join(", "));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| (TransportError::from(e), None))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| (TransportError::from(e), None))?;

        let raw = RawResponse {
            status,
            headers,
            body,
        };

        if !raw.is_success() {
            let error = match serde_json::from_str::<Value>(&raw.body)
                .ok()
                .as_ref()
                .and_then(ServiceErrorPayload::detect)
            {
                Some(payload) => TransportError::Service {
                    status_code: status,
                    code: payload.code,
                    message: payload.message,
                },
                None => TransportError::network(
                    format!("HTTP {status}: {}", raw.body),
                    Some(status),
                    is_retryable_status(status),
                ),
            };
            return Err((error, Some(raw)));
        }

        if raw.body.trim().is_empty() {
            return Ok((Value::Null, raw));
        }

        match serde_json::from_str(&raw.body) {
            Ok(data) => Ok((data, raw)),
            Err(e) => Err((TransportError::Json(e), Some(raw))),
        }
    }
}

impl Transport for HttpTransport {
    fn submit(&self, request: RequestDescriptor, done: Completion) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                done.fail(
                    TransportError::network("no tokio runtime to send the request on", None, false),
                    None,
                );
                return;
            }
        };

        let transport = self.clone();
        handle.spawn(async move {
            debug!(
                service = %request.service,
                method = %request.method,
                path = %request.resolved_path(),
                "sending KAS request"
            );
            match transport.execute(&request).await {
                Ok((data, raw)) => done.succeed(data, raw),
                Err((error, raw)) => {
                    warn!(service = %request.service, error = %error, "KAS request failed");
                    done.fail(error, raw)
                }
            }
        });
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoints", &self.inner.endpoints)
            .field("retry_config", &self.inner.retry_config)
            .finish()
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn transport() -> HttpTransport {
        HttpTransport::new("Basic abc")
            .endpoint(Service::Kip17, "https://kip17-api.klaytnapi.com/v1/")
    }

    // ========================================================================
    // URL building
    // ========================================================================

    #[test]
    fn test_url_for_joins_base_and_path() {
        let mut request =
            RequestDescriptor::new(Service::Kip17, HttpMethod::Get, "/contract/{alias}/token");
        request.path_params.insert("alias", "my-nft".to_string());
        request
            .query_params
            .insert("size".to_string(), "10".to_string());
        request
            .query_params
            .insert("cursor".to_string(), "a b".to_string());

        let url = transport().url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://kip17-api.klaytnapi.com/v1/contract/my-nft/token?cursor=a+b&size=10"
        );
    }

    #[test]
    fn test_url_for_without_query_has_no_question_mark() {
        let request = RequestDescriptor::new(Service::Kip17, HttpMethod::Get, "/contract");
        let url = transport().url_for(&request).unwrap();
        assert_eq!(url.as_str(), "https://kip17-api.klaytnapi.com/v1/contract");
    }

    #[test]
    fn test_url_for_unconfigured_service() {
        let request = RequestDescriptor::new(Service::Wallet, HttpMethod::Get, "/account");
        let err = transport().url_for(&request).unwrap_err();
        assert!(!err.is_retryable());
    }

    // ========================================================================
    // Retry config
    // ========================================================================

    #[test]
    fn test_retry_delay_is_capped() {
        let config = RetryConfig::default();
        assert_eq!(config.delay(0), Duration::from_millis(500));
        assert_eq!(config.delay(1), Duration::from_millis(1000));
        assert_eq!(config.delay(10), Duration::from_millis(5000));
        assert_eq!(config.delay(200), Duration::from_millis(5000));
    }

    #[test]
    fn test_retry_none() {
        assert_eq!(RetryConfig::none().max_retries, 0);
    }

    // ========================================================================
    // Completion
    // ========================================================================

    #[test]
    fn test_completion_delivers_once() {
        let (tx, rx) = std::sync::mpsc::channel();
        let done = Completion::new(move |error, data, raw| {
            tx.send((error.is_some(), data, raw.map(|r| r.status)))
                .unwrap();
        });
        done.succeed(serde_json::json!({ "ok": true }), RawResponse::new(200, "{}"));
        let (failed, data, status) = rx.recv().unwrap();
        assert!(!failed);
        assert_eq!(data.unwrap()["ok"], true);
        assert_eq!(status, Some(200));
    }

    #[test]
    fn test_submit_without_runtime_fails_fast() {
        let (tx, rx) = std::sync::mpsc::channel();
        let request = RequestDescriptor::new(Service::Kip17, HttpMethod::Get, "/contract");
        transport().submit(
            request,
            Completion::new(move |error, _, _| {
                tx.send(error.map(|e| e.to_string())).unwrap();
            }),
        );
        let error = rx.recv().unwrap().unwrap();
        assert!(error.contains("no tokio runtime"));
    }

    // ========================================================================
    // Request execution
    // ========================================================================

    /// A local HTTP server answering each connection with the next scripted
    /// `(status, body)` reply.
    struct Responder {
        base_url: String,
        hits: Arc<AtomicUsize>,
        heads: Arc<Mutex<Vec<String>>>,
    }

    impl Responder {
        async fn start(replies: Vec<(u16, &'static str)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let hits = Arc::new(AtomicUsize::new(0));
            let heads = Arc::new(Mutex::new(Vec::new()));

            let (counter, log) = (hits.clone(), heads.clone());
            tokio::spawn(async move {
                for (status, body) in replies {
                    let (mut socket, _) = listener.accept().await.unwrap();
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        let n = socket.read(&mut chunk).await.unwrap();
                        if n == 0 {
                            break;
                        }
                        head.extend_from_slice(&chunk[..n]);
                    }
                    counter.fetch_add(1, Ordering::SeqCst);
                    log.lock()
                        .unwrap()
                        .push(String::from_utf8_lossy(&head).to_ascii_lowercase());

                    let response = format!(
                        "HTTP/1.1 {status} Scripted\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    socket.write_all(response.as_bytes()).await.unwrap();
                    let _ = socket.shutdown().await;
                }
            });

            Self {
                base_url: format!("http://{addr}/v1"),
                hits,
                heads,
            }
        }

        fn transport(&self, max_retries: u32) -> HttpTransport {
            let config = RetryConfig {
                max_retries,
                initial_delay_ms: 1,
                max_delay_ms: 5,
            };
            HttpTransport::with_retry_config("Basic abc", config)
                .client(reqwest::Client::builder().no_proxy().build().unwrap())
                .endpoint(Service::Kip17, &self.base_url)
        }

        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    fn get_contracts() -> RequestDescriptor {
        let mut request = RequestDescriptor::new(Service::Kip17, HttpMethod::Get, "/contract");
        request
            .header_params
            .insert("x-chain-id".to_string(), "1001".to_string());
        request
    }

    #[tokio::test]
    async fn test_execute_retries_then_succeeds() {
        let server = Responder::start(vec![(503, "busy"), (200, r#"{"count":1}"#)]).await;

        let (data, raw) = server.transport(2).execute(&get_contracts()).await.unwrap();

        assert_eq!(data, serde_json::json!({ "count": 1 }));
        assert_eq!(raw.status, 200);
        assert_eq!(raw.headers.get("content-type").map(String::as_str), Some("application/json"));
        assert_eq!(server.hits(), 2);
    }

    #[tokio::test]
    async fn test_execute_sends_auth_and_headers() {
        let server = Responder::start(vec![(200, "{}")]).await;

        server.transport(0).execute(&get_contracts()).await.unwrap();

        let heads = server.heads.lock().unwrap();
        assert!(heads[0].starts_with("get /v1/contract "));
        assert!(heads[0].contains("authorization: basic abc"));
        assert!(heads[0].contains("x-chain-id: 1001"));
    }

    #[tokio::test]
    async fn test_execute_gives_up_after_max_retries() {
        let server = Responder::start(vec![(503, ""), (503, ""), (503, "")]).await;

        let (error, raw) = server.transport(1).execute(&get_contracts()).await.unwrap_err();

        assert_eq!(error.status_code(), Some(503));
        assert_eq!(raw.map(|r| r.status), Some(503));
        assert_eq!(server.hits(), 2);
    }

    #[tokio::test]
    async fn test_execute_maps_service_error_body() {
        let body = r#"{"code":1100050,"message":"incorrect request"}"#;
        let server = Responder::start(vec![(400, body)]).await;

        let (error, raw) = server.transport(3).execute(&get_contracts()).await.unwrap_err();

        match error {
            TransportError::Service {
                status_code,
                code,
                ref message,
            } => {
                assert_eq!(status_code, 400);
                assert_eq!(code, 1100050);
                assert_eq!(message, "incorrect request");
            }
            other => panic!("expected a service error, got {other:?}"),
        }
        assert_eq!(raw.unwrap().body, body);
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_execute_empty_body_is_null() {
        let server = Responder::start(vec![(200, "")]).await;

        let (data, raw) = server.transport(0).execute(&get_contracts()).await.unwrap();

        assert_eq!(data, Value::Null);
        assert!(raw.body.is_empty());
    }

    #[tokio::test]
    async fn test_execute_invalid_json() {
        let server = Responder::start(vec![(200, "not json")]).await;

        let (error, raw) = server.transport(3).execute(&get_contracts()).await.unwrap_err();

        assert!(matches!(error, TransportError::Json(_)));
        assert_eq!(raw.unwrap().body, "not json");
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_submit_completes_from_spawned_task() {
        let server = Responder::start(vec![(200, r#"{"items":[],"cursor":""}"#)]).await;
        let (tx, rx) = futures::channel::oneshot::channel();

        server.transport(0).submit(
            get_contracts(),
            Completion::new(move |error, data, raw| {
                let _ = tx.send((error.is_none(), data, raw.map(|r| r.status)));
            }),
        );

        let (ok, data, status) = rx.await.unwrap();
        assert!(ok);
        assert_eq!(data.unwrap()["cursor"], "");
        assert_eq!(status, Some(200));
    }
}
