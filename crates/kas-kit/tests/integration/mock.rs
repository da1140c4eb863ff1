//! Recording transport shared by the integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use kas_kit::*;
use serde_json::Value;

static TRACING: Once = Once::new();

/// Install a `tracing` subscriber once; `RUST_LOG=kas_kit=debug` shows
/// every submitted call.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

enum Reply {
    Data(Value),
    Failure(TransportError),
}

/// Records every request descriptor and answers with scripted replies.
///
/// Replies are delivered from a spawned task after `delay`, like a real
/// network transport. Once the script runs out, `null` is returned.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<RequestDescriptor>>,
    replies: Mutex<VecDeque<Reply>>,
    delay: Mutex<Option<Duration>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        init_tracing();
        Arc::new(Self::default())
    }

    pub fn reply(&self, value: Value) -> &Self {
        self.replies.lock().unwrap().push_back(Reply::Data(value));
        self
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.replies.lock().unwrap().push_back(Reply::Failure(error));
        self
    }

    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RequestDescriptor {
        self.requests().pop().expect("no request was submitted")
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn submit(&self, request: RequestDescriptor, done: Completion) {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        let delay = *self.delay.lock().unwrap();

        let deliver = move || match reply {
            Some(Reply::Data(value)) => {
                let body = value.to_string();
                done.succeed(value, RawResponse::new(200, body));
            }
            Some(Reply::Failure(error)) => done.fail(error, None),
            None => done.succeed(Value::Null, RawResponse::new(200, "")),
        };

        match delay {
            Some(delay) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    deliver();
                });
            }
            None => deliver(),
        }
    }
}

/// A client for every service, backed by `transport`.
pub fn kas(transport: &Arc<MockTransport>) -> Kas {
    Kas::builder(Chain::Testnet, "access-key", "secret-key")
        .production()
        .transport(transport.clone())
        .build()
}
