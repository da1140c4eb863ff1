//! Awaitable calls with optional legacy callbacks.
//!
//! Every operation returns a [`Call`]. Awaiting it submits the request to
//! the transport exactly once. If a callback is attached it is invoked with
//! `(error, data, raw_response)` before the future settles, so code written
//! against the callback style and code written against futures observe the
//! same outcome.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::channel::oneshot;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::args::Callback;
use super::transport::{Completion, RawResponse, Transport};
use crate::error::{Error, TransportError};
use crate::types::{RequestDescriptor, ServiceErrorPayload};

/// The full outcome of a call, as seen by callbacks.
#[derive(Debug, Default)]
pub struct CallResult {
    pub value: Option<Value>,
    pub raw_response: Option<RawResponse>,
    pub error: Option<Error>,
}

impl CallResult {
    fn failed(error: Error) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Returns true if the transport reported no error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Collapse into a result, leaving service error payloads untouched.
    pub fn into_value(self) -> Result<Value, Error> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.value.unwrap_or(Value::Null)),
        }
    }

    /// Collapse into a result, turning a `{ code, message }` payload into
    /// [`Error::Service`].
    pub fn into_checked_value(self) -> Result<Value, Error> {
        let value = self.into_value()?;
        match ServiceErrorPayload::detect(&value) {
            Some(payload) => Err(Error::Service {
                code: payload.code,
                message: payload.message,
            }),
            None => Ok(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Error-shaped payloads become `Error::Service`.
    Checked,
    /// Payloads are returned as delivered.
    PassThrough,
}

/// A prepared, not yet submitted call.
///
/// Arguments were validated when the call was prepared. Nothing reaches the
/// transport until the call is awaited, [`spawn`](Self::spawn)ed or
/// [`outcome`](Self::outcome) is polled. A dropped call is never sent and its
/// callback never runs.
///
/// # Example
///
/// ```rust,no_run
/// # use kas_kit::*;
/// # async fn example(kas: Kas) -> Result<(), Error> {
/// let kip17 = kas.kip17()?;
///
/// // Future style
/// let page = kip17.contract_list(None)?.await?;
///
/// // Callback style, still awaitable
/// kip17
///     .contract_list(None)?
///     .callback(|err, data, _raw| match err {
///         Some(e) => eprintln!("failed: {e}"),
///         None => println!("got {data:?}"),
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[must_use = "calls do nothing unless awaited or spawned"]
pub struct Call<T> {
    transport: Arc<dyn Transport>,
    request: RequestDescriptor,
    callback: Option<Callback>,
    timeout: Option<Duration>,
    mode: Mode,
    _output: PhantomData<fn() -> T>,
}

impl<T> Call<T> {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        request: RequestDescriptor,
        callback: Option<Callback>,
    ) -> Self {
        Self {
            transport,
            request,
            callback,
            timeout: None,
            mode: Mode::Checked,
            _output: PhantomData,
        }
    }

    /// Attach a callback, replacing any callback given as an argument.
    ///
    /// The callback receives the transport error (not service error
    /// payloads), the decoded data and the raw response.
    pub fn callback(
        mut self,
        f: impl FnOnce(Option<&Error>, Option<&Value>, Option<&RawResponse>) + Send + 'static,
    ) -> Self {
        self.callback = Some(Box::new(f));
        self
    }

    /// Give up waiting after `duration`.
    ///
    /// The transport call is not cancelled; its outcome is discarded (the
    /// callback still runs when it arrives).
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// The request this call will submit.
    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// Returns true if a callback is attached.
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Resolve with the payload exactly as delivered, including
    /// `{ code, message }` service error payloads.
    pub fn raw(self) -> Call<Value> {
        Call {
            transport: self.transport,
            request: self.request,
            callback: self.callback,
            timeout: self.timeout,
            mode: Mode::PassThrough,
            _output: PhantomData,
        }
    }

    /// Submit and wait for the full outcome, including the raw response.
    pub async fn outcome(self) -> CallResult {
        let (tx, rx) = oneshot::channel();
        let callback = self.callback;
        let service = self.request.service;
        let path = self.request.path_template;

        let done = Completion::new(move |error, data, raw_response| {
            let error = error.map(Error::from);
            debug!(%service, path, ok = error.is_none(), "KAS call completed");
            if let Some(callback) = callback {
                callback(error.as_ref(), data.as_ref(), raw_response.as_ref());
            }
            let _ = tx.send(CallResult {
                value: data,
                raw_response,
                error,
            });
        });

        debug!(
            %service,
            method = %self.request.method,
            path = %self.request.resolved_path(),
            "submitting KAS call"
        );
        self.transport.submit(self.request, done);

        let received = match self.timeout {
            Some(duration) => match tokio::time::timeout(duration, rx).await {
                Ok(received) => received,
                Err(_) => return CallResult::failed(Error::Timeout(duration)),
            },
            None => rx.await,
        };

        received.unwrap_or_else(|_| CallResult::failed(TransportError::Dropped.into()))
    }
}

impl<T> Call<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Run the call on the tokio runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<Result<T, Error>> {
        tokio::spawn(self.into_future())
    }
}

impl<T> IntoFuture for Call<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = Result<T, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        let mode = self.mode;
        Box::pin(async move {
            let outcome = self.outcome().await;
            let value = match mode {
                Mode::Checked => outcome.into_checked_value()?,
                Mode::PassThrough => outcome.into_value()?,
            };
            Ok(serde_json::from_value(value)?)
        })
    }
}

impl<T> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("request", &self.request)
            .field("has_callback", &self.callback.is_some())
            .field("timeout", &self.timeout)
            .field("mode", &self.mode)
            .finish()
    }
}
