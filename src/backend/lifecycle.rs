//! Observable state machine around one logical network request.
//!
//! A [`RequestLifecycle`] owns the `loading / data / error` triple for a
//! single consumer (usually a page) and exposes [`RequestLifecycle::trigger`]
//! to (re)issue the call. Lifecycles configured with `run_on_mount` fire on
//! their first effect run and again whenever the caller-supplied dependency
//! list changes.
//!
//! Overlapping triggers are neither de-duplicated nor cancelled: both calls
//! complete and the state reflects whichever resolved last. Consumers keep
//! the triggering control disabled while [`RequestLifecycle::loading`] is
//! true.

use super::transport::{HttpRequest, HttpTransport};
use super::RequestError;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};

/// Future returned by [`RequestLifecycle::trigger`]. It is `'static` so it
/// can be awaited in place or handed to `tokio::spawn`.
pub type RequestFuture<T> = Pin<Box<dyn Future<Output = Result<T, RequestError>> + Send + 'static>>;

/// Snapshot of a request's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
        }
    }
}

/// The single authoritative phase derived from a [`RequestState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Loading,
    Success,
    Error,
}

enum RequestEvent<T> {
    Send,
    Success(T),
    Failure(String),
}

impl<T> RequestState<T> {
    pub fn status(&self) -> RequestStatus {
        if self.loading {
            RequestStatus::Loading
        } else if self.error.is_some() {
            RequestStatus::Error
        } else if self.data.is_some() {
            RequestStatus::Success
        } else {
            RequestStatus::Idle
        }
    }

    fn apply(&mut self, event: RequestEvent<T>) {
        match event {
            // Data from the previous call stays visible while loading.
            RequestEvent::Send => {
                self.loading = true;
                self.error = None;
            }
            RequestEvent::Success(data) => {
                self.loading = false;
                self.data = Some(data);
                self.error = None;
            }
            // Prior data is preserved on failure.
            RequestEvent::Failure(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
    }
}

/// Construction parameters for a lifecycle.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub url: String,
    pub method: Method,
    pub body: Option<Value>,
    pub dependencies: Vec<String>,
    pub run_on_mount: bool,
}

impl RequestOptions {
    /// Options for a call that fires automatically on mount.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            dependencies: Vec::new(),
            run_on_mount: true,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn depends_on(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Only fire when [`RequestLifecycle::trigger`] is called explicitly.
    #[must_use]
    pub fn manual(mut self) -> Self {
        self.run_on_mount = false;
        self
    }
}

/// Per-call replacement of locator, verb or body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOverride {
    pub url: Option<String>,
    pub method: Option<Method>,
    pub body: Option<Value>,
}

impl RequestOverride {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn body(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// One asynchronous request and its observable state.
///
/// Clones share state with the original; separately constructed lifecycles
/// never do.
#[derive(Clone)]
pub struct RequestLifecycle<T> {
    transport: Arc<dyn HttpTransport>,
    url: String,
    method: Method,
    body: Option<Value>,
    run_on_mount: bool,
    dependencies: Vec<String>,
    fired_with: Option<Vec<String>>,
    state: Arc<Mutex<RequestState<T>>>,
}

impl<T> RequestLifecycle<T>
where
    T: DeserializeOwned + Clone + Send + 'static,
{
    pub fn new(transport: Arc<dyn HttpTransport>, options: RequestOptions) -> Self {
        Self {
            transport,
            url: options.url,
            method: options.method,
            body: options.body,
            run_on_mount: options.run_on_mount,
            dependencies: options.dependencies,
            fired_with: None,
            state: Arc::new(Mutex::new(RequestState::default())),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Replace the default locator used by triggers without an override.
    ///
    /// Does not fire anything by itself; pair with [`Self::run_effect`].
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Run the mount effect with the dependencies given at construction.
    pub fn mount(&mut self) -> Option<RequestFuture<T>> {
        let dependencies = self.dependencies.clone();
        self.run_effect(dependencies)
    }

    /// Fire a default trigger if auto-firing is enabled and `dependencies`
    /// differ from the ones of the last automatic run (or there was none).
    ///
    /// Dependencies are compared verbatim; a value the caller forgets to
    /// include will not cause a re-fetch.
    pub fn run_effect(&mut self, dependencies: Vec<String>) -> Option<RequestFuture<T>> {
        if !self.run_on_mount {
            return None;
        }
        if self.fired_with.as_ref() == Some(&dependencies) {
            return None;
        }
        log::debug!("auto-firing {} {} for {:?}", self.method, self.url, dependencies);
        self.dependencies = dependencies.clone();
        self.fired_with = Some(dependencies);
        Some(self.trigger(None))
    }

    /// Record `dependencies` as those of the last automatic run without
    /// firing, or forget the last run entirely with `None`.
    ///
    /// Used when a failed call leaves the caller showing older data than it
    /// asked for, so that asking again is seen as a change.
    pub fn reset_effect(&mut self, dependencies: Option<Vec<String>>) {
        if let Some(dependencies) = &dependencies {
            self.dependencies = dependencies.clone();
        }
        self.fired_with = dependencies;
    }

    /// Issue the request.
    ///
    /// The state moves to loading before this returns; the returned future
    /// performs the call, records the outcome and yields the payload or the
    /// error so the caller can react to it.
    pub fn trigger(&self, override_with: Option<RequestOverride>) -> RequestFuture<T> {
        let override_with = override_with.unwrap_or_default();
        let request = HttpRequest {
            method: override_with.method.unwrap_or_else(|| self.method.clone()),
            url: override_with.url.unwrap_or_else(|| self.url.clone()),
            body: override_with.body.or_else(|| self.body.clone()),
        };

        lock(&self.state).apply(RequestEvent::Send);

        let transport = self.transport.clone();
        let state = self.state.clone();
        Box::pin(async move {
            let method = request.method.clone();
            let url = request.url.clone();
            let outcome = execute::<T>(transport.as_ref(), request).await;

            let mut state = lock(&state);
            match outcome {
                Ok(payload) => {
                    log::debug!("{} {} succeeded", method, url);
                    state.apply(RequestEvent::Success(payload.clone()));
                    Ok(payload)
                }
                Err(err) => {
                    let message = err.user_message();
                    log::warn!("{} {} failed: {}", method, url, message);
                    state.apply(RequestEvent::Failure(message));
                    Err(err)
                }
            }
        })
    }

    pub fn loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn status(&self) -> RequestStatus {
        lock(&self.state).status()
    }

    pub fn data(&self) -> Option<T> {
        lock(&self.state).data.clone()
    }

    pub fn snapshot(&self) -> RequestState<T> {
        lock(&self.state).clone()
    }
}

fn lock<T>(state: &Mutex<RequestState<T>>) -> MutexGuard<'_, RequestState<T>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Perform the call and decode a 2xx body. An empty body decodes as `null`.
async fn execute<T: DeserializeOwned>(transport: &dyn HttpTransport, request: HttpRequest) -> Result<T, RequestError> {
    let response = transport.execute(request).await?;
    if !response.is_success() {
        return Err(RequestError::from_response(response.status, &response.body));
    }

    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };
    serde_json::from_slice(body).map_err(|e| RequestError::Decode(e.to_string()))
}
