//! Authorized HTTP access to the remote finance API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint wrapper in `api` funnels through `ApiClient::execute`,
//! which reads the persisted bearer token per request and handles 401s by
//! clearing the session and publishing a session-invalidated event. The
//! router never sees this layer; the route guard reacts to the session
//! store's state change instead.
//!
//! ERROR HANDLING
//! ==============
//! Calls are one-shot and fail closed: no retries, no caching. Callers get a
//! typed `ApiError` and decide whether to surface it.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::pin::pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{self, Either};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;
use crate::net::transport::{HttpRequest, HttpResponse, Method, RequestBody, Transport, TransportError};
use crate::net::types::{ErrorBody, QueryParams, UploadFile};
use crate::util::storage::{SessionStorage, clear_session, stored_token};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API calls.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The server answered 401; the local session has been cleared.
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx status.
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
        errors: Vec<String>,
    },

    /// A 2xx body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// A 2xx body carried `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// The caller's cancellation token fired first.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Message supplied by the server, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } => {
                message.as_deref().filter(|m| !m.is_empty())
            }
            Self::Rejected { message } => Some(message.as_str()).filter(|m| !m.is_empty()),
            Self::Transport(_) | Self::Decode(_) | Self::Cancelled => None,
        }
    }

    /// Server message, or `fallback` when there is none.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }

    /// Errors that must not produce a user-facing notification on data
    /// loads: 401 resolves through the login redirect, cancellation means
    /// nobody is listening.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::Cancelled)
    }
}

// =============================================================================
// SESSION EVENTS
// =============================================================================

/// Handle returned by `SessionEvents::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct EventsInner {
    armed: AtomicBool,
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
}

/// Subscribable "session invalidated" signal.
///
/// The latch is armed while a session exists. The first 401 disarms it and
/// notifies listeners; later 401s for the same session find it disarmed, so
/// concurrent failures produce a single notification.
#[derive(Clone, Default)]
pub struct SessionEvents {
    inner: Arc<EventsInner>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners().retain(|(existing, _)| *existing != id);
    }

    /// Mark a session as live (login or restore).
    pub fn arm(&self) {
        self.inner.armed.store(true, Ordering::SeqCst);
    }

    /// Mark the session as ended without notifying (explicit logout).
    pub fn disarm(&self) {
        self.inner.armed.store(false, Ordering::SeqCst);
    }

    pub fn is_armed(&self) -> bool {
        self.inner.armed.load(Ordering::SeqCst)
    }

    /// Disarm and notify listeners if the latch was armed.
    ///
    /// Returns whether listeners were notified.
    pub fn invalidate(&self) -> bool {
        if !self.inner.armed.swap(false, Ordering::SeqCst) {
            return false;
        }
        // Listeners run outside the lock so they may (un)subscribe.
        let listeners: Vec<Listener> = self.listeners().iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in listeners {
            listener();
        }
        true
    }

    fn listeners(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.inner.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// How the bearer header is chosen for a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestAuth {
    /// Read `auth_token` from storage at dispatch time.
    Stored,
    /// Use this token regardless of storage.
    Explicit(String),
}

/// Endpoint-relative request description.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: RequestBody,
    pub auth: RequestAuth,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            auth: RequestAuth::Stored,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| TransportError::Body(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn query(mut self, params: &impl QueryParams) -> Self {
        self.query = params.query_pairs();
        self
    }

    pub fn multipart(mut self, fields: Vec<(String, String)>, files: Vec<(String, UploadFile)>) -> Self {
        self.body = RequestBody::Multipart { fields, files };
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.auth = RequestAuth::Explicit(token.into());
        self
    }
}

/// `k=v&k2=v2` with percent-encoded values.
pub fn encode_query(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

// =============================================================================
// CLIENT
// =============================================================================

/// Shared handle to the remote API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
    transport: Arc<dyn Transport>,
    storage: Arc<dyn SessionStorage>,
    events: SessionEvents,
}

impl ApiClient {
    pub fn new(config: ApiConfig, transport: Arc<dyn Transport>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            storage,
            events: SessionEvents::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn storage(&self) -> &dyn SessionStorage {
        self.storage.as_ref()
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Resolve an `ApiRequest` into an absolute, authorized `HttpRequest`.
    pub fn prepare(&self, request: ApiRequest) -> HttpRequest {
        let mut url = self.config.endpoint(&request.path);
        if !request.query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(&request.query));
        }

        let mut headers = Vec::new();
        if !matches!(request.body, RequestBody::Multipart { .. }) {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        let token = match request.auth {
            RequestAuth::Stored => stored_token(self.storage.as_ref()),
            RequestAuth::Explicit(token) => Some(token).filter(|t| !t.is_empty()),
        };
        if let Some(token) = token {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }

        HttpRequest {
            method: request.method,
            url,
            headers,
            body: request.body,
        }
    }

    /// Dispatch a request and decode a 2xx body as `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]. A 401 additionally clears the persisted session and
    /// fires the session-invalidated event before the error is returned.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest, cancel: &CancellationToken) -> Result<T, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        let owns_session = matches!(request.auth, RequestAuth::Stored);
        let http = self.prepare(request);
        let method = http.method;
        let url = http.url.clone();

        let exchange = self.transport.send(http);
        let cancelled = pin!(cancel.cancelled());
        let response = match future::select(exchange, cancelled).await {
            Either::Left((result, _)) => result?,
            Either::Right(((), _)) => return Err(ApiError::Cancelled),
        };

        self.interpret(method, &url, owns_session, response)
    }

    /// `owns_session` is false for requests that carried an explicit token;
    /// their 401 says nothing about the currently stored session.
    fn interpret<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        owns_session: bool,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        if response.status == 401 {
            if owns_session {
                clear_session(self.storage.as_ref());
                if self.events.invalidate() {
                    leptos::logging::warn!("session invalidated by 401 on {} {url}", method.as_str());
                }
            }
            let message = parse_error_body(&response.body).map(|body| body.message);
            return Err(ApiError::Unauthorized { message });
        }

        if !response.is_success() {
            let body = parse_error_body(&response.body).unwrap_or_default();
            return Err(ApiError::Status {
                status: response.status,
                message: Some(body.message).filter(|m| !m.is_empty()),
                errors: body.errors,
            });
        }

        if let Some(body) = unsuccessful_envelope(&response.body) {
            return Err(ApiError::Rejected { message: body.message });
        }

        serde_json::from_str::<T>(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn parse_error_body(raw: &str) -> Option<ErrorBody> {
    serde_json::from_str::<ErrorBody>(raw).ok()
}

/// A 2xx body that explicitly says `"success": false`, with or without `data`.
fn unsuccessful_envelope(raw: &str) -> Option<ErrorBody> {
    let value = serde_json::from_str::<serde_json::Value>(raw).ok()?;
    if value.get("success") != Some(&serde_json::Value::Bool(false)) {
        return None;
    }
    serde_json::from_value::<ErrorBody>(value).ok()
}
