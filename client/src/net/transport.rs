//! HTTP transport seam under the API client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, bounded by a
//! `gloo-timers` timeout.
//! Server-side (SSR) and native tests: `UnavailableTransport` fails every
//! call, since the finance API is only reached from the browser.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::config::ApiConfig;
use crate::net::types::UploadFile;

/// HTTP verbs used by the finance API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Request payload.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// `multipart/form-data`; the boundary header is left to the transport.
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<(String, UploadFile)>,
    },
}

/// A fully resolved outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status + raw body of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP status layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("request body could not be built: {0}")]
    Body(String),
    #[error("not available on server")]
    Unavailable,
}

/// Sends one request and yields the raw response.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>>;
}

/// Transport that refuses every call. Used during SSR.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableTransport;

impl Transport for UnavailableTransport {
    fn send(&self, _request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        futures::future::ready(Err(TransportError::Unavailable)).boxed_local()
    }
}

/// Transport for the current build target.
pub fn platform_transport(config: &ApiConfig) -> Arc<dyn Transport> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(GlooTransport::new(config.timeout_secs))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        Arc::new(UnavailableTransport)
    }
}

/// Browser `fetch` transport.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug)]
pub struct GlooTransport {
    timeout_secs: u64,
}

#[cfg(feature = "hydrate")]
impl GlooTransport {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        let timeout_secs = self.timeout_secs;
        async move {
            let exchange = gloo_exchange(request).boxed_local();
            let millis = u32::try_from(timeout_secs.saturating_mul(1000)).unwrap_or(u32::MAX);
            let timer = gloo_timers::future::TimeoutFuture::new(millis);
            match futures::future::select(exchange, timer).await {
                futures::future::Either::Left((result, _)) => result,
                futures::future::Either::Right(((), _)) => Err(TransportError::Timeout(timeout_secs)),
            }
        }
        .boxed_local()
    }
}

#[cfg(feature = "hydrate")]
async fn gloo_exchange(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    for (key, value) in &request.headers {
        builder = builder.header(key, value);
    }

    let prepared = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(value) => {
            let raw = serde_json::to_string(&value).map_err(|e| TransportError::Body(e.to_string()))?;
            builder.body(raw)
        }
        RequestBody::Multipart { fields, files } => builder.body(build_form_data(&fields, &files)?),
    }
    .map_err(|e| TransportError::Body(e.to_string()))?;

    let response = prepared
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok(HttpResponse { status, body })
}

#[cfg(feature = "hydrate")]
fn build_form_data(
    fields: &[(String, String)],
    files: &[(String, UploadFile)],
) -> Result<web_sys::FormData, TransportError> {
    let to_body_error = |e: wasm_bindgen::JsValue| TransportError::Body(format!("{e:?}"));

    let form = web_sys::FormData::new().map_err(to_body_error)?;
    for (name, file) in files {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&bytes.buffer());
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&file.mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(to_body_error)?;
        form.append_with_blob_and_filename(name, &blob, &file.name)
            .map_err(to_body_error)?;
    }
    for (name, value) in fields {
        form.append_with_str(name, value).map_err(to_body_error)?;
    }
    Ok(form)
}
