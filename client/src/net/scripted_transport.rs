//! Test transport that replays canned responses and records requests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::config::ApiConfig;
use crate::net::client::ApiClient;
use crate::net::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
use crate::util::storage::MemoryStorage;

pub const TEST_ORIGIN: &str = "https://api.example.test";

/// What the transport does for a matched request.
#[derive(Clone, Debug)]
pub enum Reply {
    Respond(HttpResponse),
    Fail(TransportError),
    /// Never resolves.
    Hang,
}

impl Reply {
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::Respond(HttpResponse { status, body: body.to_string() })
    }
}

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<HashMap<(Method, String), VecDeque<Reply>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method` + endpoint path (e.g. `/expenses`).
    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, request: &HttpRequest) -> Reply {
        let path = endpoint_path(&request.url);
        let mut replies = self.replies.lock().unwrap();
        replies
            .get_mut(&(request.method, path))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Reply::Respond(HttpResponse { status: 404, body: String::new() }))
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        let reply = self.next_reply(&request);
        self.requests.lock().unwrap().push(request);
        match reply {
            Reply::Respond(response) => futures::future::ready(Ok(response)).boxed_local(),
            Reply::Fail(error) => futures::future::ready(Err(error)).boxed_local(),
            Reply::Hang => futures::future::pending().boxed_local(),
        }
    }
}

/// Strip origin, `/api/v1` prefix and query string.
fn endpoint_path(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    let prefix = format!("{TEST_ORIGIN}/api/v1");
    without_query.strip_prefix(&prefix).unwrap_or(without_query).to_owned()
}

/// Client wired to a scripted transport and fresh in-memory storage.
pub fn scripted_client() -> (ApiClient, ScriptedTransport, MemoryStorage) {
    let transport = ScriptedTransport::new();
    let storage = MemoryStorage::new();
    let client = ApiClient::new(
        ApiConfig::new(TEST_ORIGIN, "v1"),
        Arc::new(transport.clone()),
        Arc::new(storage.clone()),
    );
    (client, transport, storage)
}

pub fn user_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "u-1",
        "email": "test@example.com",
        "name": name,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    })
}

pub fn login_success_json(name: &str, token: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "message": "Login successful",
        "data": { "user": user_json(name), "token": token, "expires_at": "2030-01-01T00:00:00Z" }
    })
}

pub fn error_json(message: &str) -> serde_json::Value {
    serde_json::json!({ "success": false, "message": message, "errors": [] })
}

pub fn expense_json(id: &str, amount: f64, category: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "expense_type_id": "t-1",
        "amount": amount,
        "date": "2025-03-04",
        "payment_method": "UPI",
        "created_at": "2025-03-04T10:00:00Z",
        "updated_at": "2025-03-04T10:00:00Z",
        "expense_type": {
            "id": "t-1",
            "category": category,
            "name": "Food",
            "icon": "🍔",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }
    })
}

pub fn expenses_page_json(items: Vec<serde_json::Value>) -> serde_json::Value {
    let total = items.len();
    serde_json::json!({
        "success": true,
        "message": "ok",
        "data": items,
        "pagination": {
            "current_page": 1, "per_page": 5, "total": total,
            "total_pages": 1, "has_next": false, "has_prev": false
        }
    })
}
