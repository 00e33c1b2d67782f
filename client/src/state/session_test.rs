use std::sync::{Arc, Mutex};

use futures::executor::block_on;

use super::*;
use crate::net::api::{EXPENSES_PATH, LOGIN_PATH, LOGOUT_PATH};
use crate::net::scripted_transport::{
    Reply, ScriptedTransport, error_json, login_success_json, scripted_client, user_json,
};
use crate::net::transport::{HttpResponse, Method, TransportError};
use crate::net::types::ExpenseQuery;
use crate::state::toast::ToastVariant;
use crate::util::storage::{AUTH_TOKEN_KEY, MemoryStorage, SessionStorage, USER_DATA_KEY};

type TestSession = SessionStore<Arc<Mutex<AuthState>>, Arc<Mutex<ToastState>>>;

fn session() -> (TestSession, ScriptedTransport, MemoryStorage) {
    let (api, transport, storage) = scripted_client();
    let store = SessionStore::new(
        api,
        Arc::new(Mutex::new(AuthState::default())),
        Arc::new(Mutex::new(ToastState::default())),
    );
    (store, transport, storage)
}

fn credentials() -> LoginRequest {
    LoginRequest { email: "test@example.com".to_owned(), password: "password123".to_owned() }
}

fn seed(storage: &MemoryStorage, name: &str) {
    storage.set(AUTH_TOKEN_KEY, "tok-old");
    storage.set(USER_DATA_KEY, &user_json(name).to_string());
}

// =============================================================
// initialize
// =============================================================

#[test]
fn initialize_restores_persisted_session() {
    let (store, _transport, storage) = session();
    seed(&storage, "Asha");

    store.initialize();

    let auth = store.auth().snapshot();
    assert!(!auth.loading);
    assert_eq!(auth.user.map(|u| u.name), Some("Asha".to_owned()));
    assert!(store.api().events().is_armed());
}

#[test]
fn initialize_discards_unparseable_user_record() {
    let (store, _transport, storage) = session();
    storage.set(AUTH_TOKEN_KEY, "tok");
    storage.set(USER_DATA_KEY, "{not json");

    store.initialize();

    assert!(!store.is_authenticated());
    assert!(!store.auth().snapshot().loading);
    assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
    assert_eq!(storage.get(USER_DATA_KEY), None);
    assert!(store.toasts().snapshot().toasts.is_empty());
}

#[test]
fn initialize_discards_orphan_token() {
    let (store, _transport, storage) = session();
    storage.set(AUTH_TOKEN_KEY, "tok");

    store.initialize();

    assert!(!store.is_authenticated());
    assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
}

#[test]
fn initialize_with_empty_storage_finishes_loading() {
    let (store, _transport, _storage) = session();
    assert!(store.auth().snapshot().loading);

    store.initialize();

    assert_eq!(store.auth().snapshot(), AuthState { user: None, loading: false });
    assert!(!store.api().events().is_armed());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_persists_and_welcomes() {
    let (store, transport, storage) = session();
    transport.on(Method::Post, LOGIN_PATH, Reply::json(200, &login_success_json("Asha", "tok-new")));

    let user = block_on(store.login(&credentials(), &CancellationToken::new())).unwrap();

    assert_eq!(user.name, "Asha");
    assert_eq!(storage.get(AUTH_TOKEN_KEY).as_deref(), Some("tok-new"));
    let persisted: User = serde_json::from_str(&storage.get(USER_DATA_KEY).unwrap()).unwrap();
    assert_eq!(persisted, user);

    let auth = store.auth().snapshot();
    assert!(!auth.loading);
    assert!(auth.is_authenticated());

    let toasts = store.toasts().snapshot().toasts;
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, LOGIN_SUCCESS_TITLE);
    assert_eq!(toasts[0].description.as_deref(), Some("Logged in as Asha"));
    assert_eq!(toasts[0].variant, ToastVariant::Default);
    assert!(store.api().events().is_armed());
}

#[test]
fn login_rejected_by_server_shows_server_message() {
    let (store, transport, storage) = session();
    transport.on(Method::Post, LOGIN_PATH, Reply::json(401, &error_json("Invalid email or password")));

    let err = block_on(store.login(&credentials(), &CancellationToken::new())).unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert!(!store.is_authenticated());
    assert!(!store.auth().snapshot().loading);
    assert_eq!(storage.get(AUTH_TOKEN_KEY), None);

    let toasts = store.toasts().snapshot().toasts;
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, LOGIN_FAILED_TITLE);
    assert_eq!(toasts[0].description.as_deref(), Some("Invalid email or password"));
    assert_eq!(toasts[0].variant, ToastVariant::Destructive);
}

#[test]
fn login_network_failure_uses_fallback_message() {
    let (store, transport, _storage) = session();
    transport.on(Method::Post, LOGIN_PATH, Reply::Fail(TransportError::Network("offline".to_owned())));

    block_on(store.login(&credentials(), &CancellationToken::new())).unwrap_err();

    let toasts = store.toasts().snapshot().toasts;
    assert_eq!(toasts[0].description.as_deref(), Some(LOGIN_FAILED_FALLBACK));
    assert!(!store.auth().snapshot().loading);
}

#[test]
fn login_with_unsuccessful_envelope_shows_server_message() {
    let (store, transport, storage) = session();
    let body = serde_json::json!({ "success": false, "message": "Account locked", "errors": [] });
    transport.on(Method::Post, LOGIN_PATH, Reply::json(200, &body));

    let err = block_on(store.login(&credentials(), &CancellationToken::new())).unwrap_err();

    assert_eq!(err, ApiError::Rejected { message: "Account locked".to_owned() });
    assert!(!store.is_authenticated());
    assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
    assert_eq!(store.toasts().snapshot().toasts[0].description.as_deref(), Some("Account locked"));
}

#[test]
fn cancelled_login_is_silent() {
    let (store, _transport, _storage) = session();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = block_on(store.login(&credentials(), &cancel)).unwrap_err();

    assert_eq!(err, ApiError::Cancelled);
    assert!(store.toasts().snapshot().toasts.is_empty());
    assert!(!store.auth().snapshot().loading);
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_local_state_before_server_answers() {
    let (store, transport, storage) = session();
    seed(&storage, "Asha");
    store.initialize();
    transport.on(Method::Post, LOGOUT_PATH, Reply::Hang);
    let cancel = CancellationToken::new();
    let canceller = cancel.clone();

    block_on(async {
        let logout = store.logout(&cancel);
        let observe = async {
            assert!(!store.is_authenticated());
            assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
            assert_eq!(storage.get(USER_DATA_KEY), None);
            let requests = transport.requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].header("Authorization"), Some("Bearer tok-old"));
            canceller.cancel();
        };
        futures::future::join(logout, observe).await;
    });

    let toasts = store.toasts().snapshot().toasts;
    assert_eq!(toasts.last().map(|t| t.title.as_str()), Some(LOGOUT_TITLE));
    assert!(!store.api().events().is_armed());
}

#[test]
fn logout_survives_server_error() {
    let (store, transport, storage) = session();
    seed(&storage, "Asha");
    store.initialize();
    transport.on(
        Method::Post,
        LOGOUT_PATH,
        Reply::Respond(HttpResponse { status: 500, body: String::new() }),
    );

    block_on(store.logout(&CancellationToken::new()));

    assert!(!store.is_authenticated());
    assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
    assert_eq!(store.toasts().snapshot().toasts[0].description.as_deref(), Some(LOGOUT_DESCRIPTION));
}

#[test]
fn late_logout_rejection_does_not_end_newer_session() {
    let (store, transport, storage) = session();
    seed(&storage, "Asha");
    store.initialize();
    store.attach();
    transport.on(Method::Post, LOGIN_PATH, Reply::json(200, &login_success_json("Asha", "tok-new")));
    transport.on(Method::Post, LOGOUT_PATH, Reply::json(401, &error_json("Token expired")));

    block_on(store.login(&credentials(), &CancellationToken::new())).unwrap();
    let err = block_on(store.api().logout(Some("tok-old".to_owned()), &CancellationToken::new())).unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert!(store.is_authenticated());
    assert_eq!(storage.get(AUTH_TOKEN_KEY).as_deref(), Some("tok-new"));
    assert!(store.api().events().is_armed());
}

// =============================================================
// attach / session invalidation
// =============================================================

#[test]
fn expired_token_401_logs_user_out() {
    let (store, transport, storage) = session();
    seed(&storage, "Asha");
    store.initialize();
    store.attach();
    transport.on(Method::Get, EXPENSES_PATH, Reply::json(401, &error_json("Token expired")));

    let err = block_on(store.api().list_expenses(&ExpenseQuery::default(), &CancellationToken::new())).unwrap_err();

    assert!(err.is_silent());
    assert!(!store.is_authenticated());
    assert!(!store.auth().snapshot().loading);
    assert_eq!(storage.get(AUTH_TOKEN_KEY), None);
    assert_eq!(storage.get(USER_DATA_KEY), None);
    assert!(store.toasts().snapshot().toasts.is_empty());
}

#[test]
fn fresh_login_rearms_invalidation() {
    let (store, transport, _storage) = session();
    store.initialize();
    store.attach();
    transport.on(Method::Post, LOGIN_PATH, Reply::json(200, &login_success_json("Asha", "tok-new")));
    transport.on(Method::Get, EXPENSES_PATH, Reply::json(401, &error_json("expired")));

    block_on(store.login(&credentials(), &CancellationToken::new())).unwrap();
    assert!(store.is_authenticated());
    block_on(store.api().list_expenses(&ExpenseQuery::default(), &CancellationToken::new())).unwrap_err();

    assert!(!store.is_authenticated());
}
