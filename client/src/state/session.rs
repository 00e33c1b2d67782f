//! Session store: the single owner of "who is logged in".
//!
//! SYSTEM CONTEXT
//! ==============
//! Constructed once in `App` and provided through context. It is the only
//! writer of `AuthState` and, together with the API client's 401 handler, the
//! only writer of the persisted session keys.
//!
//! DESIGN
//! ======
//! Generic over `StateCell` so the same login/logout/restore logic drives
//! Leptos signals in the app and mutex cells in native tests.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::RwSignal;
use tokio_util::sync::CancellationToken;

use crate::net::client::{ApiClient, ApiError, SubscriptionId};
use crate::net::types::{LoginRequest, User};
use crate::state::auth::AuthState;
use crate::state::cell::StateCell;
use crate::state::toast::ToastState;
use crate::util::storage::{StoredSession, clear_session, persist_session, read_session, stored_token};

pub const LOGIN_SUCCESS_TITLE: &str = "Welcome back!";
pub const LOGIN_FAILED_TITLE: &str = "Login Failed";
pub const LOGIN_FAILED_FALLBACK: &str = "Login failed";
pub const LOGOUT_TITLE: &str = "Logged out";
pub const LOGOUT_DESCRIPTION: &str = "You have been logged out successfully";

/// Session store wired to reactive signals, as provided in app context.
pub type AppSession = SessionStore<RwSignal<AuthState>, RwSignal<ToastState>>;

#[derive(Clone)]
pub struct SessionStore<A, N> {
    api: ApiClient,
    auth: A,
    toasts: N,
}

impl<A, N> SessionStore<A, N>
where
    A: StateCell<AuthState>,
    N: StateCell<ToastState>,
{
    pub fn new(api: ApiClient, auth: A, toasts: N) -> Self {
        Self { api, auth, toasts }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn toasts(&self) -> &N {
        &self.toasts
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.snapshot().is_authenticated()
    }

    /// Restore a persisted session. Corrupt or half-written records are
    /// discarded. Always finishes with `loading = false`.
    pub fn initialize(&self) {
        let restored = match read_session(self.api.storage()) {
            StoredSession::Restored { user, .. } => {
                self.api.events().arm();
                Some(user)
            }
            StoredSession::Empty => None,
            StoredSession::Corrupt => {
                clear_session(self.api.storage());
                None
            }
        };
        self.auth.modify(|state| {
            state.user = restored;
            state.loading = false;
        });
    }

    /// Exchange credentials for a session.
    ///
    /// Exactly one of "user set + success toast" or "error toast" happens,
    /// except for cancellation which is silent. `loading` is cleared on
    /// every path.
    ///
    /// # Errors
    ///
    /// Returns the underlying `ApiError`; a `success: false` body is reported
    /// as `ApiError::Rejected`.
    pub async fn login(&self, credentials: &LoginRequest, cancel: &CancellationToken) -> Result<User, ApiError> {
        self.auth.modify(|state| state.loading = true);
        let result = self.exchange_credentials(credentials, cancel).await;

        match &result {
            Ok(user) => {
                let welcome = format!("Logged in as {}", user.name);
                self.auth.modify(|state| {
                    state.user = Some(user.clone());
                    state.loading = false;
                });
                self.toasts.modify(|toasts| {
                    toasts.success(LOGIN_SUCCESS_TITLE, welcome);
                });
            }
            Err(ApiError::Cancelled) => self.auth.modify(|state| state.loading = false),
            Err(error) => {
                leptos::logging::warn!("login failed: {error}");
                let message = error.user_message(LOGIN_FAILED_FALLBACK);
                self.auth.modify(|state| state.loading = false);
                self.toasts.modify(|toasts| {
                    toasts.error(LOGIN_FAILED_TITLE, message);
                });
            }
        }
        result
    }

    async fn exchange_credentials(&self, credentials: &LoginRequest, cancel: &CancellationToken) -> Result<User, ApiError> {
        let response = self.api.login(credentials, cancel).await?;
        if !response.success {
            return Err(ApiError::Rejected { message: response.message });
        }
        let data = response.data;
        persist_session(self.api.storage(), &data.token, &data.user).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.api.events().arm();
        Ok(data.user)
    }

    /// End the session locally, then tell the server best-effort.
    ///
    /// Local state is cleared before the network call so a slow or failing
    /// server never leaves the user logged in.
    pub async fn logout(&self, cancel: &CancellationToken) {
        let token = stored_token(self.api.storage());
        clear_session(self.api.storage());
        self.api.events().disarm();
        self.auth.modify(|state| {
            state.user = None;
            state.loading = false;
        });
        self.toasts.modify(|toasts| {
            toasts.success(LOGOUT_TITLE, LOGOUT_DESCRIPTION);
        });

        match self.api.logout(token, cancel).await {
            Ok(_) | Err(ApiError::Cancelled) => {}
            Err(error) => leptos::logging::warn!("logout request failed: {error}"),
        }
    }

    /// Drop the in-memory user whenever the API client invalidates the
    /// session (401). Storage is already cleared by then.
    pub fn attach(&self) -> SubscriptionId {
        let auth = self.auth.clone();
        self.api.events().subscribe(move || {
            auth.modify(|state| {
                state.user = None;
                state.loading = false;
            });
        })
    }
}
