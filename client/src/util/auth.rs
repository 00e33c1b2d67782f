//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes and the login page apply the same decision table, so it
//! lives here as pure functions over `AuthState`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

/// What a guarded route should do for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Persisted session not read yet; render a neutral placeholder.
    Resolving,
    /// Render the protected content.
    Granted,
    /// Replace the current entry with the login route.
    Redirect,
}

pub fn route_access(state: &AuthState) -> RouteAccess {
    if state.loading {
        RouteAccess::Resolving
    } else if state.is_authenticated() {
        RouteAccess::Granted
    } else {
        RouteAccess::Redirect
    }
}

pub fn should_redirect_unauth(state: &AuthState) -> bool {
    route_access(state) == RouteAccess::Redirect
}

/// The login page sends already-authenticated users home.
pub fn should_leave_login(state: &AuthState) -> bool {
    state.is_authenticated()
}
