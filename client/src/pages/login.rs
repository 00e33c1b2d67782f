//! Login page: email + password exchange for a bearer session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store does the work and raises the toasts; this page only
//! validates input, tracks its own submitting flag, and sends authenticated
//! users home.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use tokio_util::sync::CancellationToken;

use crate::net::types::LoginRequest;
use crate::state::auth::AuthState;
use crate::state::session::AppSession;
use crate::util::auth::{HOME_ROUTE, should_leave_login};

pub const DEMO_CREDENTIALS_HINT: &str = "Demo credentials: test@example.com / password123";
pub const MISSING_FIELDS_MESSAGE: &str = "Enter your email and password.";

/// Build a login request from raw form input. The email is trimmed; the
/// password is sent as typed.
///
/// # Errors
///
/// Returns a user-facing message when either field is empty.
pub fn validate_login_input(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok(LoginRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let info = RwSignal::new(String::new());

    let cancel = CancellationToken::new();
    on_cleanup({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    Effect::new(move || {
        if should_leave_login(&auth.get()) {
            navigate(
                HOME_ROUTE,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());
        submitting.set(true);

        let session = session.clone();
        let cancel = cancel.clone();
        leptos::task::spawn_local(async move {
            // Failures are already toasted by the session store.
            let _ = session.login(&credentials, &cancel).await;
            submitting.set(false);
        });
    };

    let resolving = move || auth.get().loading && !submitting.get();

    view! {
        <div class="login-page">
            <Show
                when=move || !resolving()
                fallback=|| view! { <p class="login-page__loading">"Loading..."</p> }
            >
                <div class="login-card">
                    <div class="login-card__brand">
                        <span class="login-card__logo" aria-hidden="true">"₹"</span>
                        <h1>"FinanceTracker"</h1>
                        <p class="login-card__tagline">"Manage your personal finances with ease"</p>
                    </div>
                    <h2 class="login-card__title">"Welcome Back"</h2>
                    <p class="login-card__subtitle">"Sign in to your account to continue"</p>
                    <form class="login-form" on:submit=on_submit.clone()>
                        <label for="email">"Email"</label>
                        <input
                            id="email"
                            name="email"
                            class="login-input"
                            type="email"
                            placeholder="Enter your email"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            name="password"
                            class="login-input"
                            type="password"
                            placeholder="Enter your password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Signing In..." } else { "Sign In" }}
                        </button>
                    </form>
                    <Show when=move || !info.get().is_empty()>
                        <p class="login-message">{move || info.get()}</p>
                    </Show>
                    <p class="login-card__hint">{DEMO_CREDENTIALS_HINT}</p>
                </div>
            </Show>
        </div>
    }
}
