//! Guard for routes that require a logged-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stateless: it derives everything from the `AuthState` signal. A 401 from
//! any request clears the session, which flips the signal and makes every
//! mounted guard redirect without the HTTP layer knowing about routing.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::{LOGIN_ROUTE, RouteAccess, route_access};

/// Render `children` only for authenticated users.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let access = Memo::new(move |_| route_access(&auth.get()));

    Effect::new(move || {
        if access.get() == RouteAccess::Redirect {
            navigate(
                LOGIN_ROUTE,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    move || match access.get() {
        RouteAccess::Granted => children().into_any(),
        RouteAccess::Resolving => view! { <div class="route-guard">"Loading..."</div> }.into_any(),
        RouteAccess::Redirect => view! { <div class="route-guard"></div> }.into_any(),
    }
}
