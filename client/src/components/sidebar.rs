//! Application chrome: navigation sidebar and the authenticated layout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once inside the router. The sidebar only appears while a user is
//! present, so the login route renders full-width.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use tokio_util::sync::CancellationToken;

use crate::state::auth::AuthState;
use crate::state::session::AppSession;
use crate::util::format::initials;

/// One sidebar navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { title: "Dashboard", path: "/", icon: "▦" },
    NavItem { title: "Expenses", path: "/expenses", icon: "🧾" },
    NavItem { title: "Expense Types", path: "/expense-types", icon: "🏷" },
    NavItem { title: "Recurring", path: "/recurring", icon: "↻" },
    NavItem { title: "Bulk Upload", path: "/bulk-upload", icon: "⇪" },
];

/// Exact-match active check; a trailing slash on the current path is ignored.
pub fn is_active(current: &str, item_path: &str) -> bool {
    let normalized = if current.len() > 1 {
        current.trim_end_matches('/')
    } else {
        current
    };
    let normalized = if normalized.is_empty() { "/" } else { normalized };
    normalized == item_path
}

pub fn nav_class(active: bool) -> &'static str {
    if active {
        "sidebar__link sidebar__link--active"
    } else {
        "sidebar__link"
    }
}

/// Sidebar plus main content area.
#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="app-layout">
            <Show when=move || auth.get().is_authenticated()>
                <AppSidebar/>
            </Show>
            <main class="app-layout__main">{children()}</main>
        </div>
    }
}

#[component]
pub fn AppSidebar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let pathname = use_location().pathname;

    let on_logout = move |_| {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            session.logout(&CancellationToken::new()).await;
        });
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar__brand">
                <span class="sidebar__logo" aria-hidden="true">"₹"</span>
                <div>
                    <h2 class="sidebar__title">"FinanceTracker"</h2>
                    <p class="sidebar__subtitle">"Personal Finance"</p>
                </div>
            </div>

            <nav class="sidebar__nav">
                <p class="sidebar__group-label">"Main Navigation"</p>
                {NAV_ITEMS
                    .into_iter()
                    .map(|item| {
                        let path = item.path;
                        view! {
                            <a
                                href=path
                                class=move || nav_class(is_active(&pathname.get(), path))
                            >
                                <span class="sidebar__icon" aria-hidden="true">{item.icon}</span>
                                <span>{item.title}</span>
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </nav>

            <div class="sidebar__footer">
                {move || {
                    auth.get()
                        .user
                        .map(|user| {
                            view! {
                                <div class="sidebar__user">
                                    <span class="sidebar__avatar">{initials(&user.name)}</span>
                                    <div class="sidebar__user-text">
                                        <p class="sidebar__user-name">{user.name.clone()}</p>
                                        <p class="sidebar__user-email">{user.email.clone()}</p>
                                    </div>
                                </div>
                            }
                        })
                }}
                <button class="btn sidebar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </div>
        </aside>
    }
}
