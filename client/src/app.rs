//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::RequireAuth;
use crate::components::sidebar::AppLayout;
use crate::components::toaster::ToastHost;
use crate::config::ApiConfig;
use crate::net::client::ApiClient;
use crate::net::transport::platform_transport;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, placeholder::ComingSoon};
use crate::state::{auth::AuthState, session::SessionStore, toast::ToastState};
use crate::util::storage::platform_storage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the API client and session store once, provides them with the
/// shared signals, and restores any persisted session after mount.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let toasts = RwSignal::new(ToastState::default());

    let config = ApiConfig::from_build_env();
    let transport = platform_transport(&config);
    let api = ApiClient::new(config, transport, platform_storage());
    let session = SessionStore::new(api, auth, toasts);
    session.attach();

    provide_context(auth);
    provide_context(toasts);
    provide_context(session.clone());

    // Effects only run in the browser, so SSR renders the loading state.
    Effect::new(move || session.initialize());

    view! {
        <Stylesheet id="leptos" href="/pkg/fintrack.css"/>
        <Title text="FinanceTracker"/>

        <Router>
            <AppLayout>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("") view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }/>
                    <Route
                        path=StaticSegment("expenses")
                        view=|| view! { <RequireAuth><ComingSoon title="Expenses Page"/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("expense-types")
                        view=|| view! { <RequireAuth><ComingSoon title="Expense Types Page"/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("recurring")
                        view=|| view! { <RequireAuth><ComingSoon title="Recurring Expenses Page"/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("bulk-upload")
                        view=|| view! { <RequireAuth><ComingSoon title="Bulk Upload Page"/></RequireAuth> }
                    />
                </Routes>
            </AppLayout>
            <ToastHost/>
        </Router>
    }
}
