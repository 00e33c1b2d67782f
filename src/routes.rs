//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The finance API lives on a separate origin, so this host only serves the
//! Leptos SSR shell, the compiled `/pkg` assets and a health probe.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Probe and static asset routes, independent of the Leptos app.
fn service_routes(site_root: &Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
}

/// Full application router: service routes plus Leptos SSR for every page.
pub fn app(options: LeptosOptions) -> Router {
    let routes = generate_route_list(client::app::App);
    let site_root = std::path::PathBuf::from(options.site_root.as_ref());

    let leptos_router = Router::new()
        .leptos_routes(&options, routes, {
            let opts = options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(options);

    service_routes(&site_root)
        .merge(leptos_router)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
