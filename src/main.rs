mod config;
mod error;
mod routes;

use std::process::ExitCode;

use leptos::prelude::get_configuration;
use tracing_subscriber::EnvFilter;

use crate::config::HostConfig;
use crate::error::HostError;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fintrack host stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), HostError> {
    let host = HostConfig::from_env()?;
    let conf = get_configuration(None).map_err(|e| HostError::Leptos(e.to_string()))?;
    let mut options = conf.leptos_options;
    let addr = host.socket_addr();
    options.site_addr = addr;

    let app = routes::app(options);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| HostError::Bind { addr, source })?;

    tracing::info!(%addr, "fintrack listening");
    axum::serve(listener, app).await.map_err(HostError::Serve)
}
