mod config;
mod proxy;
mod routes;

use std::process::ExitCode;

use leptos::prelude::get_configuration;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal outside development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match config::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let leptos_options = match get_configuration(None) {
        Ok(conf) => conf.leptos_options,
        Err(e) => {
            tracing::error!(error = %e, "leptos configuration missing or malformed");
            return ExitCode::FAILURE;
        }
    };

    let proxy = match proxy::ProxyState::new(&config.api_upstream) {
        Ok(proxy) => proxy,
        Err(e) => {
            tracing::error!(error = %e, "api forwarder init failed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(upstream = proxy.upstream(), "forwarding /api");

    let app = routes::app(leptos_options, proxy);
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, port = config.port, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(port = config.port, "portal listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
