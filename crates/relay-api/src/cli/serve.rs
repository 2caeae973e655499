//! `relay serve`: load config, wire the relay, and run the HTTP server until
//! Ctrl+C or SIGTERM.

use relay_infra::config::load_relay_config;
use relay_types::config::RelayConfig;

use super::ServeArgs;
use crate::http;
use crate::state::AppState;

/// Apply CLI/env overrides on top of the file config.
pub fn apply_overrides(mut config: RelayConfig, args: &ServeArgs) -> RelayConfig {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config
}

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = apply_overrides(load_relay_config(&args.config).await, &args);
    let state = AppState::init(&config)?;
    let shutdown = state.shutdown.clone();

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        %addr,
        purge_scope = %config.purge_scope,
        verify_timeout_ms = config.verify_timeout_ms,
        "Relay listening"
    );
    println!(
        "  {} Realtime relay listening on {}",
        console::style("⚡").bold(),
        console::style(format!("ws://{addr}/ws")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Close live sockets so their transcripts are purged before exit.
            shutdown.cancel();
        })
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
