//! # iotfleetd — fleet dashboard daemon
//!
//! Composition root that wires the management API adapter into the
//! dashboard server.
//!
//! ## Responsibilities
//! - Load configuration (`iotfleet.toml`, environment overrides)
//! - Initialise `tracing` with the configured filter
//! - Construct the management API client, or the in-memory demo backend
//! - Construct application services, injecting the client via port traits
//! - Build the axum router, bind the TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use iotfleet_adapter_http_axum::router;
use iotfleet_adapter_http_axum::state::AppState;
use iotfleet_adapter_iotronic::IotronicClient;
use iotfleet_adapter_memory::InMemoryIotronic;
use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_app::services::fleet_service::FleetService;
use iotfleet_app::services::plugin_action_service::PluginActionService;
use iotfleet_app::services::status_reconciler::StatusReconciler;
use tracing_subscriber::EnvFilter;

use crate::config::{Backend, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("unable to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter `{}`", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match config.backend {
        Backend::Iotronic => {
            let client = IotronicClient::new(&config.iotronic)
                .context("unable to build management API client")?;
            tracing::info!(base_url = %config.iotronic.base_url, "using remote management API");
            serve(&config, client).await
        }
        Backend::Demo => {
            tracing::info!("using in-memory demo backend");
            serve(&config, InMemoryIotronic::demo()).await
        }
    }
}

async fn serve<G>(config: &Config, gateway: G) -> anyhow::Result<()>
where
    G: FleetGateway + BoardGateway + PluginGateway + Send + Sync + 'static,
{
    let gateway = Arc::new(gateway);

    let state = AppState::new(
        FleetService::new(Arc::clone(&gateway)),
        StatusReconciler::new(Arc::clone(&gateway), Arc::clone(&gateway))
            .with_call_timeout(config.call_timeout()),
        PluginActionService::new(gateway),
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("unable to bind {bind_addr}"))?;
    tracing::info!("iotfleetd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("iotfleetd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for ctrl-c");
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
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
