//! # glowbridged — fulfillment daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the cloud client and report-state publisher (adapters)
//! - Construct the fulfillment service, injecting adapters via port traits
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use glowbridge_adapter_cloud_reqwest::{CloudClient, HomeGraphPublisher};
use glowbridge_adapter_http_axum::state::AppState;
use glowbridge_app::services::fulfillment_service::FulfillmentService;
use glowbridge_domain::id::BearerToken;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Adapters
    let cloud = CloudClient::new(&config.cloud)?;
    let publisher = match &config.platform.report_state_url {
        Some(url) => Some(HomeGraphPublisher::new(
            url.clone(),
            config.platform.report_state_token.clone().map(BearerToken::new),
            config.cloud.request_timeout(),
        )?),
        None => {
            tracing::info!("no report_state_url configured, report state pushes disabled");
            None
        }
    };

    // Services
    let fulfillment = FulfillmentService::new(cloud, publisher, config.sync_settings());

    // HTTP
    let app = glowbridge_adapter_http_axum::router::build(AppState::new(fulfillment));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        cloud = %config.cloud.base_url,
        "glowbridged listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("glowbridged stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
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
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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
