mod config;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use padbot_api::{ControllerAdapter, HttpApi};
use padbot_client::{RobotApi, RobotClient};
use padbot_core::{RobotController, Subscribe};
use padbot_observe::{Journal, logger_init};

use crate::config::{AppConfig, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Config
    let cli = Cli::parse();
    let mut cfg = AppConfig::load(&cli.config)?;
    cfg.apply_cli(&cli);
    cfg.validate()?;

    // 2) Logger
    logger_init(&cfg.logger)?;
    info!(config = %cli.config.display(), "logger initialized");

    // 3) Robot client
    let client = RobotClient::new(&cfg.client)?;
    let health = client.health().await;
    if health.is_available() {
        info!(robot = %cfg.client.base_url(), "robot reachable");
    } else {
        warn!(
            robot = %cfg.client.base_url(),
            has_error = health.has_error,
            detail = health.detail.as_deref().unwrap_or(""),
            "robot not available; continuing"
        );
    }

    // 4) Controller
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Journal::new())];
    let controller = RobotController::new(Arc::new(client), cfg.controller_config(), subscribers)?;

    // 5) HTTP surface
    let router = HttpApi::new(Arc::new(ControllerAdapter::new(controller.clone()))).router();
    let listener = tokio::net::TcpListener::bind(cfg.api.listen).await?;
    info!(listen = %cfg.api.listen, "http api listening");
    info!("press Ctrl+C to stop");

    // 6) Run until Ctrl+C
    padbot_api::axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
            }
        })
        .await?;

    info!("shutting down, waiting for running operations...");
    controller.shutdown().await;
    info!("stopped");
    Ok(())
}
