//! Implementation of the `paramlayer serve` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use tracing::info;

use super::{ensure_settings_file, settings_figment};
use crate::adapters::http::EnvHttpServer;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::infrastructure::setup::Application;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides http.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides http.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Load the parameter layer before accepting requests
    #[arg(long)]
    pub eager: bool,
}

pub async fn execute(args: ServeArgs, config: Option<&Path>) -> Result<()> {
    ensure_settings_file(config)?;
    let Application {
        mut settings,
        loader,
    } = Application::build(settings_figment(config))?;

    let _logger = LoggerImpl::init(&LogConfig::from(&settings.logging))?;

    if let Some(host) = args.host {
        settings.http.host = host;
    }
    if let Some(port) = args.port {
        settings.http.port = port;
    }

    info!(
        path = %settings.store.path,
        description = %loader.description(),
        layer = %loader.layer_name(),
        "starting parameter layer service"
    );

    if args.eager {
        let snapshot = loader
            .get_all()
            .await
            .context("Failed to load configuration at startup")?;
        info!(keys = snapshot.len(), "parameter layer loaded at startup");
    }

    EnvHttpServer::new(loader, settings.http)
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {e}"))?;

    info!("parameter layer service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
