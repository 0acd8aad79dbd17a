use std::net::SocketAddr;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use care_monitor_api::api::{create_application, AppState};
use care_monitor_api::config::ServerConfig;
use care_monitor_data::database::{DatabaseConfig, DatabasePool};
use care_monitor_data::mail::MailConfig;
use care_monitor_data::speech::SpeechConfig;

/// The main entry point for the CareMonitor server
///
/// Loads `.env`, sets up tracing, opens the SQLite pool (creating the table
/// if needed), wires the services and serves until Ctrl+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    info!("Starting CareMonitor server");

    let server_config = ServerConfig::from_env().context("PORT must be a number")?;

    let db_config = DatabaseConfig::from_env();
    let pool = DatabasePool::new(&db_config).context("Failed to open the health record store")?;
    info!("Using {}", pool.connection_info());

    // Alerts can still be configured later; only warn at startup
    if let Err(e) = MailConfig::from_env() {
        warn!("Fall alerts will fail until configured: {}", e);
    }

    let speech_config = SpeechConfig::from_env();
    info!("Speaking reminders with {}", speech_config.binary);

    let state = AppState::new(pool, speech_config, server_config.templates_dir.clone());
    let app = create_application(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutting down server...");
}
