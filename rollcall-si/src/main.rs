//! rollcall-si (Scan Intake) - RFID attendance scan service
//!
//! Receives tag scans from reader devices, resolves them to enrolled
//! persons, applies sign-in/sign-out transitions to the daily attendance
//! ledger and queues each outcome for device polling.

use anyhow::Result;
use clap::Parser;
use rollcall_common::config::{Config, ConfigFile};
use rollcall_si::mailbox::DeviceMailbox;
use rollcall_si::notify::AlertNotifier;
use rollcall_si::{build_router, AppState};
use std::path::PathBuf;
use tracing::info;

/// Scan Intake service for the Rollcall attendance system
#[derive(Parser, Debug)]
#[command(name = "rollcall-si", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, env = "ROLLCALL_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP listen port (overrides config file)
    #[arg(short, long, env = "ROLLCALL_PORT")]
    port: Option<u16>,

    /// SQLite database path (overrides config file)
    #[arg(short, long, env = "ROLLCALL_DB")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Rollcall Scan Intake (rollcall-si) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let file = match args.config.clone().or_else(ConfigFile::default_path) {
        Some(path) => {
            info!("Config file: {}", path.display());
            ConfigFile::load(&path)?
        }
        None => ConfigFile::default(),
    };
    let config = Config::resolve(file, args.port, args.database);

    let pool = rollcall_common::db::init_database(&config.database).await?;
    info!("Database ready: {}", config.database.display());

    let mailbox = DeviceMailbox::new(pool.clone(), config.mailbox_ttl_secs);
    let notifier = AlertNotifier::new(config.alert_webhook_url.clone())?;
    if notifier.is_enabled() {
        info!("Cross-tenant mismatch alerts enabled");
    }

    let state = AppState::new(pool, mailbox, notifier);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("rollcall-si listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
