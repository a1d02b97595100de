//! Wicket - ledger gateway bootstrap
//!
//! Bootstraps a gateway session from the supplied network profile and holds
//! it until shutdown. Without a profile the process runs degraded:
//! ledger-backed operations unavailable, everything else unaffected.

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wicket::{bootstrap, Args, NetworkConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wicket={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Wicket - Ledger Gateway Bootstrap");
    info!("======================================");
    match &args.network_config {
        Some(path) => info!("Network profile: {}", path.display()),
        None => info!("Network profile: <none> (ledger integration disabled)"),
    }
    if !args.msp_id.is_empty() {
        info!("MSP: {} / user: {}", args.msp_id, args.user);
    }
    info!("======================================");

    // Bootstrap is optional input: no profile means degraded mode, not an
    // error. A failed bootstrap also degrades rather than crashing.
    let session = match &args.network_config {
        Some(path) => match NetworkConfig::from_path(path) {
            Ok(config) => match bootstrap(&config, &args.msp_id, &args.user) {
                Ok(session) => {
                    info!(
                        "Gateway ready: {} as {}@{}",
                        session.peer_endpoint(),
                        args.user,
                        args.msp_id
                    );
                    Some(session)
                }
                Err(e) => {
                    warn!("Gateway bootstrap failed (ledger operations unavailable): {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Network profile unreadable (ledger operations unavailable): {}", e);
                None
            }
        },
        None => None,
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    if let Some(session) = session {
        session.close();
    }

    Ok(())
}
