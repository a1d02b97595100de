//! Configuration for wicket
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::path::PathBuf;

/// Wicket - identity bootstrap and pinned-TLS gateway sessions for
/// permissioned ledger networks
#[derive(Parser, Debug, Clone)]
#[command(name = "wicket")]
#[command(about = "Ledger gateway bootstrap: profile, identity, pinned-TLS session")]
pub struct Args {
    /// Path to the hierarchical network profile (YAML or JSON).
    /// When absent, ledger integration is disabled and the process runs
    /// degraded.
    #[arg(long, env = "NETWORK_CONFIG")]
    pub network_config: Option<PathBuf>,

    /// MSP (organization) identifier to bootstrap under
    #[arg(long, env = "MSP_ID", default_value = "")]
    pub msp_id: String,

    /// Profile user whose cert/key sign gateway calls
    #[arg(long, env = "GATEWAY_USER", default_value = "")]
    pub user: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.network_config.is_some() {
            if self.msp_id.is_empty() {
                return Err("MSP_ID is required when NETWORK_CONFIG is set".to_string());
            }
            if self.user.is_empty() {
                return Err("GATEWAY_USER is required when NETWORK_CONFIG is set".to_string());
            }
        }
        Ok(())
    }
}
