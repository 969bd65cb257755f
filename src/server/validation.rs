//! Configuration validation
//!
//! Rejects configurations the server cannot run with and warns about
//! risky ones in production.

use super::config::AppConfig;
use anyhow::{bail, Result};
use tracing::warn;

/// Upper bound for any pacing delay
pub const MAX_DELAY_MS: u64 = 60_000;

/// Validate configuration before the server starts
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        bail!("server.port must be non-zero");
    }

    for (key, value) in [
        ("supervisor.thought_delay_ms", config.supervisor.thought_delay_ms),
        ("supervisor.thought_jitter_ms", config.supervisor.thought_jitter_ms),
        ("gateway.emit_delay_ms", config.gateway.emit_delay_ms),
    ] {
        if value > MAX_DELAY_MS {
            bail!("{} must be at most {} (got {})", key, MAX_DELAY_MS, value);
        }
    }

    if config.trace.sentinel.trim().is_empty() {
        bail!("trace.sentinel must not be empty");
    }
    if config.trace.display_name.trim().is_empty() {
        bail!("trace.display_name must not be empty");
    }

    if config.auth.enabled && config.auth.users.is_empty() {
        warn!("Authentication is enabled but auth.users is empty; nobody can log in");
    }

    warn_production(config);
    Ok(())
}

fn warn_production(config: &AppConfig) {
    let is_production = std::env::var("PARLEY_ENV")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false);

    if !is_production {
        return;
    }

    if !config.auth.enabled && config.server.host != "127.0.0.1" {
        warn!(
            "SECURITY WARNING: Authentication is DISABLED while server is exposed externally. \
             Set [auth] enabled = true in production!"
        );
    }

    if config.auth.users.get("admin").map(String::as_str) == Some("admin123") {
        warn!("SECURITY WARNING: The default admin password is in use in production.");
    }
}
