//! Server configuration types
//!
//! Contains all configuration structures for the Parley server.

use parley_core::{Pacing, RelabelPolicy, RelabelScope, SupervisorKind, DEFAULT_THOUGHTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub supervisor: SupervisorConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Copy safe to print: passwords replaced with `********`
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        for password in masked.auth.users.values_mut() {
            *password = "********".to_string();
        }
        masked
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            service_name: default_service_name(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_service_name() -> String {
    "parley".to_string()
}

/// Supervisor selection and thought pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorConfig {
    #[serde(default)]
    pub kind: SupervisorKind,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    #[serde(default = "default_thoughts")]
    pub thoughts: Vec<String>,
    #[serde(default = "default_thought_delay_ms")]
    pub thought_delay_ms: u64,
    #[serde(default)]
    pub thought_jitter_ms: u64,
}

impl SupervisorConfig {
    pub fn pacing(&self) -> Pacing {
        Pacing {
            thought_delay: Duration::from_millis(self.thought_delay_ms),
            jitter: Duration::from_millis(self.thought_jitter_ms),
        }
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            kind: SupervisorKind::default(),
            log_path: default_log_path(),
            thoughts: default_thoughts(),
            thought_delay_ms: default_thought_delay_ms(),
            thought_jitter_ms: 0,
        }
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs.txt")
}
fn default_thoughts() -> Vec<String> {
    DEFAULT_THOUGHTS.iter().map(|t| t.to_string()).collect()
}
fn default_thought_delay_ms() -> u64 {
    500
}

/// Streaming gateway pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_emit_delay_ms")]
    pub emit_delay_ms: u64,
}

impl GatewayConfig {
    pub fn emit_delay(&self) -> Duration {
        Duration::from_millis(self.emit_delay_ms)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            emit_delay_ms: default_emit_delay_ms(),
        }
    }
}

fn default_emit_delay_ms() -> u64 {
    100
}

/// Trace display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default)]
    pub relabel: RelabelScope,
    #[serde(default = "default_recent")]
    pub recent_default: usize,
}

impl TraceConfig {
    pub fn relabel_policy(&self) -> RelabelPolicy {
        RelabelPolicy::new(&self.sentinel, &self.display_name, self.relabel)
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
            display_name: default_display_name(),
            relabel: RelabelScope::default(),
            recent_default: default_recent(),
        }
    }
}

fn default_sentinel() -> String {
    parley_core::relabel::DEFAULT_SENTINEL.to_string()
}
fn default_display_name() -> String {
    parley_core::relabel::DEFAULT_DISPLAY_NAME.to_string()
}
fn default_recent() -> usize {
    10
}

/// Login gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Static credential table: username → password
    #[serde(default = "default_users")]
    pub users: BTreeMap<String, String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            users: default_users(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_users() -> BTreeMap<String, String> {
    BTreeMap::from([("admin".to_string(), "admin123".to_string())])
}

/// File logging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily rolling log files; console only when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}
