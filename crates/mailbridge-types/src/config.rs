//! Configuration schema types.
//!
//! The on-disk format is TOML (loaded by the platform crate), but the
//! schema itself is format-agnostic serde. Every field carries a default
//! so a missing or empty config file behaves identically to no config at
//! all. Unknown fields are silently ignored for forward compatibility.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration for the mail bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Upper bound in seconds for a single registry query or launch.
    /// Operations exceeding it are treated as failed.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Handler-registry tuning.
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl BridgeConfig {
    /// The registry operation deadline as a [`std::time::Duration`].
    pub fn query_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.query_timeout_secs)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            query_timeout_secs: default_query_timeout_secs(),
            registry: RegistryConfig::default(),
        }
    }
}

fn default_query_timeout_secs() -> u64 {
    5
}

// ── Registry ─────────────────────────────────────────────────────────────

/// Settings for the handler registry backing the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Extra directories to scan for application entries, searched before
    /// the standard system locations.
    #[serde(default)]
    pub extra_application_dirs: Vec<PathBuf>,

    /// Include entries marked `NoDisplay=true`. Off by default: such
    /// entries are hidden from menus and usually not meant to be offered.
    #[serde(default)]
    pub include_no_display: bool,

    /// Command used to wrap terminal-only mail clients (e.g. `"xterm -e"`).
    /// When unset, terminal-only handlers are listed but not launchable.
    #[serde(default)]
    pub terminal_command: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            extra_application_dirs: Vec::new(),
            include_no_display: false,
            terminal_command: None,
        }
    }
}
