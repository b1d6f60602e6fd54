//! Refresh scheduler configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the periodic catalog refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Enable/disable the background refresh.
    /// When disabled, refresh only happens on demand.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between two refresh passes.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Run one pass immediately on start instead of waiting a full interval.
    #[serde(default = "default_run_on_start")]
    pub run_on_start: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_interval() -> u64 {
    300 // 5 minutes
}

fn default_run_on_start() -> bool {
    true
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval(),
            run_on_start: default_run_on_start(),
        }
    }
}
