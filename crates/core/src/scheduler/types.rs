//! Types for the refresh scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::RefreshReport;

/// Current status of the refresh scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerStatus {
    /// Whether the background loop is running.
    pub running: bool,
    /// Completed passes, successful or not.
    pub passes: u64,
    /// When the last pass finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_at: Option<DateTime<Utc>>,
    /// Outcome of the last successful pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_report: Option<RefreshReport>,
    /// Error of the last pass, cleared by the next success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
