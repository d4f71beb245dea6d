//! Sync status surfaced to the UI.

use serde::{Deserialize, Serialize};

/// Where the engine currently stands with the remote CMS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPhase {
    /// Nothing in flight and nothing left to report.
    #[default]
    Idle,
    /// An attempt is running.
    Syncing,
    /// The last attempt completed cleanly.
    Success,
    /// The last attempt failed, in whole or in part.
    Error,
}

/// One attempt's visible outcome.
///
/// A new attempt overwrites the previous status; terminal statuses
/// revert to [`SyncPhase::Idle`] on their own after a display window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub phase: SyncPhase,
    /// Human-readable outcome, empty while idle.
    #[serde(default)]
    pub message: String,
}

impl SyncStatus {
    /// Status for an attempt that just started.
    #[must_use]
    pub fn syncing(message: impl Into<String>) -> Self {
        Self {
            phase: SyncPhase::Syncing,
            message: message.into(),
        }
    }

    /// Terminal status for a clean attempt.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            phase: SyncPhase::Success,
            message: message.into(),
        }
    }

    /// Terminal status for a failed attempt.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            phase: SyncPhase::Error,
            message: message.into(),
        }
    }

    /// True while an attempt is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase == SyncPhase::Syncing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_idle() {
        let status = SyncStatus::default();
        assert_eq!(status.phase, SyncPhase::Idle);
        assert!(status.message.is_empty());
        assert!(!status.is_busy());
    }

    #[test]
    fn constructors_set_phase_and_message() {
        assert!(SyncStatus::syncing("pulling").is_busy());
        assert_eq!(SyncStatus::success("done").phase, SyncPhase::Success);
        let err = SyncStatus::error("network error: refused");
        assert_eq!(err.phase, SyncPhase::Error);
        assert_eq!(err.message, "network error: refused");
    }

    #[test]
    fn phase_serializes_lowercase() {
        let json = serde_json::to_string(&SyncPhase::Syncing).unwrap();
        assert_eq!(json, "\"syncing\"");
    }
}
