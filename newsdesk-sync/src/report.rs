//! Per-pass outcome counters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What one pull pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullSummary {
    /// Remote posts that became new local items.
    pub created: usize,
    /// Local items overwritten by newer remote content.
    pub updated: usize,
    /// Matched items left alone: the remote copy was no newer.
    pub unchanged: usize,
    /// Posts skipped because conversion or merge failed.
    pub failed: usize,
}

impl PullSummary {
    /// Items the pass actually changed, created or updated.
    #[must_use]
    pub fn merged(&self) -> usize {
        self.created + self.updated
    }
}

impl fmt::Display for PullSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} merged, {} failed", self.merged(), self.failed)
    }
}

/// What one push pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSummary {
    /// Items created remotely and linked.
    pub created: usize,
    /// Items whose remote copy was updated in place.
    pub updated: usize,
    /// Items the remote already had the newest version of.
    pub skipped: usize,
    /// Items whose push failed.
    pub failed: usize,
}

impl PushSummary {
    /// Items the pass actually wrote remotely.
    #[must_use]
    pub fn pushed(&self) -> usize {
        self.created + self.updated
    }
}

impl fmt::Display for PushSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pushed, {} failed", self.pushed(), self.failed)
    }
}

/// Combined outcome of a bidirectional pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub pull: PullSummary,
    pub push: PushSummary,
}

impl SyncReport {
    /// True when nothing failed in either direction.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.pull.failed == 0 && self.push.failed == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pull: {}; push: {}", self.pull, self.push)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_summary_reads_as_merged_and_failed() {
        let summary = PullSummary {
            created: 1,
            updated: 1,
            unchanged: 4,
            failed: 1,
        };
        assert_eq!(summary.merged(), 2);
        assert_eq!(summary.to_string(), "2 merged, 1 failed");
    }

    #[test]
    fn report_combines_both_directions() {
        let report = SyncReport {
            pull: PullSummary {
                updated: 3,
                ..PullSummary::default()
            },
            push: PushSummary {
                created: 2,
                failed: 1,
                ..PushSummary::default()
            },
        };
        assert!(!report.is_clean());
        assert_eq!(report.to_string(), "pull: 3 merged, 0 failed; push: 2 pushed, 1 failed");
    }
}
