pub mod api;
pub mod normalize;
pub mod state;
pub mod ui;

use std::fmt;

/// Session-level error taxonomy. None of these are fatal: the dashboard
/// stays usable and the triggering action can be retried.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Record fetch or parse failed; filters keep their placeholder domains.
    DataUnavailable(String),
    /// Transport or non-success response from the analytics endpoint;
    /// selection state is unchanged and resubmission is allowed.
    SubmissionFailed(String),
    /// Submission succeeded but returned no items.
    EmptyResult,
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::DataUnavailable(detail) => {
                write!(f, "Data is not available yet: {}", detail)
            }
            DashboardError::SubmissionFailed(detail) => {
                write!(f, "Failed to submit filters: {}", detail)
            }
            DashboardError::EmptyResult => write!(f, "No results, adjust filters"),
        }
    }
}

/// Lifecycle of the one allowed in-flight submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Pending,
    Done(usize),
    Empty,
    Failed(String),
}

impl SubmitStatus {
    /// Only a pending submission blocks a new dispatch; every other status
    /// (including failures) allows a retry.
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmitStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_blocks_dispatch() {
        assert!(SubmitStatus::Pending.is_pending());
        for status in [
            SubmitStatus::Idle,
            SubmitStatus::Done(3),
            SubmitStatus::Empty,
            SubmitStatus::Failed("HTTP 500".to_string()),
        ] {
            assert!(!status.is_pending());
        }
    }
}
