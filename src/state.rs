/// Work item status definitions for tracking pipeline progress
///
/// Every discovered category carries exactly one of these statuses. There is
/// deliberately no in-progress state: the pipeline has a single consumer, so a
/// crash mid-item leaves it `Pending` and the next run retries it from scratch.
use std::fmt;

/// Status of a category in the work queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkStatus {
    /// Category is waiting to be processed
    Pending,

    /// Processing yielded at least one persisted product record
    Processed,

    /// Processing yielded no records or the page could not be rendered
    Failed,
}

impl WorkStatus {
    /// Returns true if this is a terminal status for the current run
    ///
    /// Only the global reset at run start moves an item out of a terminal
    /// status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Converts the status to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its database string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processed" => Some(Self::Processed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns all possible statuses
    pub fn all_statuses() -> Vec<Self> {
        vec![Self::Pending, Self::Processed, Self::Failed]
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}
