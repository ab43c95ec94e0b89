/// URL state definitions for tracking crawl progress
use std::fmt;

/// Represents the state of a canonical URL within one crawl session
///
/// Transitions: `Unseen -> Queued -> Visited`, or `Queued -> Failed` when the
/// fetch fails. A URL the permission gate denies goes to `Rejected` and never
/// enters the queue again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    /// Not encountered in this session
    Unseen,

    /// Waiting in the frontier
    Queued,

    /// Fetched successfully; links extracted
    Visited,

    /// Denied by robots.txt
    Rejected,

    /// Fetch attempted and failed; abandoned for this session
    Failed,
}

impl UrlState {
    /// Returns true if the URL may still be admitted to the frontier
    pub fn is_admissible(&self) -> bool {
        matches!(self, Self::Unseen)
    }

    /// Short lowercase name used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::Queued => "queued",
            Self::Visited => "visited",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
