//! Client-side view state
//!
//! Holds the thread list, the current selection and the analytics panel,
//! and reconciles them with remote responses.

pub mod analytics;
mod cache;
mod fence;

pub use analytics::{AnalyticsPanel, AnalyticsState};
pub use cache::{CacheError, LoadOutcome, Removal, SelectOutcome, ThreadCache};
pub use fence::{RequestFence, Ticket};

/// What to do when a remote read fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Serve the fixed demo threads and report the cause alongside
    #[default]
    MockData,
    /// Keep the current state and return the error
    Surface,
}
