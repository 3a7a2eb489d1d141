//! Query API for UI consumption
//!
//! Provides display-ready views of cached threads and analytics:
//! header counts, list rows, detail headers and number formatting.

mod threads;

pub use threads::{
    InboxCounts, ThreadDetail, ThreadSummary, avatar_initial, format_count, format_detail_time,
    format_list_time, list_threads, plain_text, snippet,
};
