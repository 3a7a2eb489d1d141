//! ReachInbox API integration
//!
//! This module provides:
//! - The `MailApi` trait the state layer talks to
//! - An HTTP client for the onebox endpoints
//! - An in-memory implementation for offline use and tests
//! - Classified errors and the fixed demo data set

mod client;
mod error;
mod memory;
pub mod mock;

pub use client::ReachInboxClient;
pub use error::ApiError;
pub use memory::{Endpoint, InMemoryMailApi};

use crate::models::{EmailAnalytics, ReplyData, Thread, ThreadId};

/// Remote mail store operations
///
/// Each call maps to exactly one HTTP request. Implementations report
/// failures; they never substitute demo data.
pub trait MailApi: Send + Sync {
    /// `GET /onebox/list`
    fn list_threads(&self) -> Result<Vec<Thread>, ApiError>;

    /// `GET /onebox/{id}`
    fn get_thread(&self, id: &ThreadId) -> Result<Thread, ApiError>;

    /// `DELETE /onebox/{id}`
    fn delete_thread(&self, id: &ThreadId) -> Result<(), ApiError>;

    /// `POST /reply/{id}`
    fn send_reply(&self, id: &ThreadId, reply: &ReplyData) -> Result<(), ApiError>;

    /// Aggregate statistics
    ///
    /// The service has no analytics endpoint yet, so the default is the
    /// fixed snapshot.
    fn email_analytics(&self) -> Result<EmailAnalytics, ApiError> {
        Ok(mock::mock_analytics())
    }
}

/// API response envelope types
pub mod wire {
    use serde::Deserialize;

    use crate::models::Thread;

    /// Response from `GET /onebox/list`
    #[derive(Debug, Deserialize)]
    pub struct ListThreadsResponse {
        #[serde(default)]
        pub data: Option<Vec<Thread>>,
    }

    /// Response from `GET /onebox/{id}`
    #[derive(Debug, Deserialize)]
    pub struct ThreadResponse {
        #[serde(default)]
        pub data: Option<Thread>,
    }
}
