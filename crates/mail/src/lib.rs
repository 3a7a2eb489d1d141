//! Mail crate - Client-side state for the ReachInbox onebox
//!
//! This crate provides platform-independent inbox functionality including:
//! - Domain models (Thread, User, ReplyData, EmailAnalytics)
//! - ReachInbox REST client behind the `MailApi` trait
//! - Thread cache with request fencing and optimistic deletes
//! - Reply composer with a structured draft model
//! - Navigation, session (auth + theme) and display helpers
//!
//! This crate has zero UI dependencies; front ends drive the state objects
//! and render the query types.

pub mod actions;
pub mod api;
pub mod compose;
pub mod config;
pub mod models;
pub mod navigation;
pub mod query;
pub mod session;
pub mod state;

pub use actions::{Onebox, OneboxError, Shortcut};
pub use api::{ApiError, Endpoint, InMemoryMailApi, MailApi, ReachInboxClient};
pub use compose::{
    ComposeError, ComposeOptions, ComposeState, Composer, Draft, Format, TemplateVariable,
};
pub use config::ClientConfig;
pub use models::{
    CategoryBreakdown, EmailAnalytics, Priority, ReplyData, Thread, ThreadId, User,
};
pub use navigation::{Navigator, Screen, View, resolve_route};
pub use query::{InboxCounts, ThreadDetail, ThreadSummary, list_threads};
pub use session::{
    AuthToken, FileStorage, LocalStorage, LoginGrant, MemoryStorage, Session, Theme,
    mock_google_login,
};
pub use state::{
    AnalyticsPanel, AnalyticsState, CacheError, FallbackPolicy, LoadOutcome, SelectOutcome,
    ThreadCache,
};
