//! Domain models for inbox entities

mod analytics;
mod reply;
mod thread;
mod user;

pub use analytics::{CategoryBreakdown, EmailAnalytics};
pub use reply::{ReplyData, reply_subject};
pub use thread::{Priority, Thread, ThreadBuilder, ThreadId};
pub use user::User;
