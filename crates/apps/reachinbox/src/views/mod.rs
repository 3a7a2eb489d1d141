//! Text renderings of the dashboard screens
//!
//! Each view writes to any `io::Write` so the shell and tests share them.

pub mod analytics;
pub mod compose;
pub mod inbox;
pub mod login;
pub mod sidebar;
pub mod thread;
