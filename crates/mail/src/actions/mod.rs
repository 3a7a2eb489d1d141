//! Onebox actions
//!
//! Coordinates the remote API, the thread cache and the reply composer for
//! the user-facing operations (open, delete, reply) and their keyboard
//! shortcuts.

mod handler;
mod shortcuts;

pub use handler::{Onebox, OneboxError};
pub use shortcuts::{Shortcut, ShortcutHelp, shortcuts_help};
