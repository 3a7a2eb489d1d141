//! Auth and theme session state
//!
//! Persisted only as an opaque token and a theme preference.

mod auth;
mod state;
mod storage;
mod token;

pub use auth::{LoginGrant, mock_google_login};
pub use state::{AUTH_TOKEN_KEY, Session, THEME_KEY, Theme};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
pub use token::{AuthToken, PLACEHOLDER_TOKEN};
