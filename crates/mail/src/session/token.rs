//! Shared bearer token handle

use std::sync::{Arc, RwLock};

/// Sent when no user is signed in
pub const PLACEHOLDER_TOKEN: &str = "your-auth-token";

/// Cloneable handle to the current auth token
///
/// The session writes it on login/logout; the HTTP client reads it on
/// every request.
#[derive(Debug, Clone, Default)]
pub struct AuthToken(Arc<RwLock<Option<String>>>);

impl AuthToken {
    pub fn new(token: Option<String>) -> Self {
        Self(Arc::new(RwLock::new(token)))
    }

    /// Current token, if any
    pub fn get(&self) -> Option<String> {
        self.0.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set(&self, token: Option<String>) {
        if let Ok(mut guard) = self.0.write() {
            *guard = token;
        }
    }

    /// Token to put in the Authorization header
    pub fn bearer(&self) -> String {
        self.get().unwrap_or_else(|| PLACEHOLDER_TOKEN.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = AuthToken::default();
        let reader = token.clone();
        assert_eq!(reader.bearer(), PLACEHOLDER_TOKEN);

        token.set(Some("t-1".to_string()));
        assert_eq!(reader.get().as_deref(), Some("t-1"));

        token.set(None);
        assert_eq!(reader.bearer(), PLACEHOLDER_TOKEN);
    }
}
