//! Sign-in
//!
//! There is no real OAuth flow: "Continue with Google" hands back a fixed
//! demo account.

use crate::models::User;

const DEMO_EMAIL: &str = "user@example.com";
const DEMO_NAME: &str = "John Doe";
const DEMO_AVATAR: &str = "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=100&h=100&dpr=1";
const DEMO_TOKEN: &str = "mock-token-12345";

/// Result of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub user: User,
    /// Opaque token persisted locally and sent as the bearer token
    pub token: String,
}

/// Sign in with the demo Google account
pub fn mock_google_login() -> LoginGrant {
    LoginGrant {
        user: User::new(DEMO_EMAIL, DEMO_NAME).with_avatar(DEMO_AVATAR),
        token: DEMO_TOKEN.to_string(),
    }
}
