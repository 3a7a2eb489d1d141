//! Process-wide auth and theme state
//!
//! Owned by the application shell and handed to whoever needs it; there is
//! no global singleton.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use super::auth::LoginGrant;
use super::storage::LocalStorage;
use super::token::AuthToken;
use crate::models::User;

/// Storage key of the opaque auth token
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key of the theme preference
pub const THEME_KEY: &str = "theme";

/// Light/dark preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Signed-in user plus theme preference
pub struct Session {
    storage: Arc<dyn LocalStorage>,
    token: AuthToken,
    user: Option<User>,
    theme: Theme,
}

impl Session {
    /// Restore the session from local storage
    ///
    /// A persisted token makes the session authenticated. The user record
    /// itself is not persisted, so it is only known after `login`.
    pub fn init(storage: Arc<dyn LocalStorage>) -> Result<Self> {
        let token = storage.get(AUTH_TOKEN_KEY)?;
        let theme = match storage.get(THEME_KEY)? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!("Ignoring unknown theme preference {:?}", raw);
                Theme::default()
            }),
            None => Theme::default(),
        };

        info!(
            "Session restored ({}, {} theme)",
            if token.is_some() { "signed in" } else { "signed out" },
            theme.as_str()
        );

        Ok(Self {
            storage,
            token: AuthToken::new(token),
            user: None,
            theme,
        })
    }

    /// Handle the API client reads its bearer token from
    pub fn token_handle(&self) -> AuthToken {
        self.token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Store the user and persist the token
    pub fn login(&mut self, grant: LoginGrant) -> Result<()> {
        self.storage.set(AUTH_TOKEN_KEY, &grant.token)?;
        self.token.set(Some(grant.token));
        info!("Signed in as {}", grant.user.email);
        self.user = Some(grant.user);
        Ok(())
    }

    /// Forget the user and the persisted token
    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove(AUTH_TOKEN_KEY)?;
        self.teardown();
        info!("Signed out");
        Ok(())
    }

    /// Drop in-memory auth state without touching storage
    pub fn teardown(&mut self) {
        self.token.set(None);
        self.user = None;
    }

    /// Flip and persist the theme, returning the new value
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.storage.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        Ok(next)
    }

    /// Address replies are sent from
    pub fn reply_sender(&self, fallback: &str) -> String {
        self.user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_else(|| fallback.to_string())
    }
}
