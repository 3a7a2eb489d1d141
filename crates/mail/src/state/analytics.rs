//! Analytics panel state

use log::{error, info};

use crate::api::{ApiError, MailApi};
use crate::models::EmailAnalytics;

/// Lifecycle of the analytics snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalyticsState {
    #[default]
    NotLoaded,
    Loaded(EmailAnalytics),
    Failed(ApiError),
}

/// Analytics view state, fetched once per visit
#[derive(Debug, Default)]
pub struct AnalyticsPanel {
    state: AnalyticsState,
}

impl AnalyticsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the snapshot unless this visit already has one
    pub fn load(&mut self, api: &dyn MailApi) -> &AnalyticsState {
        if matches!(self.state, AnalyticsState::Loaded(_)) {
            return &self.state;
        }

        self.state = match api.email_analytics() {
            Ok(snapshot) => {
                info!("Loaded analytics ({} emails)", snapshot.total_emails);
                AnalyticsState::Loaded(snapshot)
            }
            Err(e) => {
                error!("Failed to fetch analytics: {}", e);
                AnalyticsState::Failed(e)
            }
        };
        &self.state
    }

    /// Forget the snapshot so the next visit refetches
    pub fn reset(&mut self) {
        self.state = AnalyticsState::NotLoaded;
    }

    pub fn state(&self) -> &AnalyticsState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&EmailAnalytics> {
        match &self.state {
            AnalyticsState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}
