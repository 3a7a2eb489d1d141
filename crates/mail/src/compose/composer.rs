//! Compose modal lifecycle

use log::{debug, info, warn};

use super::draft::Draft;
use crate::api::ApiError;

/// Errors from composer transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("composer is not open")]
    NotOpen,

    #[error("a send is already in progress")]
    SendInProgress,

    #[error("subject is empty")]
    EmptySubject,

    #[error("message body is empty")]
    EmptyBody,
}

/// Where the composer is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeState {
    #[default]
    Closed,
    Open,
    Sending,
}

/// Prefill for a newly opened composer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    pub subject: Option<String>,
    pub to: Option<String>,
}

/// Snapshot of a draft handed to the remote while sending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub to: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Compose modal: `Closed -> Open -> Sending -> Closed`
#[derive(Debug, Default)]
pub struct Composer {
    state: ComposeState,
    draft: Draft,
    to: Option<String>,
    last_error: Option<ApiError>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ComposeState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ComposeState::Closed
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Recipient the draft is addressed to
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// Error from the last failed send, cleared on the next attempt
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Open with a fresh draft; reopening discards the previous one
    pub fn open(&mut self, options: ComposeOptions) -> Result<(), ComposeError> {
        if self.state == ComposeState::Sending {
            return Err(ComposeError::SendInProgress);
        }
        debug!("Opening composer (subject: {:?})", options.subject);
        self.draft = options.subject.map(Draft::with_subject).unwrap_or_default();
        self.to = options.to;
        self.last_error = None;
        self.state = ComposeState::Open;
        Ok(())
    }

    /// Mutable access to the draft; only while open
    pub fn draft_mut(&mut self) -> Result<&mut Draft, ComposeError> {
        match self.state {
            ComposeState::Open => Ok(&mut self.draft),
            ComposeState::Sending => Err(ComposeError::SendInProgress),
            ComposeState::Closed => Err(ComposeError::NotOpen),
        }
    }

    /// Validate the draft and move to `Sending`
    pub fn begin_send(&mut self) -> Result<Outgoing, ComposeError> {
        self.draft_mut()?;
        if self.draft.subject().trim().is_empty() {
            return Err(ComposeError::EmptySubject);
        }
        if self.draft.body().trim().is_empty() {
            return Err(ComposeError::EmptyBody);
        }
        self.state = ComposeState::Sending;
        self.last_error = None;
        Ok(Outgoing {
            to: self.to.clone(),
            subject: self.draft.subject().to_string(),
            body: self.draft.body().to_string(),
        })
    }

    /// The remote accepted the message: clear and close
    pub fn complete_send(&mut self) {
        if self.state != ComposeState::Sending {
            warn!("complete_send called while {:?}", self.state);
            return;
        }
        info!("Reply sent");
        self.reset();
    }

    /// The remote rejected the message: reopen with the draft intact
    pub fn fail_send(&mut self, error: ApiError) {
        if self.state != ComposeState::Sending {
            warn!("fail_send called while {:?}", self.state);
            return;
        }
        warn!("Reply failed: {}", error);
        self.last_error = Some(error);
        self.state = ComposeState::Open;
    }

    /// Discard the draft and close
    pub fn cancel(&mut self) -> Result<(), ComposeError> {
        match self.state {
            ComposeState::Sending => Err(ComposeError::SendInProgress),
            ComposeState::Closed => Ok(()),
            ComposeState::Open => {
                debug!("Composer cancelled");
                self.reset();
                Ok(())
            }
        }
    }

    fn reset(&mut self) {
        self.draft.clear();
        self.to = None;
        self.last_error = None;
        self.state = ComposeState::Closed;
    }
}
