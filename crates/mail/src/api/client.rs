//! ReachInbox HTTP client
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::wire::{ListThreadsResponse, ThreadResponse};
use super::{ApiError, MailApi};
use crate::config::ClientConfig;
use crate::models::{ReplyData, Thread, ThreadId};
use crate::session::AuthToken;

/// HTTP client for the onebox and reply endpoints
pub struct ReachInboxClient {
    agent: ureq::Agent,
    base_url: String,
    token: AuthToken,
}

impl ReachInboxClient {
    /// Create a new client
    ///
    /// `token` is read on every request, so logging in or out takes effect
    /// without rebuilding the client.
    pub fn new(config: &ClientConfig, token: AuthToken) -> Result<Self> {
        config.validate()?;
        let parsed = Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid API base URL: {}", config.api_base_url))?;
        if parsed.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry paths: {}", config.api_base_url);
        }

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        info!("API client targeting {}", config.api_base_url);
        Ok(Self {
            agent,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn thread_url(&self, prefix: &str, id: &ThreadId) -> String {
        self.url(&format!("{}/{}", prefix, urlencoding::encode(id.as_str())))
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.token.bearer())
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        thread: Option<&ThreadId>,
    ) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let mut response = self
            .agent
            .get(url)
            .header("Authorization", &self.authorization())
            .header("Content-Type", "application/json")
            .call()
            .map_err(|e| classify(e, thread))?;

        response
            .body_mut()
            .read_json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Turn a ureq failure into the error taxonomy
fn classify(err: ureq::Error, thread: Option<&ThreadId>) -> ApiError {
    match err {
        ureq::Error::StatusCode(code) => ApiError::from_status(code, thread),
        other => ApiError::Transport(other.to_string()),
    }
}

impl MailApi for ReachInboxClient {
    fn list_threads(&self) -> Result<Vec<Thread>, ApiError> {
        let list: ListThreadsResponse = self.get_json(&self.url("/onebox/list"), None)?;
        Ok(list.data.unwrap_or_default())
    }

    fn get_thread(&self, id: &ThreadId) -> Result<Thread, ApiError> {
        let url = self.thread_url("/onebox", id);
        let response: ThreadResponse = self.get_json(&url, Some(id))?;
        response.data.ok_or_else(|| ApiError::NotFound(id.clone()))
    }

    fn delete_thread(&self, id: &ThreadId) -> Result<(), ApiError> {
        let url = self.thread_url("/onebox", id);
        debug!("DELETE {}", url);
        self.agent
            .delete(&url)
            .header("Authorization", &self.authorization())
            .header("Content-Type", "application/json")
            .call()
            .map_err(|e| classify(e, Some(id)))?;
        Ok(())
    }

    fn send_reply(&self, id: &ThreadId, reply: &ReplyData) -> Result<(), ApiError> {
        let url = self.thread_url("/reply", id);
        debug!("POST {}", url);
        self.agent
            .post(&url)
            .header("Authorization", &self.authorization())
            .send_json(reply)
            .map_err(|e| classify(e, Some(id)))?;
        Ok(())
    }
}
