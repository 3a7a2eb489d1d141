//! In-memory MailApi implementation
//!
//! Serves threads from a local list. Used for offline runs and tests;
//! individual endpoints can be made to fail on demand.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{ApiError, MailApi};
use crate::models::{ReplyData, Thread, ThreadId};

/// One remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List,
    Get,
    Delete,
    Reply,
}

/// In-memory mail API
#[derive(Default)]
pub struct InMemoryMailApi {
    threads: RwLock<Vec<Thread>>,
    failures: RwLock<HashMap<Endpoint, ApiError>>,
    replies: RwLock<Vec<(ThreadId, ReplyData)>>,
    calls: RwLock<HashMap<Endpoint, usize>>,
}

impl InMemoryMailApi {
    /// Create an empty API
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an API serving the given threads
    pub fn with_threads(threads: Vec<Thread>) -> Self {
        let api = Self::new();
        api.set_threads(threads);
        api
    }

    /// Replace the served threads
    pub fn set_threads(&self, threads: Vec<Thread>) {
        *self.threads.write().unwrap_or_else(PoisonError::into_inner) = threads;
    }

    /// Threads currently held remotely
    pub fn threads(&self) -> Vec<Thread> {
        self.threads.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Make every call to `endpoint` fail with `error`
    pub fn fail(&self, endpoint: Endpoint, error: ApiError) {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(endpoint, error);
    }

    /// Stop failing calls to `endpoint`
    pub fn recover(&self, endpoint: Endpoint) {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&endpoint);
    }

    /// Replies accepted so far
    pub fn replies(&self) -> Vec<(ThreadId, ReplyData)> {
        self.replies.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of calls made to `endpoint`, failed ones included
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&endpoint)
            .copied()
            .unwrap_or(0)
    }

    fn enter(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        *self
            .calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(endpoint)
            .or_default() += 1;
        let failures = self.failures.read().unwrap_or_else(PoisonError::into_inner);
        match failures.get(&endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl MailApi for InMemoryMailApi {
    fn list_threads(&self) -> Result<Vec<Thread>, ApiError> {
        self.enter(Endpoint::List)?;
        Ok(self.threads())
    }

    fn get_thread(&self, id: &ThreadId) -> Result<Thread, ApiError> {
        self.enter(Endpoint::Get)?;
        self.threads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.clone()))
    }

    fn delete_thread(&self, id: &ThreadId) -> Result<(), ApiError> {
        self.enter(Endpoint::Delete)?;
        let mut threads = self.threads.write().unwrap_or_else(PoisonError::into_inner);
        let before = threads.len();
        threads.retain(|t| &t.id != id);
        if threads.len() == before {
            return Err(ApiError::NotFound(id.clone()));
        }
        Ok(())
    }

    fn send_reply(&self, id: &ThreadId, reply: &ReplyData) -> Result<(), ApiError> {
        self.enter(Endpoint::Reply)?;
        self.replies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id.clone(), reply.clone()));
        Ok(())
    }
}
