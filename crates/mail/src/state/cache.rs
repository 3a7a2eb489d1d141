//! Thread list and selection
//!
//! The cache is the single owner of the thread list for the active mailbox.
//! Remote results are applied through request fences so that only the
//! latest response of each kind lands.

use log::{debug, error, info, warn};

use super::FallbackPolicy;
use super::fence::{RequestFence, Ticket};
use crate::api::mock::{mock_thread, mock_threads};
use crate::api::{ApiError, MailApi};
use crate::models::{Thread, ThreadId};

/// Errors from cache operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("thread {0} is not in the list")]
    UnknownThread(ThreadId),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// How a list load was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list now equals the remote response
    Remote { count: usize },
    /// The remote call failed; the demo threads were installed instead
    Fallback { cause: ApiError },
    /// A newer load was issued; this response was dropped
    Stale,
}

/// How a selection was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Full detail fetched from the remote
    Detail,
    /// Detail fetch failed; the demo copy of the thread is shown
    MockDetail { cause: ApiError },
    /// Detail fetch failed; the list summary is shown
    Summary { cause: ApiError },
    /// A newer selection was issued, or the thread is gone
    Stale,
}

/// An optimistically removed entry, kept so it can be put back
#[derive(Debug, Clone)]
pub struct Removal {
    index: usize,
    thread: Thread,
    selection: Option<Thread>,
}

impl Removal {
    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    /// Whether the removed thread was the selection
    pub fn was_selected(&self) -> bool {
        self.selection.is_some()
    }
}

/// Ordered thread list plus the current selection
pub struct ThreadCache {
    threads: Vec<Thread>,
    /// Detail of the selected thread; its id always refers to a listed thread
    selected: Option<Thread>,
    /// Local star on the open thread; not sent to the remote
    starred: bool,
    policy: FallbackPolicy,
    load_fence: RequestFence,
    select_fence: RequestFence,
    loading: bool,
    last_error: Option<ApiError>,
}

impl ThreadCache {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            threads: Vec::new(),
            selected: None,
            starred: false,
            policy,
            load_fence: RequestFence::new(),
            select_fence: RequestFence::new(),
            loading: false,
            last_error: None,
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Threads in arrival order
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn get(&self, id: &ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &ThreadId) -> bool {
        self.position(id).is_some()
    }

    pub fn unread_count(&self) -> usize {
        self.threads.iter().filter(|t| !t.is_read).count()
    }

    /// Detail of the selected thread
    pub fn selected(&self) -> Option<&Thread> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&ThreadId> {
        self.selected.as_ref().map(|t| &t.id)
    }

    /// Whether the open thread is starred
    pub fn is_starred(&self) -> bool {
        self.starred && self.selected.is_some()
    }

    /// Flip the star on the open thread, returning the new value
    pub fn toggle_star(&mut self) -> Option<bool> {
        self.selected.as_ref()?;
        self.starred = !self.starred;
        Some(self.starred)
    }

    /// Whether a list load is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Most recent remote failure, cleared by the next successful load
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    fn position(&self, id: &ThreadId) -> Option<usize> {
        self.threads.iter().position(|t| &t.id == id)
    }

    // === List loading ===

    /// Issue a load; only the newest ticket's response will be applied
    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.load_fence.issue()
    }

    /// Apply a list response
    pub fn apply_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Thread>, ApiError>,
    ) -> Result<LoadOutcome, CacheError> {
        if !self.load_fence.is_current(ticket) {
            debug!("Discarding stale thread list (request #{})", ticket.sequence());
            return Ok(LoadOutcome::Stale);
        }
        self.loading = false;

        match result {
            Ok(threads) => {
                let count = threads.len();
                info!("Loaded {} threads", count);
                self.replace(threads);
                self.last_error = None;
                Ok(LoadOutcome::Remote { count })
            }
            Err(cause) => match self.policy {
                FallbackPolicy::MockData => {
                    warn!("Failed to fetch threads ({}), serving demo data", cause);
                    self.replace(mock_threads());
                    self.last_error = Some(cause.clone());
                    Ok(LoadOutcome::Fallback { cause })
                }
                FallbackPolicy::Surface => {
                    error!("Failed to fetch threads: {}", cause);
                    self.last_error = Some(cause.clone());
                    Err(cause.into())
                }
            },
        }
    }

    /// Replace the list from the remote
    pub fn load(&mut self, api: &dyn MailApi) -> Result<LoadOutcome, CacheError> {
        let ticket = self.begin_load();
        let result = api.list_threads();
        self.apply_load(ticket, result)
    }

    fn replace(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
        if let Some(id) = self.selected_id().cloned()
            && !self.contains(&id)
        {
            debug!("Selected thread {} no longer listed, clearing selection", id);
            self.selected = None;
        }
    }

    // === Selection ===

    /// Issue a detail fetch for a listed thread
    pub fn begin_select(&mut self, id: &ThreadId) -> Result<Ticket, CacheError> {
        if !self.contains(id) {
            return Err(CacheError::UnknownThread(id.clone()));
        }
        Ok(self.select_fence.issue())
    }

    /// Apply a detail response and mark the thread read
    pub fn apply_select(
        &mut self,
        ticket: Ticket,
        id: &ThreadId,
        result: Result<Thread, ApiError>,
    ) -> Result<SelectOutcome, CacheError> {
        if !self.select_fence.is_current(ticket) {
            debug!("Discarding stale detail for thread {}", id);
            return Ok(SelectOutcome::Stale);
        }
        let Some(index) = self.position(id) else {
            debug!("Thread {} was removed while its detail loaded", id);
            return Ok(SelectOutcome::Stale);
        };

        let (mut detail, outcome) = match result {
            Ok(thread) => (thread, SelectOutcome::Detail),
            Err(cause) => {
                warn!("Failed to fetch thread {}: {}", id, cause);
                match (self.policy, mock_thread(id)) {
                    (FallbackPolicy::MockData, Some(mock)) => {
                        (mock, SelectOutcome::MockDetail { cause })
                    }
                    _ => (self.threads[index].clone(), SelectOutcome::Summary { cause }),
                }
            }
        };

        // Read state only moves forward
        self.threads[index].is_read = true;
        detail.is_read = true;
        self.selected = Some(detail);
        self.starred = false;
        Ok(outcome)
    }

    /// Fetch a listed thread's detail and select it
    pub fn select(&mut self, id: &ThreadId, api: &dyn MailApi) -> Result<SelectOutcome, CacheError> {
        let ticket = self.begin_select(id)?;
        let result = api.get_thread(id);
        self.apply_select(ticket, id, result)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.starred = false;
    }

    // === Removal ===

    /// Remove a thread locally, clearing the selection if it pointed at it
    pub fn remove_local(&mut self, id: &ThreadId) -> Option<Removal> {
        let index = self.position(id)?;
        let thread = self.threads.remove(index);
        let selection = if self.selected_id() == Some(id) {
            self.selected.take()
        } else {
            None
        };
        Some(Removal {
            index,
            thread,
            selection,
        })
    }

    /// Undo a `remove_local`
    ///
    /// The entry goes back to its old index (clamped to the current length).
    /// The selection is only restored if nothing else was selected since.
    pub fn restore(&mut self, removal: Removal) {
        if self.contains(&removal.thread.id) {
            return;
        }
        let index = removal.index.min(self.threads.len());
        self.threads.insert(index, removal.thread);
        if self.selected.is_none() {
            self.selected = removal.selection;
        }
    }

    /// Remove a thread locally and remotely
    ///
    /// Returns `Ok(None)` without contacting the remote when the thread is
    /// not listed. On remote failure the local removal is rolled back.
    pub fn remove(&mut self, id: &ThreadId, api: &dyn MailApi) -> Result<Option<Thread>, CacheError> {
        let Some(removal) = self.remove_local(id) else {
            debug!("Thread {} not listed, nothing to delete", id);
            return Ok(None);
        };

        info!("Deleting thread {}", id);
        match api.delete_thread(id) {
            Ok(()) => {
                info!("Deleted thread {}", id);
                Ok(Some(removal.thread))
            }
            Err(cause) => {
                warn!("Failed to delete thread {} ({}), restoring it", id, cause);
                self.restore(removal);
                self.last_error = Some(cause.clone());
                Err(cause.into())
            }
        }
    }

    /// Drop every in-flight response (the view is going away)
    pub fn invalidate_pending(&mut self) {
        self.load_fence.invalidate();
        self.select_fence.invalidate();
        self.loading = false;
    }
}

impl Default for ThreadCache {
    fn default() -> Self {
        Self::new(FallbackPolicy::default())
    }
}
