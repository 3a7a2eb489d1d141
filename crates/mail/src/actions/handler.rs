//! Onebox coordinator
//!
//! Applies user actions to local state and the remote store:
//! 1. Update the thread cache (optimistically for deletes)
//! 2. Call the remote API
//! 3. Reconcile, rolling back when the remote refuses

use log::{debug, info};
use std::sync::Arc;

use super::shortcuts::Shortcut;
use crate::api::{ApiError, MailApi};
use crate::compose::{ComposeError, ComposeOptions, Composer};
use crate::models::{ReplyData, Thread, ThreadId, reply_subject};
use crate::state::{CacheError, FallbackPolicy, LoadOutcome, SelectOutcome, ThreadCache};

/// Errors from onebox actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OneboxError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no thread selected")]
    NoSelection,
}

impl OneboxError {
    /// The underlying remote failure, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            OneboxError::Api(e) | OneboxError::Cache(CacheError::Api(e)) => Some(e),
            _ => None,
        }
    }
}

/// The inbox view: thread list, selection and reply composer
pub struct Onebox {
    api: Arc<dyn MailApi>,
    cache: ThreadCache,
    composer: Composer,
    /// Thread the open composer replies to
    reply_to: Option<ThreadId>,
}

impl Onebox {
    pub fn new(api: Arc<dyn MailApi>, policy: FallbackPolicy) -> Self {
        Self {
            api,
            cache: ThreadCache::new(policy),
            composer: Composer::new(),
            reply_to: None,
        }
    }

    pub fn api(&self) -> &Arc<dyn MailApi> {
        &self.api
    }

    pub fn cache(&self) -> &ThreadCache {
        &self.cache
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Direct access for draft edits
    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Thread the composer is replying to
    pub fn reply_target(&self) -> Option<&ThreadId> {
        self.reply_to.as_ref()
    }

    /// Reload the thread list
    pub fn refresh(&mut self) -> Result<LoadOutcome, OneboxError> {
        Ok(self.cache.load(self.api.as_ref())?)
    }

    /// Select a thread and fetch its detail
    pub fn open_thread(&mut self, id: &ThreadId) -> Result<SelectOutcome, OneboxError> {
        Ok(self.cache.select(id, self.api.as_ref())?)
    }

    /// Delete a thread; `Ok(None)` if it was not listed
    pub fn delete_thread(&mut self, id: &ThreadId) -> Result<Option<Thread>, OneboxError> {
        Ok(self.cache.remove(id, self.api.as_ref())?)
    }

    /// Delete the selected thread
    pub fn delete_selected(&mut self) -> Result<Thread, OneboxError> {
        let id = self
            .cache
            .selected_id()
            .cloned()
            .ok_or(OneboxError::NoSelection)?;
        self.delete_thread(&id)?.ok_or(OneboxError::NoSelection)
    }

    /// Star or unstar the selected thread, returning the new value
    pub fn toggle_star(&mut self) -> Result<bool, OneboxError> {
        self.cache.toggle_star().ok_or(OneboxError::NoSelection)
    }

    /// Open the composer as a reply to the selected thread
    pub fn start_reply(&mut self) -> Result<(), OneboxError> {
        let thread = self.cache.selected().ok_or(OneboxError::NoSelection)?;
        let id = thread.id.clone();
        let options = ComposeOptions {
            subject: Some(reply_subject(&thread.subject)),
            to: Some(thread.from_email.clone()),
        };
        self.composer.open(options)?;
        debug!("Replying to thread {}", id);
        self.reply_to = Some(id);
        Ok(())
    }

    /// Send the open reply as `from`
    ///
    /// On failure the composer stays open with the draft intact.
    pub fn send_reply(&mut self, from: &str) -> Result<(), OneboxError> {
        let id = self.reply_to.clone().ok_or(OneboxError::NoSelection)?;
        let outgoing = self.composer.begin_send()?;
        let reply = ReplyData {
            from: from.to_string(),
            to: outgoing.to.unwrap_or_default(),
            subject: reply_subject(&outgoing.subject),
            body: outgoing.body,
        };

        info!("Sending reply to thread {}", id);
        match self.api.send_reply(&id, &reply) {
            Ok(()) => {
                self.composer.complete_send();
                self.reply_to = None;
                Ok(())
            }
            Err(e) => {
                self.composer.fail_send(e.clone());
                Err(e.into())
            }
        }
    }

    /// Close the composer, discarding the draft
    pub fn cancel_reply(&mut self) -> Result<(), OneboxError> {
        self.composer.cancel()?;
        self.reply_to = None;
        Ok(())
    }

    /// Run a keyboard shortcut; returns whether it did anything
    ///
    /// While the composer is open keys go to the editor, so only `Dismiss`
    /// is honoured. Delete and reply are ignored without a selection.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> Result<bool, OneboxError> {
        if shortcut.needs_selection()
            && (self.composer.is_open() || self.cache.selected().is_none())
        {
            debug!("Ignoring {:?}", shortcut);
            return Ok(false);
        }
        match shortcut {
            Shortcut::Delete => self.delete_selected().map(|_| true),
            Shortcut::Reply => self.start_reply().map(|_| true),
            Shortcut::Dismiss => {
                let was_open = self.composer.is_open();
                self.cancel_reply()?;
                Ok(was_open)
            }
        }
    }

    /// Drop in-flight responses (the inbox is no longer shown)
    pub fn invalidate_pending(&mut self) {
        self.cache.invalidate_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Endpoint, InMemoryMailApi};
    use crate::compose::{ComposeState, TemplateVariable};
    use crate::models::Priority;

    fn thread(id: &str, subject: &str, is_read: bool) -> Thread {
        Thread::builder(id)
            .from("Jeanne", format!("{}@icloud.com", id))
            .subject(subject)
            .body("<p>Hello</p>")
            .read(is_read)
            .priority(Priority::Medium)
            .build()
    }

    fn onebox(threads: Vec<Thread>) -> (Onebox, Arc<InMemoryMailApi>) {
        let api = Arc::new(InMemoryMailApi::with_threads(threads));
        let mut onebox = Onebox::new(api.clone(), FallbackPolicy::MockData);
        onebox.refresh().unwrap();
        (onebox, api)
    }

    #[test]
    fn test_reply_flow() {
        let (mut onebox, api) = onebox(vec![thread("a", "Meeting", false)]);
        onebox.open_thread(&ThreadId::new("a")).unwrap();
        onebox.start_reply().unwrap();
        assert_eq!(onebox.composer().draft().subject(), "Re: Meeting");
        assert_eq!(onebox.composer().to(), Some("a@icloud.com"));

        onebox
            .composer_mut()
            .draft_mut()
            .unwrap()
            .insert_variable(TemplateVariable::FirstName.token());
        onebox.send_reply("me@example.com").unwrap();

        let replies = api.replies();
        assert_eq!(replies.len(), 1);
        let (id, reply) = &replies[0];
        assert_eq!(id.as_str(), "a");
        assert_eq!(reply.from, "me@example.com");
        assert_eq!(reply.to, "a@icloud.com");
        assert_eq!(reply.subject, "Re: Meeting");
        assert!(reply.body.contains("{{firstName}}"));
        assert_eq!(onebox.composer().state(), ComposeState::Closed);
        assert!(onebox.reply_target().is_none());
    }

    #[test]
    fn test_failed_reply_keeps_composer_open() {
        let (mut onebox, api) = onebox(vec![thread("a", "Re: Status", false)]);
        onebox.open_thread(&ThreadId::new("a")).unwrap();
        onebox.start_reply().unwrap();
        assert_eq!(onebox.composer().draft().subject(), "Re: Status");
        onebox.composer_mut().draft_mut().unwrap().insert_text("Thanks");
        api.fail(Endpoint::Reply, ApiError::Transport("reset".into()));

        let err = onebox.send_reply("me@example.com").unwrap_err();
        assert_eq!(err.api_error(), Some(&ApiError::Transport("reset".into())));
        assert_eq!(onebox.composer().state(), ComposeState::Open);
        assert_eq!(onebox.composer().draft().body(), "Thanks");

        api.recover(Endpoint::Reply);
        onebox.send_reply("me@example.com").unwrap();
        assert_eq!(api.replies().len(), 1);
    }

    #[test]
    fn test_star_requires_selection() {
        let (mut onebox, _api) = onebox(vec![thread("a", "Hi", false)]);
        assert_eq!(onebox.toggle_star(), Err(OneboxError::NoSelection));
        onebox.open_thread(&ThreadId::new("a")).unwrap();
        assert_eq!(onebox.toggle_star(), Ok(true));
        assert!(onebox.cache().is_starred());
    }

    #[test]
    fn test_reply_requires_selection() {
        let (mut onebox, _api) = onebox(vec![thread("a", "Hi", false)]);
        assert_eq!(onebox.start_reply(), Err(OneboxError::NoSelection));
        assert_eq!(onebox.send_reply("me@example.com"), Err(OneboxError::NoSelection));
    }

    #[test]
    fn test_delete_selected() {
        let (mut onebox, api) = onebox(vec![thread("a", "One", false), thread("b", "Two", true)]);
        assert_eq!(onebox.delete_selected(), Err(OneboxError::NoSelection));

        onebox.open_thread(&ThreadId::new("a")).unwrap();
        let removed = onebox.delete_selected().unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(onebox.cache().len(), 1);
        assert!(onebox.cache().selected().is_none());
        assert_eq!(api.threads().len(), 1);
    }

    #[test]
    fn test_shortcuts() {
        let (mut onebox, _api) = onebox(vec![thread("a", "One", false), thread("b", "Two", true)]);

        // Nothing selected: ignored
        assert_eq!(onebox.handle_shortcut(Shortcut::Delete), Ok(false));
        assert_eq!(onebox.handle_shortcut(Shortcut::Reply), Ok(false));

        onebox.open_thread(&ThreadId::new("b")).unwrap();
        assert_eq!(onebox.handle_shortcut(Shortcut::Reply), Ok(true));
        assert!(onebox.composer().is_open());

        // Typing into the editor must not delete the thread
        assert_eq!(onebox.handle_shortcut(Shortcut::Delete), Ok(false));
        assert_eq!(onebox.cache().len(), 2);

        assert_eq!(onebox.handle_shortcut(Shortcut::Dismiss), Ok(true));
        assert!(!onebox.composer().is_open());
        assert_eq!(onebox.handle_shortcut(Shortcut::Dismiss), Ok(false));

        assert_eq!(onebox.handle_shortcut(Shortcut::Delete), Ok(true));
        assert_eq!(onebox.cache().len(), 1);
    }

    #[test]
    fn test_failed_delete_is_rolled_back() {
        let (mut onebox, api) = onebox(vec![thread("a", "One", false)]);
        api.fail(Endpoint::Delete, ApiError::Unauthorized(401));
        let err = onebox.delete_thread(&ThreadId::new("a")).unwrap_err();
        assert_eq!(err.api_error(), Some(&ApiError::Unauthorized(401)));
        assert!(!err.api_error().unwrap().is_retryable());
        assert_eq!(onebox.cache().len(), 1);
    }
}
