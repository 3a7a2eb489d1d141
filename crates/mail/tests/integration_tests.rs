//! Integration tests for the mail crate
//!
//! These tests drive the public state objects the way a front end would:
//! session, navigation, inbox actions, composer and analytics together.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mail::api::mock::mock_threads;
use mail::api::{ApiError, Endpoint, InMemoryMailApi};
use mail::compose::{ComposeState, Format, TemplateVariable};
use mail::navigation::{Navigator, Screen, View, resolve_route};
use mail::query::{InboxCounts, list_threads};
use mail::session::{FileStorage, LocalStorage, MemoryStorage, Session, Theme, mock_google_login};
use mail::state::{AnalyticsPanel, FallbackPolicy, LoadOutcome};
use mail::{Onebox, OneboxError, Shortcut, ThreadId};
use tempfile::TempDir;

fn inbox(api: &Arc<InMemoryMailApi>) -> Onebox {
    let mut onebox = Onebox::new(api.clone(), FallbackPolicy::MockData);
    onebox.refresh().unwrap();
    onebox
}

#[test]
fn test_login_browse_reply_logout() {
    let dir = TempDir::new().unwrap();
    let storage: Arc<dyn LocalStorage> =
        Arc::new(FileStorage::open(dir.path().join("session.json")).unwrap());

    let mut session = Session::init(storage.clone()).unwrap();
    assert_eq!(resolve_route("/", session.is_authenticated()), Screen::Login);

    session.login(mock_google_login()).unwrap();
    assert_eq!(resolve_route("/login", session.is_authenticated()), Screen::Dashboard);

    let api = Arc::new(InMemoryMailApi::with_threads(mock_threads()));
    let mut onebox = inbox(&api);
    assert_eq!(
        InboxCounts::of(onebox.cache()),
        InboxCounts { unread: 2, total: 3 }
    );

    onebox.open_thread(&ThreadId::new("1")).unwrap();
    assert!(onebox.handle_shortcut(Shortcut::from_key("R").unwrap()).unwrap());

    let draft = onebox.composer_mut().draft_mut().unwrap();
    draft.insert_text("Hi ");
    draft.insert_variable(TemplateVariable::FirstName.token());
    draft.select(0, 2);
    draft.apply_format(&Format::Bold);

    let from = session.reply_sender("user@example.com");
    onebox.send_reply(&from).unwrap();

    let replies = api.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].1.to, "sarah.connor@techcorp.com");
    assert_eq!(replies[0].1.subject, "Re: Q4 Marketing Strategy Review");
    assert_eq!(replies[0].1.body, "<b>Hi</b> {{firstName}}");

    session.logout().unwrap();
    let restored = Session::init(storage).unwrap();
    assert!(!restored.is_authenticated());
}

#[test]
fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    {
        let storage = Arc::new(FileStorage::open(&path).unwrap());
        let mut session = Session::init(storage).unwrap();
        session.login(mock_google_login()).unwrap();
        assert_eq!(session.toggle_theme().unwrap(), Theme::Dark);
    }

    let session = Session::init(Arc::new(FileStorage::open(&path).unwrap())).unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.theme(), Theme::Dark);
    assert_eq!(session.token_handle().get().as_deref(), Some("mock-token-12345"));
    // Only the token is persisted
    assert!(session.user().is_none());
}

#[test]
fn test_compose_example_sends_one_payload() {
    let api = Arc::new(InMemoryMailApi::with_threads(mock_threads()));
    let mut onebox = inbox(&api);
    onebox.open_thread(&ThreadId::new("2")).unwrap();
    onebox.start_reply().unwrap();

    let draft = onebox.composer_mut().draft_mut().unwrap();
    draft.set_subject("X");
    draft.insert_variable("{{firstName}}");
    onebox.send_reply("user@example.com").unwrap();

    assert_eq!(onebox.composer().state(), ComposeState::Closed);
    assert_eq!(onebox.composer().draft().body(), "");
    let replies = api.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].1.subject, "Re: X");
    assert!(replies[0].1.body.contains("{{firstName}}"));
}

#[test]
fn test_offline_inbox_uses_demo_data() {
    let api = Arc::new(InMemoryMailApi::new());
    api.fail(Endpoint::List, ApiError::Transport("offline".into()));
    api.fail(Endpoint::Get, ApiError::Transport("offline".into()));
    let mut onebox = Onebox::new(api.clone(), FallbackPolicy::MockData);

    assert!(matches!(onebox.refresh().unwrap(), LoadOutcome::Fallback { .. }));
    onebox.open_thread(&ThreadId::new("3")).unwrap();

    let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let rows = list_threads(onebox.cache(), &now);
    assert_eq!(rows.len(), 3);
    assert!(rows[2].is_selected);
    assert!(!rows[2].is_unread);
}

#[test]
fn test_surfaced_failures_keep_state() {
    let api = Arc::new(InMemoryMailApi::with_threads(mock_threads()));
    let mut onebox = Onebox::new(api.clone(), FallbackPolicy::Surface);
    onebox.refresh().unwrap();

    api.fail(Endpoint::List, ApiError::Unauthorized(403));
    let err = onebox.refresh().unwrap_err();
    assert_eq!(err.api_error(), Some(&ApiError::Unauthorized(403)));
    assert_eq!(onebox.cache().len(), 3);

    api.fail(Endpoint::Delete, ApiError::Status(500));
    onebox.open_thread(&ThreadId::new("2")).unwrap();
    assert!(matches!(onebox.delete_selected(), Err(OneboxError::Cache(_))));
    assert_eq!(onebox.cache().len(), 3);
    assert_eq!(onebox.cache().selected_id(), Some(&ThreadId::new("2")));
}

#[test]
fn test_switching_views_drops_in_flight_load() {
    let api = Arc::new(InMemoryMailApi::with_threads(mock_threads()));
    let mut onebox = Onebox::new(api, FallbackPolicy::MockData);
    let mut nav = Navigator::new();
    let mut analytics = AnalyticsPanel::new();

    // Simulate a list request that is still outstanding when the user leaves
    let mut cache = mail::ThreadCache::new(FallbackPolicy::MockData);
    let ticket = cache.begin_load();
    assert!(nav.select(View::Analytics));
    cache.invalidate_pending();
    onebox.invalidate_pending();
    assert_eq!(
        cache.apply_load(ticket, Ok(mock_threads())).unwrap(),
        LoadOutcome::Stale
    );

    let snapshot = analytics.load(onebox.api().as_ref());
    assert!(matches!(snapshot, mail::AnalyticsState::Loaded(_)));
    assert_eq!(analytics.snapshot().unwrap().total_emails, 1247);
}

#[test]
fn test_theme_toggle_twice_is_identity() {
    let storage = Arc::new(MemoryStorage::new());
    let mut session = Session::init(storage).unwrap();
    let original = session.theme();
    session.toggle_theme().unwrap();
    session.toggle_theme().unwrap();
    assert_eq!(session.theme(), original);
}
