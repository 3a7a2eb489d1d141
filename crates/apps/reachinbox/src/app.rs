//! Root application state for the ReachInbox shell

use anyhow::Result;
use chrono::Local;
use log::{debug, error, info, warn};
use mail::{
    AnalyticsPanel, ClientConfig, LoadOutcome, MailApi, Navigator, Onebox, Screen, SelectOutcome,
    Session, View, mock_google_login, resolve_route,
};
use std::io::Write;
use std::sync::Arc;

use crate::input::{COMMANDS, Command};
use crate::views;

/// Whether the shell keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Root application state
pub struct ReachInboxApp {
    config: ClientConfig,
    session: Session,
    navigator: Navigator,
    onebox: Onebox,
    analytics: AnalyticsPanel,
}

impl ReachInboxApp {
    pub fn new(config: ClientConfig, session: Session, api: Arc<dyn MailApi>) -> Self {
        let onebox = Onebox::new(api, config.fallback_policy());
        Self {
            config,
            session,
            navigator: Navigator::new(),
            onebox,
            analytics: AnalyticsPanel::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        resolve_route("/", self.session.is_authenticated())
    }

    /// Show the initial screen
    pub fn start(&mut self, out: &mut dyn Write) -> Result<()> {
        match self.screen() {
            Screen::Login => views::login::render(out)?,
            Screen::Dashboard => self.show_view(out)?,
        }
        Ok(())
    }

    /// Run one command
    pub fn handle(&mut self, command: Command, out: &mut dyn Write) -> Result<Flow> {
        if self.screen() == Screen::Login && !command.allowed_signed_out() {
            writeln!(out, "Please sign in first (type `login`)")?;
            return Ok(Flow::Continue);
        }
        debug!("Handling {:?}", command);

        match command {
            Command::Login => self.login(out)?,
            Command::Logout => self.logout(out)?,
            Command::Theme => {
                let theme = self.session.toggle_theme()?;
                writeln!(out, "Theme: {}", theme.as_str())?;
            }
            Command::View(None) => {
                views::sidebar::render(out, self.navigator.active(), &self.session)?
            }
            Command::View(Some(id)) => self.switch_view(&id, out)?,
            Command::Analytics => self.switch_view(View::Analytics.id(), out)?,
            Command::List => {
                self.ensure_inbox();
                self.refresh(out)?;
            }
            Command::Open(id) => {
                self.ensure_inbox();
                let outcome = self.onebox.open_thread(&id)?;
                match outcome {
                    SelectOutcome::Detail | SelectOutcome::Stale => {}
                    SelectOutcome::MockDetail { cause } => {
                        writeln!(out, "(showing demo copy: {})", cause)?
                    }
                    SelectOutcome::Summary { cause } => {
                        writeln!(out, "(showing summary: {})", cause)?
                    }
                }
                self.show_detail(out)?;
            }
            Command::Delete(id) => {
                let removed = match id {
                    Some(id) => self.onebox.delete_thread(&id)?,
                    None => Some(self.onebox.delete_selected()?),
                };
                match removed {
                    Some(thread) => writeln!(out, "Deleted \"{}\"", thread.subject)?,
                    None => writeln!(out, "No such email")?,
                }
            }
            Command::Star => {
                let starred = self.onebox.toggle_star()?;
                writeln!(out, "{}", if starred { "Starred" } else { "Unstarred" })?;
                self.show_detail(out)?;
            }
            Command::Reply => {
                self.onebox.start_reply()?;
                views::compose::render(out, self.onebox.composer())?;
            }
            Command::Subject(subject) => {
                self.onebox.composer_mut().draft_mut()?.set_subject(subject);
                views::compose::render(out, self.onebox.composer())?;
            }
            Command::Type(text) => {
                self.onebox.composer_mut().draft_mut()?.insert_text(&text);
                views::compose::render(out, self.onebox.composer())?;
            }
            Command::Var(var) => {
                self.onebox
                    .composer_mut()
                    .draft_mut()?
                    .insert_variable(var.token());
                views::compose::render(out, self.onebox.composer())?;
            }
            Command::Format(format) => {
                self.onebox.composer_mut().draft_mut()?.apply_format(&format);
                views::compose::render(out, self.onebox.composer())?;
            }
            Command::Send => {
                let from = self.session.reply_sender(&self.config.reply_from);
                self.onebox.send_reply(&from)?;
                writeln!(out, "Reply sent")?;
            }
            Command::Cancel => {
                self.onebox.cancel_reply()?;
                writeln!(out, "Reply discarded")?;
            }
            Command::Key(shortcut) => {
                let had_selection = self.onebox.cache().selected().is_some();
                if !self.onebox.handle_shortcut(shortcut)? {
                    writeln!(out, "Nothing to do")?;
                } else if self.onebox.composer().is_open() {
                    views::compose::render(out, self.onebox.composer())?;
                } else if had_selection && self.onebox.cache().selected().is_none() {
                    writeln!(out, "Deleted")?;
                } else {
                    writeln!(out, "Composer closed")?;
                }
            }
            Command::Help => self.help(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.session.is_authenticated() {
            writeln!(out, "Already signed in")?;
            return Ok(());
        }
        self.session.login(mock_google_login())?;
        if let Some(user) = self.session.user() {
            writeln!(out, "Signed in as {} <{}>", user.name, user.email)?;
        }
        self.navigator.select(View::Inbox);
        self.show_view(out)
    }

    fn logout(&mut self, out: &mut dyn Write) -> Result<()> {
        if let Err(e) = self.onebox.cancel_reply() {
            warn!("Discarding reply on logout: {}", e);
        }
        self.onebox.invalidate_pending();
        self.analytics.reset();
        self.session.logout()?;
        writeln!(out, "Signed out")?;
        views::login::render(out)?;
        Ok(())
    }

    fn ensure_inbox(&mut self) {
        if self.navigator.select(View::Inbox) {
            self.onebox.invalidate_pending();
        }
    }

    fn switch_view(&mut self, id: &str, out: &mut dyn Write) -> Result<()> {
        let previous = self.navigator.active();
        if self.navigator.select_id(id) {
            info!("Switched to {}", self.navigator.active());
            self.onebox.invalidate_pending();
            if previous == View::Analytics {
                self.analytics.reset();
            }
        }
        self.show_view(out)
    }

    fn show_view(&mut self, out: &mut dyn Write) -> Result<()> {
        let view = self.navigator.active();
        match view {
            View::Inbox => self.refresh(out)?,
            View::Analytics => {
                let state = self.analytics.load(self.onebox.api().as_ref());
                views::analytics::render(out, state)?;
            }
            placeholder => views::sidebar::render_placeholder(out, placeholder)?,
        }
        Ok(())
    }

    /// Reload the inbox; a failed load still shows whatever the cache holds
    fn refresh(&mut self, out: &mut dyn Write) -> Result<()> {
        match self.onebox.refresh() {
            Ok(LoadOutcome::Fallback { cause }) => {
                writeln!(out, "(offline: showing demo emails, {})", cause)?
            }
            Ok(LoadOutcome::Remote { .. } | LoadOutcome::Stale) => {}
            Err(e) => {
                error!("Inbox refresh failed: {}", e);
                writeln!(out, "Could not load emails: {}", e)?;
            }
        }
        views::inbox::render(out, self.onebox.cache(), &Local::now())?;
        Ok(())
    }

    fn show_detail(&self, out: &mut dyn Write) -> Result<()> {
        match self.onebox.cache().selected() {
            Some(thread) => {
                views::thread::render(out, thread, self.onebox.cache().is_starred(), &Local)?
            }
            None => views::thread::render_empty(out)?,
        }
        Ok(())
    }

    fn help(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Commands:")?;
        for help in COMMANDS {
            writeln!(out, "  {:<18} {}", help.usage, help.description)?;
        }
        writeln!(out, "Shortcuts:")?;
        for help in mail::actions::shortcuts_help() {
            writeln!(out, "  {:<18} {}", help.keys, help.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mail::api::mock::mock_threads;
    use mail::{ApiError, InMemoryMailApi, MemoryStorage};

    fn app() -> (ReachInboxApp, Arc<InMemoryMailApi>) {
        let api = Arc::new(InMemoryMailApi::with_threads(mock_threads()));
        let session = Session::init(Arc::new(MemoryStorage::new())).unwrap();
        let app = ReachInboxApp::new(ClientConfig::default(), session, api.clone());
        (app, api)
    }

    fn run(app: &mut ReachInboxApp, line: &str) -> String {
        let mut out = Vec::new();
        let command = Command::parse(line).unwrap().unwrap();
        app.handle(command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_signed_out_gate() {
        let (mut app, api) = app();
        assert_eq!(app.screen(), Screen::Login);
        assert!(run(&mut app, "list").contains("Please sign in first"));
        assert_eq!(api.call_count(mail::Endpoint::List), 0);
        assert!(run(&mut app, "theme").contains("Theme: dark"));
    }

    #[test]
    fn test_login_shows_inbox() {
        let (mut app, _api) = app();
        let text = run(&mut app, "login");
        assert!(text.contains("Signed in as John Doe <user@example.com>"));
        assert!(text.contains("Inbox (2)"));
        assert!(text.contains("3 total emails"));
        assert_eq!(app.screen(), Screen::Dashboard);
    }

    #[test]
    fn test_reply_session() {
        let (mut app, api) = app();
        run(&mut app, "login");
        assert!(run(&mut app, "open 2").contains("Daily Tech News Digest"));
        assert!(run(&mut app, "key r").contains("Subject: Re: Daily Tech News Digest"));
        run(&mut app, "type Thanks,");
        assert!(run(&mut app, "var firstName").contains("Thanks,{{firstName}}"));
        assert!(run(&mut app, "send").contains("Reply sent"));

        let replies = api.replies();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].1.from, "user@example.com");
        assert_eq!(replies[0].1.to, "newsletter@techcrunch.com");
    }

    #[test]
    fn test_placeholder_and_analytics_views() {
        let (mut app, _api) = app();
        run(&mut app, "login");
        let sent = run(&mut app, "view sent");
        assert!(sent.contains("Sent Emails"));
        assert!(sent.contains("coming soon"));
        assert!(run(&mut app, "analytics").contains("1,247"));
        assert!(run(&mut app, "view").contains("> Analytics"));
    }

    #[test]
    fn test_delete_selected_via_shortcut() {
        let (mut app, api) = app();
        run(&mut app, "login");
        run(&mut app, "open 1");
        assert!(run(&mut app, "key d").contains("Deleted"));
        assert_eq!(api.threads().len(), 2);
        assert!(run(&mut app, "key d").contains("Nothing to do"));
    }

    fn surfacing_app(api: Arc<InMemoryMailApi>) -> ReachInboxApp {
        let mut session = Session::init(Arc::new(MemoryStorage::new())).unwrap();
        session.login(mock_google_login()).unwrap();
        let config = ClientConfig {
            mock_fallback: false,
            ..ClientConfig::default()
        };
        ReachInboxApp::new(config, session, api)
    }

    #[test]
    fn test_startup_survives_failed_load() {
        let api = Arc::new(InMemoryMailApi::with_threads(mock_threads()));
        api.fail(mail::Endpoint::List, ApiError::Status(503));
        let mut app = surfacing_app(api);

        let mut out = Vec::new();
        app.start(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Could not load emails: server returned HTTP 503"));
        assert!(text.contains("Inbox (0)"));
        assert!(text.contains("No emails found"));
        assert!(run(&mut app, "list").contains("Could not load emails"));
    }

    #[test]
    fn test_failed_reload_shows_previous_list() {
        let api = Arc::new(InMemoryMailApi::with_threads(mock_threads()));
        let mut app = surfacing_app(api.clone());
        app.start(&mut Vec::new()).unwrap();

        api.fail(mail::Endpoint::List, ApiError::Transport("offline".into()));
        let text = run(&mut app, "list");
        assert!(text.contains("Could not load emails: network error: offline"));
        assert!(text.contains("3 total emails"));
    }

    #[test]
    fn test_star_open_thread() {
        let (mut app, _api) = app();
        run(&mut app, "login");
        assert!(app.handle(Command::Star, &mut Vec::new()).is_err());

        run(&mut app, "open 1");
        let starred = run(&mut app, "star");
        assert!(starred.contains("Starred"));
        assert!(starred.contains("[starred]"));
        let unstarred = run(&mut app, "star");
        assert!(unstarred.contains("Unstarred"));
        assert!(!unstarred.contains("[starred]"));
    }

    #[test]
    fn test_logout_returns_to_login() {
        let (mut app, _api) = app();
        run(&mut app, "login");
        assert!(run(&mut app, "logout").contains("Welcome to Reachinbox"));
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(
            app.handle(Command::Quit, &mut Vec::new()).unwrap(),
            Flow::Quit
        );
    }
}
