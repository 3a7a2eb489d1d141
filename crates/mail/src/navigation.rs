//! Top-level view selection and routing

use log::debug;

/// Top-level dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Inbox,
    Analytics,
    Sent,
    Starred,
    Archive,
    Trash,
    Settings,
}

impl View {
    /// Primary sidebar entries, top to bottom
    pub const SIDEBAR: [View; 6] = [
        View::Inbox,
        View::Sent,
        View::Starred,
        View::Archive,
        View::Trash,
        View::Analytics,
    ];

    /// Entries pinned to the bottom of the sidebar
    pub const FOOTER: [View; 1] = [View::Settings];

    /// Shown on views that have no content yet
    pub const COMING_SOON: &'static str = "This feature is coming soon";

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            View::Inbox => "inbox",
            View::Analytics => "analytics",
            View::Sent => "sent",
            View::Starred => "starred",
            View::Archive => "archive",
            View::Trash => "trash",
            View::Settings => "settings",
        }
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            View::Inbox => "Inbox",
            View::Analytics => "Analytics",
            View::Sent => "Sent",
            View::Starred => "Starred",
            View::Archive => "Archive",
            View::Trash => "Trash",
            View::Settings => "Settings",
        }
    }

    /// Parse a stable identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::SIDEBAR
            .into_iter()
            .chain(Self::FOOTER)
            .find(|v| v.id().eq_ignore_ascii_case(id.trim()))
    }

    /// Whether this view only shows a placeholder
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, View::Inbox | View::Analytics)
    }

    /// Heading for placeholder views
    pub fn placeholder_title(&self) -> Option<&'static str> {
        match self {
            View::Sent => Some("Sent Emails"),
            View::Starred => Some("Starred Emails"),
            View::Archive => Some("Archived Emails"),
            View::Trash => Some("Trash"),
            View::Settings => Some("Settings"),
            View::Inbox | View::Analytics => None,
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Holds the active view
#[derive(Debug, Default)]
pub struct Navigator {
    active: View,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    /// Switch views; returns whether the active view changed
    pub fn select(&mut self, view: View) -> bool {
        if self.active == view {
            return false;
        }
        debug!("View changed: {} -> {}", self.active, view);
        self.active = view;
        true
    }

    /// Switch by identifier; unknown ids fall back to the inbox
    pub fn select_id(&mut self, id: &str) -> bool {
        let view = View::from_id(id).unwrap_or_else(|| {
            debug!("Unknown view '{}', showing inbox", id);
            View::Inbox
        });
        self.select(view)
    }
}

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

impl Screen {
    /// Canonical path of the screen
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Login => "/login",
            Screen::Dashboard => "/dashboard",
        }
    }
}

/// Resolve a location to the screen to show
///
/// Unauthenticated users always land on the login screen and authenticated
/// ones on the dashboard. Unknown paths are treated like `/`.
pub fn resolve_route(path: &str, authenticated: bool) -> Screen {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    match path {
        "/login" | "/dashboard" | "/google-login" | "" => {}
        other => debug!("No route for '{}', redirecting", other),
    }
    if authenticated {
        Screen::Dashboard
    } else {
        Screen::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_order() {
        let ids: Vec<_> = View::SIDEBAR.iter().map(View::id).collect();
        assert_eq!(ids, ["inbox", "sent", "starred", "archive", "trash", "analytics"]);
        assert_eq!(View::FOOTER, [View::Settings]);
    }

    #[test]
    fn test_ids_round_trip() {
        for view in View::SIDEBAR.into_iter().chain(View::FOOTER) {
            assert_eq!(View::from_id(view.id()), Some(view));
        }
        assert_eq!(View::from_id("Trash"), Some(View::Trash));
        assert_eq!(View::from_id("drafts"), None);
    }

    #[test]
    fn test_placeholders() {
        assert!(!View::Inbox.is_placeholder());
        assert!(!View::Analytics.is_placeholder());
        assert_eq!(View::Sent.placeholder_title(), Some("Sent Emails"));
        assert_eq!(View::Archive.placeholder_title(), Some("Archived Emails"));
        assert!(View::Settings.is_placeholder());
    }

    #[test]
    fn test_navigator() {
        let mut nav = Navigator::new();
        assert_eq!(nav.active(), View::Inbox);
        assert!(!nav.select(View::Inbox));
        assert!(nav.select_id("analytics"));
        assert_eq!(nav.active(), View::Analytics);
        assert!(nav.select_id("bogus"));
        assert_eq!(nav.active(), View::Inbox);
    }

    #[test]
    fn test_routes() {
        assert_eq!(resolve_route("/", false), Screen::Login);
        assert_eq!(resolve_route("/", true), Screen::Dashboard);
        assert_eq!(resolve_route("/login", true), Screen::Dashboard);
        assert_eq!(resolve_route("/dashboard", false), Screen::Login);
        assert_eq!(resolve_route("/google-login?code=x", true), Screen::Dashboard);
        assert_eq!(resolve_route("/nowhere", false).path(), "/login");
    }
}
