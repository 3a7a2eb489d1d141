//! Keyboard shortcuts for the inbox view

/// An inbox keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Delete the selected thread
    Delete,
    /// Reply to the selected thread
    Reply,
    /// Close the composer
    Dismiss,
}

impl Shortcut {
    /// Map a key name to a shortcut, ignoring case
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "d" => Some(Shortcut::Delete),
            "r" => Some(Shortcut::Reply),
            "escape" | "esc" => Some(Shortcut::Dismiss),
            _ => None,
        }
    }

    /// Whether the shortcut acts on the selected thread
    pub fn needs_selection(&self) -> bool {
        matches!(self, Shortcut::Delete | Shortcut::Reply)
    }
}

/// A single keyboard shortcut for display
pub struct ShortcutHelp {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Shortcuts in display order
pub fn shortcuts_help() -> Vec<ShortcutHelp> {
    vec![
        ShortcutHelp {
            keys: "D",
            description: "Delete selected email",
        },
        ShortcutHelp {
            keys: "R",
            description: "Reply to selected email",
        },
        ShortcutHelp {
            keys: "Esc",
            description: "Close reply editor",
        },
    ]
}
