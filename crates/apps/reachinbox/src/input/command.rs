//! Shell command parsing

use anyhow::{Result, anyhow, bail};
use mail::compose::{Format, TemplateVariable};
use mail::{Shortcut, ThreadId};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login,
    Logout,
    Theme,
    /// Switch view, or show the sidebar when no id is given
    View(Option<String>),
    List,
    Open(ThreadId),
    /// Delete a thread, the selected one by default
    Delete(Option<ThreadId>),
    /// Toggle the star on the open thread
    Star,
    Reply,
    Subject(String),
    Type(String),
    Var(TemplateVariable),
    Format(Format),
    Send,
    Cancel,
    Key(Shortcut),
    Analytics,
    Help,
    Quit,
}

/// A single command for display
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp { usage: "login", description: "Continue with Google (demo account)" },
    CommandHelp { usage: "logout", description: "Sign out" },
    CommandHelp { usage: "theme", description: "Toggle light/dark theme" },
    CommandHelp { usage: "view [id]", description: "Switch view (inbox, sent, starred, archive, trash, analytics, settings)" },
    CommandHelp { usage: "list", description: "Reload and show the inbox" },
    CommandHelp { usage: "open <id>", description: "Open a thread" },
    CommandHelp { usage: "delete [id]", description: "Delete a thread (default: the open one)" },
    CommandHelp { usage: "star", description: "Star or unstar the open thread" },
    CommandHelp { usage: "reply", description: "Reply to the open thread" },
    CommandHelp { usage: "subject <text>", description: "Set the reply subject" },
    CommandHelp { usage: "type <text>", description: "Type text at the cursor" },
    CommandHelp { usage: "var <name>", description: "Insert firstName, lastName, company, date or time" },
    CommandHelp { usage: "format <style>", description: "bold, italic, underline, list or link <url>" },
    CommandHelp { usage: "send", description: "Send the reply" },
    CommandHelp { usage: "cancel", description: "Discard the reply" },
    CommandHelp { usage: "key <d|r|escape>", description: "Press a keyboard shortcut" },
    CommandHelp { usage: "analytics", description: "Show email analytics" },
    CommandHelp { usage: "help", description: "Show this help" },
    CommandHelp { usage: "quit", description: "Exit" },
];

impl Command {
    /// Parse a line; `Ok(None)` for blank input
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "login" => Command::Login,
            "logout" => Command::Logout,
            "theme" => Command::Theme,
            "view" => Command::View(optional(rest).map(String::from)),
            "list" | "inbox" => Command::List,
            "open" => Command::Open(ThreadId::new(required(rest, "open <id>")?)),
            "delete" => Command::Delete(optional(rest).map(ThreadId::new)),
            "star" => Command::Star,
            "reply" => Command::Reply,
            "subject" => Command::Subject(rest.to_string()),
            "type" => Command::Type(required(rest, "type <text>")?.to_string()),
            "var" => {
                let name = required(rest, "var <name>")?;
                let var = TemplateVariable::parse(name)
                    .ok_or_else(|| anyhow!("Unknown variable '{}'", name))?;
                Command::Var(var)
            }
            "format" => Command::Format(parse_format(rest)?),
            "send" => Command::Send,
            "cancel" => Command::Cancel,
            "key" => {
                let key = required(rest, "key <d|r|escape>")?;
                let shortcut =
                    Shortcut::from_key(key).ok_or_else(|| anyhow!("Unknown key '{}'", key))?;
                Command::Key(shortcut)
            }
            "analytics" => Command::Analytics,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("Unknown command '{}' (type `help`)", other),
        };
        Ok(Some(command))
    }

    /// Whether the command is available on the login screen
    pub fn allowed_signed_out(&self) -> bool {
        matches!(
            self,
            Command::Login | Command::Theme | Command::Help | Command::Quit
        )
    }
}

fn optional(rest: &str) -> Option<&str> {
    (!rest.is_empty()).then_some(rest)
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    optional(rest).ok_or_else(|| anyhow!("Usage: {}", usage))
}

fn parse_format(rest: &str) -> Result<Format> {
    let (style, arg) = match rest.split_once(char::is_whitespace) {
        Some((style, arg)) => (style, arg.trim()),
        None => (rest, ""),
    };
    match style.to_ascii_lowercase().as_str() {
        "bold" => Ok(Format::Bold),
        "italic" => Ok(Format::Italic),
        "underline" => Ok(Format::Underline),
        "list" => Ok(Format::BulletList),
        "link" => Ok(Format::Link(required(arg, "format link <url>")?.to_string())),
        "" => bail!("Usage: format <bold|italic|underline|list|link URL>"),
        other => bail!("Unknown format '{}'", other),
    }
}
