//! Sidebar: views, signed-in user and theme

use std::io::{self, Write};

use mail::{Session, View};

fn item(out: &mut dyn Write, view: View, active: View) -> io::Result<()> {
    let marker = if view == active { ">" } else { " " };
    writeln!(out, "{} {:<10} ({})", marker, view.label(), view.id())
}

pub fn render(out: &mut dyn Write, active: View, session: &Session) -> io::Result<()> {
    writeln!(out, "Reachinbox")?;
    for view in View::SIDEBAR {
        item(out, view, active)?;
    }
    writeln!(out, "  ----------")?;
    for view in View::FOOTER {
        item(out, view, active)?;
    }
    match session.user() {
        Some(user) => writeln!(out, "{} <{}>", user.name, user.email)?,
        None => writeln!(out, "Signed in")?,
    }
    writeln!(out, "Theme: {}", session.theme().as_str())
}

/// Body of a view that has no content yet
pub fn render_placeholder(out: &mut dyn Write, view: View) -> io::Result<()> {
    writeln!(out, "{}", view.placeholder_title().unwrap_or(view.label()))?;
    writeln!(out, "{}", View::COMING_SOON)
}
