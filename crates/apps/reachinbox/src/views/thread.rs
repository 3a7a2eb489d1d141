//! Thread detail

use std::io::{self, Write};

use chrono::TimeZone;
use mail::query::{ThreadDetail, plain_text};
use mail::Thread;

pub fn render<Tz: TimeZone>(
    out: &mut dyn Write,
    thread: &Thread,
    starred: bool,
    tz: &Tz,
) -> io::Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    let detail = ThreadDetail::new(thread, tz);
    if starred {
        writeln!(out, "{}  [starred]", detail.subject)?;
    } else {
        writeln!(out, "{}", detail.subject)?;
    }
    writeln!(out, "({}) {} <{}>", detail.initial, detail.from, detail.from_email)?;
    writeln!(out, "{}  |  {}", detail.sent, detail.priority_badge)?;
    if !detail.labels.is_empty() {
        writeln!(out, "Labels: {}", detail.labels.join(", "))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", plain_text(&detail.body))?;
    writeln!(out)?;
    writeln!(out, "[R] Reply  [D] Delete")
}

/// Shown when no thread is open
pub fn render_empty(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Select an email to read")
}
