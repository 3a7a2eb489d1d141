//! Thread list

use std::io::{self, Write};

use chrono::{DateTime, TimeZone};
use mail::query::{InboxCounts, list_threads};
use mail::ThreadCache;

pub fn render<Tz: TimeZone>(
    out: &mut dyn Write,
    cache: &ThreadCache,
    now: &DateTime<Tz>,
) -> io::Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    let counts = InboxCounts::of(cache);
    writeln!(out, "Inbox ({})", counts.unread)?;
    writeln!(out, "{} total emails", counts.total)?;

    if cache.is_empty() {
        return writeln!(out, "No emails found");
    }

    for row in list_threads(cache, now) {
        let marker = if row.is_selected {
            '>'
        } else if row.is_unread {
            '*'
        } else {
            ' '
        };
        let labels = if row.labels.is_empty() {
            String::new()
        } else {
            format!(" [{}]", row.labels.join(", "))
        };
        writeln!(
            out,
            "{} {:>3}  {:>6}  ({}) {} - {}  {}{}",
            marker,
            row.id,
            row.time,
            row.initial,
            row.sender_name,
            row.subject,
            row.priority,
            labels
        )?;
        if !row.snippet.is_empty() {
            writeln!(out, "         {}", row.snippet)?;
        }
    }
    Ok(())
}
