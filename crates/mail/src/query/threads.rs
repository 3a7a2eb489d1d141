//! Thread query functions

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::models::{Thread, ThreadId};
use crate::state::ThreadCache;

/// Maximum characters of body text shown in a list row
const SNIPPET_LEN: usize = 100;

/// Labels shown per list row
const MAX_ROW_LABELS: usize = 2;

/// Inbox header counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InboxCounts {
    pub unread: usize,
    pub total: usize,
}

impl InboxCounts {
    pub fn of(cache: &ThreadCache) -> Self {
        Self {
            unread: cache.unread_count(),
            total: cache.len(),
        }
    }
}

/// Summary information for displaying a thread in a list
#[derive(Debug, Clone, Serialize)]
pub struct ThreadSummary {
    /// Thread ID
    pub id: ThreadId,
    pub initial: String,
    pub sender_name: String,
    pub subject: String,
    /// Body text without markup, truncated
    pub snippet: String,
    /// Relative timestamp label
    pub time: String,
    pub is_unread: bool,
    pub is_selected: bool,
    pub priority: &'static str,
    /// First labels of the thread
    pub labels: Vec<String>,
}

impl ThreadSummary {
    pub fn new<Tz: TimeZone>(thread: &Thread, now: &DateTime<Tz>, is_selected: bool) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let sent_at = thread.sent_at.with_timezone(&now.timezone());
        Self {
            id: thread.id.clone(),
            initial: avatar_initial(&thread.from_name),
            sender_name: thread.from_name.clone(),
            subject: thread.subject.clone(),
            snippet: snippet(&thread.body),
            time: format_list_time(&sent_at, now),
            is_unread: !thread.is_read,
            is_selected,
            priority: thread.priority.as_str(),
            labels: thread.labels.iter().take(MAX_ROW_LABELS).cloned().collect(),
        }
    }
}

/// Detail header for the selected thread
#[derive(Debug, Clone, Serialize)]
pub struct ThreadDetail {
    pub id: ThreadId,
    pub initial: String,
    pub from: String,
    pub from_email: String,
    pub subject: String,
    pub sent: String,
    pub priority_badge: &'static str,
    pub labels: Vec<String>,
    /// HTML body
    pub body: String,
}

impl ThreadDetail {
    pub fn new<Tz: TimeZone>(thread: &Thread, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: thread.id.clone(),
            initial: avatar_initial(&thread.from_name),
            from: thread.from_name.clone(),
            from_email: thread.from_email.clone(),
            subject: thread.subject.clone(),
            sent: format_detail_time(&thread.sent_at.with_timezone(tz)),
            priority_badge: thread.priority.badge(),
            labels: thread.labels.clone(),
            body: thread.body.clone(),
        }
    }
}

/// List rows for every cached thread, in list order
pub fn list_threads<Tz: TimeZone>(cache: &ThreadCache, now: &DateTime<Tz>) -> Vec<ThreadSummary>
where
    Tz::Offset: std::fmt::Display,
{
    let selected = cache.selected_id();
    cache
        .threads()
        .iter()
        .map(|t| ThreadSummary::new(t, now, selected == Some(&t.id)))
        .collect()
}

/// Format a list timestamp relative to `now`
///
/// `HH:MM` within a day, short weekday within a week, else `Mon D`.
pub fn format_list_time<Tz: TimeZone>(sent_at: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let hours = (now.clone() - sent_at.clone()).num_minutes().abs() as f64 / 60.0;
    if hours < 24.0 {
        sent_at.format("%H:%M").to_string()
    } else if hours < 24.0 * 7.0 {
        sent_at.format("%a").to_string()
    } else {
        sent_at.format("%b %-d").to_string()
    }
}

/// Full timestamp for the detail header, e.g. `Mon, Jan 15, 2024, 09:30`
pub fn format_detail_time<Tz: TimeZone>(sent_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    sent_at.format("%a, %b %-d, %Y, %H:%M").to_string()
}

/// Uppercased first character of a name, `?` when empty
pub fn avatar_initial(name: &str) -> String {
    match name.trim().chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => "?".to_string(),
    }
}

/// Text content of an HTML fragment
///
/// Tags are dropped; paragraph, list item and line break tags become
/// newlines. Entities are left as-is.
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name = tag
                    .trim_matches('/')
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                if matches!(name.as_str(), "br" | "p" | "li" | "div") && !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ if in_tag => tag.push(ch),
            _ => text.push(ch),
        }
    }
    text.trim().to_string()
}

/// Body text with tags removed, cut to the list preview length
pub fn snippet(html: &str) -> String {
    let text = plain_text(html).replace('\n', " ");
    if text.chars().count() > SNIPPET_LEN {
        let cut: String = text.chars().take(SNIPPET_LEN).collect();
        format!("{}...", cut.trim_end())
    } else {
        text
    }
}

/// Group digits in thousands, e.g. `1247` -> `1,247`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryMailApi;
    use crate::api::mock::mock_threads;
    use crate::state::FallbackPolicy;
    use chrono::{Duration, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_list_time_buckets() {
        let now = at(2024, 1, 15, 12, 0);
        assert_eq!(format_list_time(&at(2024, 1, 15, 9, 30), &now), "09:30");
        assert_eq!(format_list_time(&(now - Duration::hours(30)), &now), "Sun");
        assert_eq!(format_list_time(&at(2023, 12, 25, 8, 0), &now), "Dec 25");
    }

    #[test]
    fn test_detail_time() {
        assert_eq!(
            format_detail_time(&at(2024, 1, 15, 9, 30)),
            "Mon, Jan 15, 2024, 09:30"
        );
    }

    #[test]
    fn test_avatar_initial() {
        assert_eq!(avatar_initial("sarah Connor"), "S");
        assert_eq!(avatar_initial("émile"), "É");
        assert_eq!(avatar_initial("  "), "?");
    }

    #[test]
    fn test_snippet_strips_markup_and_truncates() {
        assert_eq!(snippet("<p>Hello <b>there</b></p>"), "Hello there");
        assert_eq!(snippet("<p>Hi team,</p><p>See you</p>"), "Hi team, See you");
        let long = format!("<div>{}</div>", "x".repeat(150));
        let s = snippet(&long);
        assert_eq!(s.len(), SNIPPET_LEN + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_plain_text_breaks_paragraphs() {
        assert_eq!(
            plain_text("<p>Thanks,<br>John</p>"),
            "Thanks,\nJohn"
        );
        assert_eq!(plain_text("a &amp; b"), "a &amp; b");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1247), "1,247");
        assert_eq!(format_count(1_000_000), "1,000,000");
    }

    #[test]
    fn test_rows_follow_cache() {
        let api = InMemoryMailApi::with_threads(mock_threads());
        let mut cache = ThreadCache::new(FallbackPolicy::MockData);
        cache.load(&api).unwrap();
        cache.select(&ThreadId::new("3"), &api).unwrap();

        let now = at(2024, 1, 15, 10, 0);
        let rows = list_threads(&cache, &now);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(rows[2].is_selected && !rows[2].is_unread);
        assert_eq!(rows[0].labels.len(), 2);
        assert_eq!(rows[0].time, "09:30");

        assert_eq!(InboxCounts::of(&cache), InboxCounts { unread: 1, total: 3 });

        let detail = ThreadDetail::new(cache.selected().unwrap(), &Utc);
        assert_eq!(detail.initial, "J");
        assert_eq!(detail.priority_badge, "Medium Priority");
    }
}
