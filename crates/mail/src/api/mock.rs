//! Fixed demo data served when the remote API is unavailable
//!
//! Timestamps are constants so that every fallback yields identical data.

use chrono::{DateTime, Duration, Utc};

use crate::models::{CategoryBreakdown, EmailAnalytics, Priority, Thread, ThreadId};

/// 2024-01-15T09:30:00Z
const MOCK_BASE_TIMESTAMP: i64 = 1_705_311_000;

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(MOCK_BASE_TIMESTAMP, 0).unwrap_or_default()
}

/// The three demo threads, newest first
pub fn mock_threads() -> Vec<Thread> {
    let base = base_time();
    vec![
        Thread::builder("1")
            .from("Sarah Connor", "sarah.connor@techcorp.com")
            .subject("Q4 Marketing Strategy Review")
            .body(
                "<p>Hi team,</p><p>I wanted to discuss our Q4 marketing strategy and get \
                 everyone's input on the proposed campaigns. Please review the attached \
                 documents and let me know your thoughts.</p><p>Best regards,<br>Sarah</p>",
            )
            .sent_at(base)
            .read(false)
            .priority(Priority::High)
            .labels(["work", "marketing"])
            .build(),
        Thread::builder("2")
            .from("TechCrunch", "newsletter@techcrunch.com")
            .subject("Daily Tech News Digest")
            .body(
                "<p>Your daily dose of tech news is here! Check out today's top stories \
                 in technology and startups.</p>",
            )
            .sent_at(base - Duration::hours(1))
            .read(true)
            .priority(Priority::Low)
            .labels(["newsletter"])
            .build(),
        Thread::builder("3")
            .from("John Smith", "john.smith@company.com")
            .subject("Project Deadline Update")
            .body(
                "<p>Hello,</p><p>I wanted to update you on the project timeline. We're \
                 making good progress but may need an extension of 2-3 days.</p>\
                 <p>Thanks,<br>John</p>",
            )
            .sent_at(base - Duration::hours(2))
            .read(false)
            .priority(Priority::Medium)
            .labels(["work", "urgent"])
            .build(),
    ]
}

/// Look up a single demo thread
pub fn mock_thread(id: &ThreadId) -> Option<Thread> {
    mock_threads().into_iter().find(|t| &t.id == id)
}

/// The demo analytics snapshot
pub fn mock_analytics() -> EmailAnalytics {
    EmailAnalytics {
        total_emails: 1247,
        unread_count: 23,
        today_count: 18,
        response_time: 2.3,
        productivity_score: 87,
        categories: CategoryBreakdown {
            work: 65,
            personal: 20,
            newsletter: 10,
            spam: 5,
        },
    }
}
