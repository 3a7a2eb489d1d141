//! Read-only analytics snapshot

use serde::{Deserialize, Serialize};

/// Percentage split of mail across categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub work: u32,
    pub personal: u32,
    pub newsletter: u32,
    pub spam: u32,
}

impl CategoryBreakdown {
    /// Rows in display order: Work, Personal, Newsletter, Spam
    pub fn rows(&self) -> [(&'static str, u32); 4] {
        [
            ("Work", self.work),
            ("Personal", self.personal),
            ("Newsletter", self.newsletter),
            ("Spam", self.spam),
        ]
    }
}

/// Aggregate mailbox statistics
///
/// Independently sourced; not derived from cached threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAnalytics {
    pub total_emails: u64,
    pub unread_count: u64,
    pub today_count: u64,
    /// Average response time in hours
    pub response_time: f64,
    /// 0-100
    pub productivity_score: u32,
    pub categories: CategoryBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_rows_order() {
        let breakdown = CategoryBreakdown {
            work: 1,
            personal: 2,
            newsletter: 3,
            spam: 4,
        };
        let names: Vec<_> = breakdown.rows().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["Work", "Personal", "Newsletter", "Spam"]);
    }
}
