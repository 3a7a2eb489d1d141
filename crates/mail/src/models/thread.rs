//! Thread model representing one inbox conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Priority assigned to a thread by the aggregation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Wire name ("high", "medium", "low")
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Badge text shown in the detail view
    pub fn badge(&self) -> &'static str {
        match self {
            Priority::High => "High Priority",
            Priority::Medium => "Medium Priority",
            Priority::Low => "Low Priority",
        }
    }
}

/// A thread as served by the onebox endpoints
///
/// Field names follow the wire contract (`fromEmail`, `sentAt`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: ThreadId,
    pub from_email: String,
    pub from_name: String,
    pub subject: String,
    /// HTML body
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
    pub priority: Priority,
    /// Unordered, duplicates allowed
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Thread {
    /// Create a thread builder
    pub fn builder(id: impl Into<ThreadId>) -> ThreadBuilder {
        ThreadBuilder::new(id.into())
    }

    /// Whether the thread carries the given label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Builder for creating Thread instances
pub struct ThreadBuilder {
    id: ThreadId,
    from_email: String,
    from_name: String,
    subject: String,
    body: String,
    sent_at: Option<DateTime<Utc>>,
    is_read: bool,
    priority: Priority,
    labels: Vec<String>,
}

impl ThreadBuilder {
    fn new(id: ThreadId) -> Self {
        Self {
            id,
            from_email: String::new(),
            from_name: String::new(),
            subject: String::new(),
            body: String::new(),
            sent_at: None,
            is_read: false,
            priority: Priority::Medium,
            labels: Vec::new(),
        }
    }

    pub fn from(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.from_name = name.into();
        self.from_email = email.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn sent_at(mut self, sent_at: DateTime<Utc>) -> Self {
        self.sent_at = Some(sent_at);
        self
    }

    pub fn read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Thread {
        Thread {
            id: self.id,
            from_email: self.from_email,
            from_name: self.from_name,
            subject: self.subject,
            body: self.body,
            sent_at: self.sent_at.unwrap_or_else(Utc::now),
            is_read: self.is_read,
            priority: self.priority,
            labels: self.labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIRE: &str = r#"{
        "id": "42",
        "fromEmail": "ops@example.com",
        "fromName": "Ops Team",
        "subject": "Maintenance window",
        "body": "<p>Tonight</p>",
        "sentAt": "2024-03-01T18:00:00.000Z",
        "isRead": false,
        "priority": "high",
        "labels": ["work", "work"]
    }"#;

    #[test]
    fn test_deserialize_wire_thread() {
        let thread: Thread = serde_json::from_str(WIRE).unwrap();
        assert_eq!(thread.id.as_str(), "42");
        assert_eq!(thread.from_name, "Ops Team");
        assert_eq!(thread.priority, Priority::High);
        assert!(!thread.is_read);
        // Duplicate labels are preserved
        assert_eq!(thread.labels.len(), 2);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let thread: Thread = serde_json::from_str(WIRE).unwrap();
        let json = serde_json::to_value(&thread).unwrap();
        assert_eq!(json["fromEmail"], "ops@example.com");
        assert_eq!(json["isRead"], false);
        assert_eq!(json["priority"], "high");
        assert_eq!(json["id"], "42");
    }

    #[test]
    fn test_missing_labels_default_to_empty() {
        let json = r#"{
            "id": "1", "fromEmail": "a@b.c", "fromName": "A", "subject": "S",
            "body": "", "sentAt": "2024-01-01T00:00:00Z", "isRead": true,
            "priority": "low"
        }"#;
        let thread: Thread = serde_json::from_str(json).unwrap();
        assert!(thread.labels.is_empty());
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let json = WIRE.replace("\"high\"", "\"urgent\"");
        assert!(serde_json::from_str::<Thread>(&json).is_err());
    }

    #[test]
    fn test_builder_and_labels() {
        let thread = Thread::builder("t1")
            .from("Ada", "ada@example.com")
            .subject("Hello")
            .labels(["personal"])
            .build();
        assert_eq!(thread.from_email, "ada@example.com");
        assert!(thread.has_label("personal"));
        assert!(!thread.has_label("work"));
        assert_eq!(thread.priority.badge(), "Medium Priority");
    }
}
