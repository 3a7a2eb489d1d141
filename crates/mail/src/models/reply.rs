//! Outgoing reply payload

use serde::{Deserialize, Serialize};

/// Body of `POST /reply/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyData {
    pub from: String,
    pub to: String,
    pub subject: String,
    /// HTML body
    pub body: String,
}

/// Prefix a subject with `Re:` unless it already carries one
pub fn reply_subject(subject: &str) -> String {
    if subject.starts_with("Re:") {
        subject.to_string()
    } else {
        format!("Re: {}", subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_subject_adds_prefix() {
        assert_eq!(reply_subject("Lunch"), "Re: Lunch");
    }

    #[test]
    fn test_reply_subject_keeps_existing_prefix() {
        assert_eq!(reply_subject("Re: Lunch"), "Re: Lunch");
    }

    #[test]
    fn test_reply_data_wire_shape() {
        let data = ReplyData {
            from: "me@example.com".into(),
            to: "you@example.com".into(),
            subject: "Re: Hi".into(),
            body: "<p>Yo</p>".into(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["from"], "me@example.com");
        assert_eq!(json["to"], "you@example.com");
        assert_eq!(json["subject"], "Re: Hi");
        assert_eq!(json["body"], "<p>Yo</p>");
    }
}
