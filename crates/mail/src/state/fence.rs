//! Request fencing
//!
//! Every logical operation (list load, detail fetch) gets its own fence.
//! Only the response to the most recently issued request may be applied.

/// Sequence number handed out when a request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Monotonic ticket issuer for one logical operation
#[derive(Debug, Default)]
pub struct RequestFence {
    latest: u64,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Whether a response carrying `ticket` may still be applied
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Supersede all outstanding tickets without issuing a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut fence = RequestFence::new();
        let first = fence.issue();
        let second = fence.issue();
        assert!(second > first);
        assert!(!fence.is_current(first));
        assert!(fence.is_current(second));
    }

    #[test]
    fn test_invalidate_supersedes_outstanding() {
        let mut fence = RequestFence::new();
        let ticket = fence.issue();
        fence.invalidate();
        assert!(!fence.is_current(ticket));
        let fresh = fence.issue();
        assert!(fence.is_current(fresh));
    }
}
