//! Latest-request-wins guard for overlapping listing fetches.
//!
//! The filter controller issues a new fetch on every filter change. Two
//! fetches may be in flight at once and can resolve out of order; only the
//! response for the most recently issued request may replace the displayed
//! list. Each fetch takes a ticket from this sequencer and checks it before
//! applying its response.

/// Monotonically increasing ticket counter; the highest issued ticket is the
/// only one considered current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new request, superseding all earlier ones.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a response holding this ticket is still allowed to apply.
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_request_is_current() {
        let mut seq = RequestSequencer::new();
        let ticket = seq.begin();
        assert!(seq.is_current(ticket));
    }

    #[test]
    fn later_request_supersedes_earlier_one() {
        let mut seq = RequestSequencer::new();
        let first = seq.begin();
        let second = seq.begin();
        // The earlier response must be dropped whenever it resolves.
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn out_of_order_completion_still_keeps_latest() {
        let mut seq = RequestSequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        // B resolves first and applies; A resolving afterwards must not.
        assert!(seq.is_current(b));
        assert!(!seq.is_current(a));
        // A third request supersedes both.
        let c = seq.begin();
        assert!(!seq.is_current(b));
        assert!(seq.is_current(c));
    }
}
