//! Request identity for last-request-wins consumers.

pub type RequestId = u64;

/// Issues increasing request ids and remembers the newest one.
///
/// Responses are matched back by id; anything but the latest is stale.
#[derive(Debug, Default, Clone)]
pub struct RequestTracker {
    latest: RequestId,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, request_id: RequestId) -> bool {
        self.latest != 0 && request_id == self.latest
    }

    pub fn latest(&self) -> Option<RequestId> {
        (self.latest != 0).then_some(self.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_current() {
        let mut tracker = RequestTracker::new();
        assert!(!tracker.is_current(0));
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert_eq!(tracker.latest(), Some(second));
    }
}
