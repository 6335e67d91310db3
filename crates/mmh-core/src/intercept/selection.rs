//! Generation tokens for reason selections.

/// Identifies one selection. Only the most recent token is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionToken {
    generation: u64,
    reason_id: String,
}

impl SelectionToken {
    /// Reason id selected when the token was issued.
    #[must_use]
    pub fn reason_id(&self) -> &str {
        &self.reason_id
    }

    /// Generation number.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Issues a new token per selection change.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    generation: u64,
}

impl SelectionTracker {
    /// A tracker with no selection yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a selection, invalidating every earlier token.
    pub fn begin(&mut self, reason_id: impl Into<String>) -> SelectionToken {
        self.generation += 1;
        SelectionToken {
            generation: self.generation,
            reason_id: reason_id.into(),
        }
    }

    /// Whether no selection has happened since `token` was issued.
    #[must_use]
    pub fn is_current(&self, token: &SelectionToken) -> bool {
        token.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_selection_invalidates_earlier() {
        let mut tracker = SelectionTracker::new();
        let first = tracker.begin("a");
        assert!(tracker.is_current(&first));
        let second = tracker.begin("b");
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert_eq!(second.reason_id(), "b");
    }

    #[test]
    fn test_reselecting_same_reason_still_invalidates() {
        let mut tracker = SelectionTracker::new();
        let first = tracker.begin("a");
        let again = tracker.begin("a");
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&again));
        assert!(again.generation() > first.generation());
    }
}
