//! Reason ids understood natively by the host form.

use std::collections::BTreeSet;

/// Value of the selector's "no template" option.
pub const BLANK_REASON_ID: &str = "0";

/// System reason the host backend records for intercepted custom submissions.
pub const FALLBACK_REASON_ID: &str = "OtherViolation";

/// The reason ids offered by the host selector before any custom option is added.
///
/// Built once at initialization and never mutated, so a custom option added
/// later is never mistaken for a system reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemReasonIds {
    ids: BTreeSet<String>,
}

impl SystemReasonIds {
    /// Collects the selector option values.
    pub fn from_options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `reason_id` is a system reason.
    #[must_use]
    pub fn contains(&self, reason_id: &str) -> bool {
        self.ids.contains(reason_id)
    }

    /// Number of known reasons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no options were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates the ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
