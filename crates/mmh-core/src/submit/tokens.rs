//! Token substitution and the incomplete-placeholder guard.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Placeholder the host fills with the suspension length.
pub const SUSPENSION_DURATION_TOKEN: &str = "{suspensionDurationDays}";

static INCOMPLETE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{todo|\{suspensionDurationDays").expect("Invalid placeholder regex")
});

/// Expands host tokens in the message before it is validated and sent.
pub trait TokenExpander {
    /// Returns `text` with every known token replaced.
    fn expand(&self, text: &str, suspend_days: u32) -> String;
}

impl<F> TokenExpander for F
where
    F: Fn(&str, u32) -> String,
{
    fn expand(&self, text: &str, suspend_days: u32) -> String {
        self(text, suspend_days)
    }
}

/// The host's own expansion: the suspension length token becomes the day count.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuspensionTokens;

impl TokenExpander for SuspensionTokens {
    fn expand(&self, text: &str, suspend_days: u32) -> String {
        if suspend_days == 0 {
            return text.to_string();
        }
        text.replace(SUSPENSION_DURATION_TOKEN, &suspend_days.to_string())
    }
}

/// Rejects empty text and text that still carries a placeholder.
pub fn check_message(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    match INCOMPLETE_PLACEHOLDER.find(text) {
        Some(found) => Err(ValidationError::IncompletePlaceholders {
            token: found.as_str().to_string(),
        }),
        None => Ok(()),
    }
}
