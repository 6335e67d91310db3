//! Inclusive text length bounds.

use std::fmt;

/// Inclusive length range measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationBounds {
    /// Smallest accepted length.
    pub min: usize,
    /// Largest accepted length; `None` means unbounded.
    pub max: Option<usize>,
}

impl ValidationBounds {
    /// Annotation text accepted by the host (10 to 300 characters).
    pub const ANNOTATION: Self = Self::new(10, Some(300));

    /// Account deletion details accepted by the host (15 to 600 characters).
    pub const DELETION_DETAILS: Self = Self::new(15, Some(600));

    /// Creates bounds.
    #[must_use]
    pub const fn new(min: usize, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// Whether a length falls inside the bounds.
    #[must_use]
    pub fn contains(&self, length: usize) -> bool {
        match self.max {
            Some(max) => self.min <= length && length <= max,
            None => self.min <= length,
        }
    }

    /// Character count of `text` checked against the bounds.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        self.contains(text.chars().count())
    }
}

impl fmt::Display for ValidationBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{} to {}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}
