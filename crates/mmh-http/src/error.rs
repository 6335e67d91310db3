//! Error types for building a host client.

use thiserror::Error;

/// Errors raised while setting up a [`HostClient`](crate::HostClient).
///
/// Failures of individual requests are reported as
/// [`TransportError`](mmh_core::TransportError) instead.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The site URL could not be parsed.
    #[error("invalid site url '{url}': {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// The session cookie cannot be sent as a header.
    #[error("session cookie contains characters not allowed in a header")]
    InvalidCookie,

    /// The underlying client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl HttpError {
    /// Returns a message suitable for the terminal.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidUrl { url, .. } => {
                format!("The site URL '{url}' is not valid. Check the [site] section of your settings.")
            }
            Self::InvalidCookie => {
                "The session cookie is malformed. Copy it again from your browser.".to_string()
            }
            Self::Client(_) => "Could not start the HTTP client.".to_string(),
        }
    }
}

/// Result type alias for client setup.
pub type Result<T> = std::result::Result<T, HttpError>;
