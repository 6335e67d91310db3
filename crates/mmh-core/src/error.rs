//! Error types for the composer.
//!
//! Each failure family from the submission and interception flows has its own
//! enum; [`CoreError`] unifies them for callers that do not care which stage
//! failed.

use mmh_model::{ModelError, ValidationBounds};
use thiserror::Error;

/// Local, synchronous validation failures. These never touch the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The message is empty after token substitution.
    #[error("Please fill out the mod message form")]
    EmptyMessage,

    /// A `{todo` or `{suspensionDurationDays` token survived substitution.
    #[error(
        "It looks like there are incomplete placeholders; please ensure all necessary detail is complete"
    )]
    IncompletePlaceholders {
        /// The offending token as it appears in the text.
        token: String,
    },

    /// Text length is outside the accepted bounds.
    #[error("{label} has {length} characters which is outside the supported bounds of {bounds}")]
    Length {
        /// What the text is.
        label: &'static str,
        /// Character count.
        length: usize,
        /// Accepted range.
        bounds: ValidationBounds,
    },

    /// The form has no target user id.
    #[error("the message form has no target user id")]
    MissingUserId,

    /// The main account id equals the account being deleted.
    #[error("Cannot enter current account ID in parent field.")]
    SameAccount,

    /// The main account has not been looked up yet.
    #[error("the main account has not been resolved yet")]
    MainAccountUnresolved,
}

impl ValidationError {
    /// Checks `text` against `bounds`.
    pub fn check_length(
        label: &'static str,
        text: &str,
        bounds: ValidationBounds,
    ) -> std::result::Result<(), Self> {
        let length = text.chars().count();
        if bounds.contains(length) {
            Ok(())
        } else {
            Err(Self::Length {
                label,
                length,
                bounds,
            })
        }
    }
}

/// Network or protocol failures talking to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The request could not be completed.
    #[error("request to {path} failed: {message}")]
    Network {
        /// Request path.
        path: String,
        /// Underlying error text.
        message: String,
    },

    /// The host answered with an unexpected status.
    #[error("{path} returned HTTP {status}")]
    Status {
        /// Request path.
        path: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be interpreted.
    #[error("invalid response from {path}: {message}")]
    InvalidResponse {
        /// Request path.
        path: String,
        /// What was wrong with it.
        message: String,
    },
}

impl TransportError {
    /// Wraps a payload error for `path`.
    pub fn invalid_response(path: impl Into<String>, error: &ModelError) -> Self {
        Self::InvalidResponse {
            path: path.into(),
            message: error.to_string(),
        }
    }

    /// Request path the error belongs to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Network { path, .. }
            | Self::Status { path, .. }
            | Self::InvalidResponse { path, .. } => path,
        }
    }
}

/// Errors raised while building the template registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two templates share a name.
    #[error("duplicate template name: {0}")]
    DuplicateName(String),

    /// A template aliases a reason the host does not know.
    #[error("template '{template}' aliases unknown system reason '{reason_id}'")]
    UnknownSystemReason {
        /// Template name.
        template: String,
        /// The unknown reason id.
        reason_id: String,
    },

    /// A template is named after a system reason and could never be selected.
    #[error("template name '{0}' is a system reason id")]
    ShadowsSystemReason(String),
}

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read or written.
    #[error("settings file {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML.
    #[error("invalid settings file {path}: {message}")]
    Parse {
        /// File path.
        path: String,
        /// Parser message.
        message: String,
    },

    /// Settings could not be serialized.
    #[error("could not serialize settings: {0}")]
    Serialize(String),

    /// No home directory to derive the config location from.
    #[error("could not determine the configuration directory")]
    NoConfigDir,
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Local validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Registry construction failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Settings failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// Returns a message suitable for a toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Transport(_) => {
                "Something went wrong, check the log for details".to_string()
            }
            Self::Registry(err) => err.to_string(),
            Self::Config(err) => err.to_string(),
        }
    }
}

/// Result type alias for composer operations.
pub type Result<T> = std::result::Result<T, CoreError>;
