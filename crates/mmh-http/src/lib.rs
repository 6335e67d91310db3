//! HTTP transport for the mod message composer.
//!
//! [`HostClient`] implements [`mmh_core::Transport`] with `reqwest`, sending
//! the moderator's session cookie so the host treats requests as coming from
//! their browser.

mod client;
mod error;

pub use client::{HostClient, USER_AGENT_VALUE};
pub use error::{HttpError, Result};
