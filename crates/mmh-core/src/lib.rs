//! Mod message composer core.
//!
//! Serves custom message templates through the host's template-fetch endpoint
//! and wraps form submission in a send-then-annotate protocol. The host page,
//! its network and its notifications are reached only through the
//! [`Transport`], [`Notifier`], [`Navigator`] and [`FormAdapter`] seams.
//!
//! - [`registry`] / [`catalog`]: custom templates and the built-in set
//! - [`intercept`]: interceptor chain, template substitution and stale-result discard
//! - [`form`]: typed access to the host form
//! - [`submit`]: the submission state machine
//! - [`account`]: ban-evasion account deletion
//! - [`composer`]: wires the above the way the page does

pub mod account;
pub mod actions;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod error;
pub mod form;
pub mod intercept;
pub mod notify;
pub mod registry;
pub mod submit;
pub mod transport;

pub use account::{
    AccountPii, BanEvasionAction, BanEvasionController, BanEvasionForm, BanEvasionOutcome,
    DeleteReason, build_detail_string,
};
pub use composer::{Composer, ComposerAction, ComposerOutcome, PendingSelection};
pub use config::Settings;
pub use error::{ConfigError, CoreError, RegistryError, Result, TransportError, ValidationError};
pub use form::{FormAdapter, FormView, MemoryForm, ReasonOption};
pub use intercept::{
    Delivery, Interception, Interceptor, InterceptorChain, PendingRequestContext,
    ResponseTransform, SelectionToken, SelectionTracker, TemplateFetchInterceptor,
    TemplateFetcher,
};
pub use notify::{ConfirmPrompt, Navigator, Notice, NoticeKind, Notifier};
pub use registry::TemplateRegistry;
pub use submit::{
    SubmissionController, SubmitConfig, SubmitOutcome, SubmitState, SuspensionTokens,
    TokenExpander,
};
pub use transport::{Method, RequestDescriptor, Transport, TransportResponse};
