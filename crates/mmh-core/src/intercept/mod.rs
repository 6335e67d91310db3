//! Request interception.
//!
//! Outgoing requests are described by [`RequestDescriptor`] and offered to an
//! [`InterceptorChain`]. The first interceptor whose predicate matches decides
//! what happens to the request; unmatched requests go out unchanged.

mod fetcher;
mod selection;
mod template_fetch;

pub use fetcher::{Delivery, TemplateFetcher};
pub use selection::{SelectionToken, SelectionTracker};
pub use template_fetch::{REASON_ID_PARAM, TEMPLATE_PATH_PREFIX, TemplateFetchInterceptor};

use mmh_model::{FieldDefaults, Template};

use crate::notify::Notice;
use crate::transport::RequestDescriptor;

/// Sign-off as the host sends it.
const FOOTER_SIGN_OFF: &str = "Regards,\n\n";

/// Sign-off with a Markdown hard line break instead of a blank line.
const FOOTER_SIGN_OFF_FIXED: &str = "Regards,  \n";

/// Post-processing applied to a response before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseTransform {
    /// Deliver as received.
    #[default]
    Identity,
    /// Replace the first blank line after the footer sign-off with a hard break.
    NormalizeFooter,
}

impl ResponseTransform {
    /// Applies the transform in place.
    pub fn apply(self, defaults: &mut FieldDefaults) {
        match self {
            Self::Identity => {}
            Self::NormalizeFooter => {
                let Some(footer) = defaults.footer() else {
                    return;
                };
                if footer.contains(FOOTER_SIGN_OFF) {
                    let fixed = footer.replacen(FOOTER_SIGN_OFF, FOOTER_SIGN_OFF_FIXED, 1);
                    defaults.set_footer(fixed);
                }
            }
        }
    }
}

/// Bookkeeping for one substituted template fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequestContext {
    /// The request the page tried to make.
    pub original: RequestDescriptor,
    /// Custom reason id taken from the original query.
    pub reason_id: String,
    /// The system-reason request issued in its place.
    pub replacement: RequestDescriptor,
    /// Template merged over the replacement's response.
    pub template: Template,
}

/// What to do with an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum Interception {
    /// Not ours; send unchanged.
    Continue,
    /// Send unchanged, then post-process the response.
    PassThrough {
        /// Applied to the response before delivery.
        post_process: ResponseTransform,
    },
    /// Abort the request and tell the user why.
    Reject {
        /// Toast to show.
        notice: Notice,
    },
    /// Abort the request and fetch a replacement instead.
    Substitute(Box<PendingRequestContext>),
}

/// A predicate plus handler evaluated per outgoing request.
pub trait Interceptor {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this interceptor handles `request`.
    fn matches(&self, request: &RequestDescriptor) -> bool;

    /// Decision for a matched request.
    fn intercept(&self, request: &RequestDescriptor) -> Interception;
}

/// Ordered interceptors; the first match wins.
#[derive(Default)]
pub struct InterceptorChain {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl InterceptorChain {
    /// An empty chain that lets everything through.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interceptor.
    pub fn register(&mut self, interceptor: impl Interceptor + 'static) {
        self.interceptors.push(Box::new(interceptor));
    }

    /// Appends an interceptor, builder style.
    #[must_use]
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.register(interceptor);
        self
    }

    /// Decision of the first matching interceptor.
    #[must_use]
    pub fn decide(&self, request: &RequestDescriptor) -> Interception {
        match self
            .interceptors
            .iter()
            .find(|interceptor| interceptor.matches(request))
        {
            Some(interceptor) => {
                let decision = interceptor.intercept(request);
                tracing::debug!(
                    interceptor = interceptor.name(),
                    %request,
                    decision = decision_label(&decision),
                    "intercepted request"
                );
                decision
            }
            None => Interception::Continue,
        }
    }

    /// Number of registered interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.interceptors.iter().map(|interceptor| interceptor.name()))
            .finish()
    }
}

fn decision_label(decision: &Interception) -> &'static str {
    match decision {
        Interception::Continue => "continue",
        Interception::PassThrough { .. } => "pass-through",
        Interception::Reject { .. } => "reject",
        Interception::Substitute(_) => "substitute",
    }
}
