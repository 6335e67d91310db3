use std::sync::Arc;

use mmh_model::SystemReasonIds;

use super::{Interception, Interceptor, PendingRequestContext, ResponseTransform};
use crate::config::DEFAULT_TEMPLATE_FETCH_PATH;
use crate::notify::Notice;
use crate::registry::TemplateRegistry;
use crate::transport::{Method, RequestDescriptor};

/// Path prefix shared by the host's template endpoints.
pub const TEMPLATE_PATH_PREFIX: &str = "/admin/template/";

/// Query parameter carrying the selected reason.
pub const REASON_ID_PARAM: &str = "reasonId";

const TEMPLATE_NOT_FOUND: &str = "Mod Message Helper - Template with that name not found!";

/// Serves custom templates through the host's template-fetch endpoint.
///
/// Requests to the configured fetch path, or anywhere under
/// [`TEMPLATE_PATH_PREFIX`], are candidates. System reasons pass through with
/// their footer normalized. Custom names are answered by fetching the aliased
/// system reason and overlaying the template.
#[derive(Debug, Clone)]
pub struct TemplateFetchInterceptor {
    registry: Arc<TemplateRegistry>,
    system_ids: Arc<SystemReasonIds>,
    fetch_path: String,
}

impl TemplateFetchInterceptor {
    /// Creates the interceptor for the default fetch path.
    pub fn new(registry: Arc<TemplateRegistry>, system_ids: Arc<SystemReasonIds>) -> Self {
        Self {
            registry,
            system_ids,
            fetch_path: DEFAULT_TEMPLATE_FETCH_PATH.to_string(),
        }
    }

    /// Also intercepts `path`, the endpoint the composer fetches from.
    #[must_use]
    pub fn with_fetch_path(mut self, path: impl Into<String>) -> Self {
        self.fetch_path = path.into();
        self
    }

    fn is_template_path(&self, path: &str) -> bool {
        path == self.fetch_path || path.starts_with(TEMPLATE_PATH_PREFIX)
    }
}

impl Interceptor for TemplateFetchInterceptor {
    fn name(&self) -> &'static str {
        "template-fetch"
    }

    fn matches(&self, request: &RequestDescriptor) -> bool {
        request.method == Method::Get
            && self.is_template_path(&request.path)
            && request.query_value(REASON_ID_PARAM).is_some()
    }

    fn intercept(&self, request: &RequestDescriptor) -> Interception {
        let Some(reason_id) = request.query_value(REASON_ID_PARAM) else {
            return Interception::Continue;
        };

        if self.system_ids.contains(reason_id) {
            return Interception::PassThrough {
                post_process: ResponseTransform::NormalizeFooter,
            };
        }

        let Some(template) = self.registry.find(reason_id) else {
            tracing::warn!(reason_id, "no template registered under this name");
            return Interception::Reject {
                notice: Notice::danger(TEMPLATE_NOT_FOUND),
            };
        };

        let replacement = RequestDescriptor::get(request.path.clone())
            .with_query(REASON_ID_PARAM, template.analogous_system_reason_id.clone());
        tracing::info!(
            reason_id,
            alias = %template.analogous_system_reason_id,
            "substituting custom template"
        );
        Interception::Substitute(Box::new(PendingRequestContext {
            original: request.clone(),
            reason_id: reason_id.to_string(),
            replacement,
            template: template.clone(),
        }))
    }
}
