//! Page-level wiring of the message composer.
//!
//! [`Composer`] plays the part of the host page: it owns the form and the
//! collaborators, injects the registry's templates into the selector, runs
//! selections through the interceptor chain and hands submit events to the
//! [`SubmissionController`].

use std::sync::Arc;

use mmh_model::{BLANK_REASON_ID, FieldDefaults, FormField, HostScope, SystemReasonIds};

use crate::config::DEFAULT_TEMPLATE_FETCH_PATH;
use crate::error::{RegistryError, Result, TransportError};
use crate::form::{CUSTOM_TEMPLATES_GROUP, FormAdapter, FormView, fix_auto_suspend_pluralisation};
use crate::intercept::{
    Delivery, Interception, InterceptorChain, REASON_ID_PARAM, SelectionToken, SelectionTracker,
    TemplateFetchInterceptor, TemplateFetcher,
};
use crate::notify::{Navigator, Notifier};
use crate::registry::TemplateRegistry;
use crate::submit::{SubmissionController, SubmitConfig, SubmitOutcome, SuspensionTokens, TokenExpander};
use crate::transport::{Method, RequestDescriptor, Transport};

/// Events the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerAction {
    /// The reason selector changed.
    SelectReason(String),
    /// The suspension length changed.
    SuspensionChanged,
    /// The form was submitted.
    Submit,
}

/// What an action led to.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerOutcome {
    /// A selection finished.
    Selected(Delivery),
    /// The auto-suspend message was brought in line with the new length.
    SuspensionUpdated,
    /// A submission finished.
    Submitted(SubmitOutcome),
}

/// A selection between issuing its request and applying the result.
#[derive(Debug, Clone)]
pub struct PendingSelection {
    token: SelectionToken,
    fetch: Option<(RequestDescriptor, Interception)>,
}

impl PendingSelection {
    /// Token issued for this selection.
    #[must_use]
    pub fn token(&self) -> &SelectionToken {
        &self.token
    }

    /// The template-fetch request, unless the blank option was selected.
    #[must_use]
    pub fn request(&self) -> Option<&RequestDescriptor> {
        self.fetch.as_ref().map(|(request, _)| request)
    }

    /// The interceptor chain's decision for the request.
    #[must_use]
    pub fn decision(&self) -> Option<&Interception> {
        self.fetch.as_ref().map(|(_, decision)| decision)
    }
}

fn template_chain(
    registry: &Arc<TemplateRegistry>,
    system_ids: &Arc<SystemReasonIds>,
    fetch_path: &str,
) -> InterceptorChain {
    InterceptorChain::new().with(
        TemplateFetchInterceptor::new(Arc::clone(registry), Arc::clone(system_ids))
            .with_fetch_path(fetch_path),
    )
}

/// The message composer page.
pub struct Composer<T, N, V, F> {
    registry: Arc<TemplateRegistry>,
    system_ids: Arc<SystemReasonIds>,
    scope: HostScope,
    chain: InterceptorChain,
    tracker: SelectionTracker,
    template_fetch_path: String,
    submit_config: SubmitConfig,
    expander: Box<dyn TokenExpander>,
    transport: T,
    notifier: N,
    navigator: V,
    form: F,
}

impl<T, N, V, F> Composer<T, N, V, F>
where
    T: Transport,
    N: Notifier,
    V: Navigator,
    F: FormAdapter,
{
    /// Wires a composer. The template-fetch interceptor is registered first.
    ///
    /// Fails when a template aliases a reason missing from `system_ids` or is
    /// named after one.
    pub fn new(
        registry: TemplateRegistry,
        system_ids: SystemReasonIds,
        scope: HostScope,
        transport: T,
        notifier: N,
        navigator: V,
        form: F,
    ) -> std::result::Result<Self, RegistryError> {
        registry.validate_against(&system_ids)?;
        let registry = Arc::new(registry);
        let system_ids = Arc::new(system_ids);
        let template_fetch_path = DEFAULT_TEMPLATE_FETCH_PATH.to_string();
        let chain = template_chain(&registry, &system_ids, &template_fetch_path);
        Ok(Self {
            registry,
            system_ids,
            scope,
            chain,
            tracker: SelectionTracker::new(),
            template_fetch_path,
            submit_config: SubmitConfig::default(),
            expander: Box::new(SuspensionTokens),
            transport,
            notifier,
            navigator,
            form,
        })
    }

    /// Uses a different template-fetch endpoint and intercepts it.
    #[must_use]
    pub fn with_template_fetch_path(mut self, path: impl Into<String>) -> Self {
        self.template_fetch_path = path.into();
        self.chain = template_chain(&self.registry, &self.system_ids, &self.template_fetch_path);
        self
    }

    /// Uses different submission settings.
    #[must_use]
    pub fn with_submit_config(mut self, config: SubmitConfig) -> Self {
        self.submit_config = config;
        self
    }

    /// Replaces the host token expansion run before submission.
    #[must_use]
    pub fn with_token_expander(mut self, expander: impl TokenExpander + 'static) -> Self {
        self.expander = Box::new(expander);
        self
    }

    /// Adds the visible templates to the selector and honours a `reasonId`
    /// in the page URL.
    ///
    /// Returns the delivery of that preselection, if there was one.
    pub async fn initialize(&mut self, page_url: &str) -> Result<Option<Delivery>> {
        let visible: Vec<String> = self
            .registry
            .list(&self.scope)
            .into_iter()
            .map(|template| template.template_name.clone())
            .collect();
        for name in &visible {
            self.form
                .add_reason_option(Some(CUSTOM_TEMPLATES_GROUP), name, name);
        }
        tracing::info!(
            templates = visible.len(),
            site = %self.scope.parent_url,
            "composer initialized"
        );

        let preselected = RequestDescriptor::parse(Method::Get, page_url)
            .ok()
            .and_then(|url| url.query_value(REASON_ID_PARAM).map(str::to_string))
            .filter(|reason_id| !reason_id.is_empty());
        match preselected {
            Some(reason_id) => {
                tracing::debug!(reason_id = %reason_id, "preselecting reason from page url");
                Ok(Some(self.select_reason(&reason_id).await?))
            }
            None => Ok(None),
        }
    }

    /// Handles one page event.
    pub async fn dispatch(&mut self, action: ComposerAction) -> Result<ComposerOutcome> {
        match action {
            ComposerAction::SelectReason(reason_id) => {
                let delivery = self.select_reason(&reason_id).await?;
                Ok(ComposerOutcome::Selected(delivery))
            }
            ComposerAction::SuspensionChanged => {
                fix_auto_suspend_pluralisation(&mut self.form);
                Ok(ComposerOutcome::SuspensionUpdated)
            }
            ComposerAction::Submit => Ok(ComposerOutcome::Submitted(self.submit().await)),
        }
    }

    /// Selects a reason and applies its defaults once fetched.
    pub async fn select_reason(&mut self, reason_id: &str) -> Result<Delivery> {
        let pending = self.begin_selection(reason_id);
        let fetched = self.fetch(&pending).await;
        Ok(self.finish_selection(pending, fetched)?)
    }

    /// First half of a selection: update the form, issue a token and decide
    /// how the template fetch is served.
    ///
    /// A rejected fetch is reported to the user here, once.
    pub fn begin_selection(&mut self, reason_id: &str) -> PendingSelection {
        self.form.set_reason_id(reason_id);
        if let Some(text) = self.form.displayed_template_name() {
            self.form.write(FormField::CustomTemplateName, text);
        }

        let token = self.tracker.begin(reason_id);
        if reason_id == BLANK_REASON_ID {
            return PendingSelection { token, fetch: None };
        }

        let request = RequestDescriptor::get(self.template_fetch_path.as_str())
            .with_query(REASON_ID_PARAM, reason_id);
        let decision = self.chain.decide(&request);
        if let Interception::Reject { notice } = &decision {
            self.notifier.toast(notice.clone());
        }
        PendingSelection {
            token,
            fetch: Some((request, decision)),
        }
    }

    /// Performs the network part of a selection. Safe to run concurrently
    /// with other selections.
    pub async fn fetch(
        &self,
        pending: &PendingSelection,
    ) -> std::result::Result<Option<FieldDefaults>, TransportError> {
        match &pending.fetch {
            Some((request, decision)) => {
                TemplateFetcher::new(&self.transport)
                    .execute(request, decision)
                    .await
            }
            None => Ok(None),
        }
    }

    /// Second half of a selection: apply the result if no newer selection
    /// happened in the meantime.
    pub fn finish_selection(
        &mut self,
        pending: PendingSelection,
        fetched: std::result::Result<Option<FieldDefaults>, TransportError>,
    ) -> std::result::Result<Delivery, TransportError> {
        if !self.tracker.is_current(&pending.token) {
            tracing::debug!(
                reason_id = pending.token.reason_id(),
                "discarding result of superseded selection"
            );
            return Ok(Delivery::Discarded);
        }
        if pending.fetch.is_none() {
            return Ok(Delivery::Skipped);
        }
        match fetched? {
            Some(defaults) => {
                self.form.apply_defaults(&defaults);
                Ok(Delivery::Apply(defaults))
            }
            None => Ok(Delivery::Rejected),
        }
    }

    /// Runs the submission state machine on the current form.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let controller = SubmissionController::new(
            &self.transport,
            &self.notifier,
            &self.navigator,
            &self.submit_config,
        );
        controller
            .submit(&mut self.form, &self.system_ids, self.expander.as_ref())
            .await
    }

    /// The form.
    pub fn form(&self) -> &F {
        &self.form
    }

    /// The form, for edits between events.
    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Registered templates.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Reason ids the host understands.
    pub fn system_ids(&self) -> &SystemReasonIds {
        &self.system_ids
    }

    /// Deployment the composer runs against.
    pub fn scope(&self) -> &HostScope {
        &self.scope
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The navigator.
    pub fn navigator(&self) -> &V {
        &self.navigator
    }

    /// Consumes the composer, returning the form.
    pub fn into_form(self) -> F {
        self.form
    }
}
