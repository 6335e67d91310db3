use std::fs;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::info;

use mmh_core::{
    AccountPii, BanEvasionAction, BanEvasionController, BanEvasionOutcome, Composer,
    ComposerAction, ComposerOutcome, Delivery, FormAdapter, FormView, MemoryForm, Navigator,
    Notifier, Settings, SubmitConfig, SubmitOutcome, Transport,
};
use mmh_http::HostClient;
use mmh_model::{FieldDefaults, FormField};

use crate::cli::{DeleteSockArgs, PreviewArgs, SendArgs};
use crate::session::{host_client, require_fkey};
use crate::summary::templates_table;

/// Page the composer pretends to be on.
const COMPOSER_PAGE: &str = "/users/message/create";

pub type MessageComposer<N, V> = Composer<HostClient, N, V, MemoryForm>;

/// Wires a composer for the configured site around `form`.
pub fn build_composer<N, V>(
    settings: &Settings,
    notifier: N,
    navigator: V,
    form: MemoryForm,
) -> Result<MessageComposer<N, V>>
where
    N: Notifier,
    V: Navigator,
{
    let registry = settings.registry().context("build template registry")?;
    let client = host_client(settings)?;
    let submit_config = SubmitConfig {
        send_path: settings.endpoints.message_send.clone(),
        ..SubmitConfig::default()
    };
    let composer = Composer::new(
        registry,
        settings.system_reason_ids(),
        settings.scope(),
        client,
        notifier,
        navigator,
        form,
    )
    .context("wire composer")?;
    Ok(composer
        .with_template_fetch_path(settings.endpoints.template_fetch.as_str())
        .with_submit_config(submit_config))
}

/// Table of the templates offered on the configured site.
pub fn run_templates(settings: &Settings) -> Result<Table> {
    let registry = settings.registry().context("build template registry")?;
    let scope = settings.scope();
    let templates = registry.list(&scope);
    info!(site = %scope.parent_url, count = templates.len(), "listing templates");
    Ok(templates_table(&templates))
}

/// Runs one selection and returns what it delivered.
#[tracing::instrument(name = "preview", skip_all, fields(reason = %args.reason))]
pub async fn run_preview<N, V>(
    settings: &Settings,
    args: &PreviewArgs,
    notifier: N,
    navigator: V,
) -> Result<Delivery>
where
    N: Notifier,
    V: Navigator,
{
    let form = MemoryForm::from_system_reasons(&settings.system_reason_ids());
    let mut composer = build_composer(settings, notifier, navigator, form)?;
    composer.initialize(COMPOSER_PAGE).await?;
    let delivery = composer
        .select_reason(&args.reason)
        .await
        .with_context(|| format!("fetch defaults for '{}'", args.reason))?;
    Ok(delivery)
}

/// Pretty JSON of fetched defaults.
pub fn render_defaults(defaults: &FieldDefaults) -> Result<String> {
    serde_json::to_string_pretty(defaults).context("serialize defaults")
}

/// Result of `mmh send`.
#[derive(Debug, Clone, PartialEq)]
pub struct SendReport {
    /// What the submission controller decided.
    pub outcome: SubmitOutcome,
    /// Where a delegated message landed once posted as the site would.
    pub plain_location: Option<String>,
}

impl SendReport {
    /// Whether the message went out.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self.outcome {
            SubmitOutcome::Done { .. } => true,
            SubmitOutcome::Delegated => self.plain_location.is_some(),
            _ => false,
        }
    }
}

/// Composes a message on an in-memory form and submits it.
#[tracing::instrument(name = "send", skip_all, fields(user = args.user, reason = %args.reason))]
pub async fn run_send<N, V>(
    settings: &Settings,
    args: &SendArgs,
    notifier: N,
    navigator: V,
) -> Result<SendReport>
where
    N: Notifier,
    V: Navigator,
{
    let fkey = require_fkey(settings)?;
    let body = match &args.body_file {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("read message body from {}", path.display()))?,
        ),
        None => None,
    };

    let form = MemoryForm::from_system_reasons(&settings.system_reason_ids())
        .with(FormField::AboutUserId, args.user.to_string())
        .with(FormField::AntiForgeryToken, fkey);
    let mut composer = build_composer(settings, notifier, navigator, form)?;
    composer.initialize(COMPOSER_PAGE).await?;

    let delivery = composer
        .select_reason(&args.reason)
        .await
        .with_context(|| format!("fetch defaults for '{}'", args.reason))?;
    match delivery {
        Delivery::Apply(_) => {}
        Delivery::Rejected => bail!("no template named '{}'", args.reason),
        Delivery::Skipped | Delivery::Discarded => bail!("select a reason to send a message"),
    }

    if let Some(days) = args.days {
        composer
            .form_mut()
            .write(FormField::SuspendDays, days.to_string());
        composer.dispatch(ComposerAction::SuspensionChanged).await?;
    }
    if let Some(body) = body {
        composer.form_mut().set_editor_text(body);
    }

    let outcome = match composer.dispatch(ComposerAction::Submit).await? {
        ComposerOutcome::Submitted(outcome) => outcome,
        other => bail!("unexpected composer outcome: {other:?}"),
    };
    let plain_location = match outcome {
        SubmitOutcome::Delegated => Some(send_plain(&composer, settings).await?),
        _ => None,
    };
    Ok(SendReport {
        outcome,
        plain_location,
    })
}

/// Posts the form unchanged, as the site's own submit would.
async fn send_plain<N, V>(composer: &MessageComposer<N, V>, settings: &Settings) -> Result<String>
where
    N: Notifier,
    V: Navigator,
{
    let form = composer.form();
    if form.editor_text().trim().is_empty() {
        bail!("the message is empty");
    }
    let path = settings.endpoints.message_send.as_str();
    let response = composer
        .transport()
        .post_form(path, &form.serialize())
        .await
        .context("send message")?;
    if !response.is_success() {
        bail!("{path} returned HTTP {}", response.status);
    }
    info!(reason = %form.reason_id(), "message sent by the site's own handler");
    composer.navigator().navigate(&response.url);
    Ok(response.url)
}

/// Looks up the main account, fills in the dialog and submits it.
#[tracing::instrument(name = "delete_sock", skip_all, fields(sock = args.sock, main = args.main))]
pub async fn run_delete_sock<N, V>(
    settings: &Settings,
    args: &DeleteSockArgs,
    notifier: N,
    navigator: V,
) -> Result<BanEvasionOutcome>
where
    N: Notifier,
    V: Navigator,
{
    let fkey = require_fkey(settings)?;
    let client = host_client(settings)?;
    let mut controller = BanEvasionController::new(&client, &notifier, &navigator, fkey, args.sock);

    let pii = AccountPii {
        email: args.email.clone(),
        real_name: args.real_name.clone(),
    };
    let lookup = controller
        .dispatch(BanEvasionAction::LookupMain {
            main_account_id: args.main,
            pii,
        })
        .await;
    if !matches!(lookup, BanEvasionOutcome::MainResolved { .. }) {
        return Ok(lookup);
    }

    let form = controller.form_mut();
    form.deletion_reason = args.reason.into();
    form.deletion_details = format!("{}{}", args.details, form.deletion_details);
    form.annotation_details = if form.annotation_details.is_empty() {
        args.annotation.clone()
    } else {
        format!("{} | {}", args.annotation, form.annotation_details)
    };
    form.message_after = args.message_after;

    Ok(controller.dispatch(BanEvasionAction::Submit).await)
}
