//! Two-phase submission: send the message, then annotate the account.
//!
//! A submit event runs one [`SubmissionController::submit`] call. System
//! templates and zero-day suspensions are left to the host. Everything else
//! is validated locally, posted straight to the message-send endpoint and,
//! once that succeeds, followed by an annotation. A failed annotation after a
//! successful send is surfaced as a decision for the user and never retried.

mod tokens;

pub use tokens::{SUSPENSION_DURATION_TOKEN, SuspensionTokens, TokenExpander, check_message};

use std::fmt;

use mmh_model::{FALLBACK_REASON_ID, FormField, SystemReasonIds, ValidationBounds};

use crate::actions::{self, MESSAGE_SAVE_PATH};
use crate::error::{TransportError, ValidationError};
use crate::form::{FormAdapter, FormView};
use crate::notify::{ConfirmPrompt, Navigator, Notice, Notifier};
use crate::transport::Transport;

/// Appended to the template name to form the annotation.
pub const ANNOTATION_SUFFIX: &str = " (content of previous entry)";

const SEND_FAILED: &str = "Something went wrong, check the log for details";

/// Settings for a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Message-send endpoint.
    pub send_path: String,
    /// Accepted annotation length.
    pub annotation_bounds: ValidationBounds,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            send_path: MESSAGE_SAVE_PATH.to_string(),
            annotation_bounds: ValidationBounds::ANNOTATION,
        }
    }
}

/// Where a submission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    /// Nothing submitted yet.
    Idle,
    /// Checking the form before anything is sent.
    Validating,
    /// Posting the message.
    Submitting,
    /// Message sent; annotating the recipient.
    Annotating,
    /// Left to the host's own submit handler.
    Delegated,
    /// Stopped before sending.
    Rejected,
    /// The message could not be sent.
    SendFailed,
    /// Sent and annotated.
    Done,
    /// Sent, but the annotation failed.
    PartialFailure,
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Annotating => "annotating",
            Self::Delegated => "delegated",
            Self::Rejected => "rejected",
            Self::SendFailed => "send-failed",
            Self::Done => "done",
            Self::PartialFailure => "partial-failure",
        };
        f.write_str(name)
    }
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The host's own submit handler should run.
    Delegated,
    /// Local validation failed; nothing was sent.
    Rejected(ValidationError),
    /// The message could not be sent; nothing was annotated.
    SendFailed(TransportError),
    /// Sent and annotated; the page moved to `location`.
    Done {
        /// URL the send response ended at.
        location: String,
    },
    /// Sent but not annotated.
    PartialFailure {
        /// URL the send response ended at.
        location: String,
        /// Whether the user chose to move there anyway.
        navigated: bool,
    },
}

impl SubmitOutcome {
    /// The state the submission finished in.
    #[must_use]
    pub fn state(&self) -> SubmitState {
        match self {
            Self::Delegated => SubmitState::Delegated,
            Self::Rejected(_) => SubmitState::Rejected,
            Self::SendFailed(_) => SubmitState::SendFailed,
            Self::Done { .. } => SubmitState::Done,
            Self::PartialFailure { .. } => SubmitState::PartialFailure,
        }
    }
}

/// Runs the submit state machine against the host collaborators.
#[derive(Debug)]
pub struct SubmissionController<'a, T, N, V> {
    transport: &'a T,
    notifier: &'a N,
    navigator: &'a V,
    config: &'a SubmitConfig,
}

impl<'a, T, N, V> SubmissionController<'a, T, N, V>
where
    T: Transport,
    N: Notifier,
    V: Navigator,
{
    /// Creates a controller.
    pub fn new(transport: &'a T, notifier: &'a N, navigator: &'a V, config: &'a SubmitConfig) -> Self {
        Self {
            transport,
            notifier,
            navigator,
            config,
        }
    }

    /// Handles one submit event.
    pub async fn submit<F, E>(
        &self,
        form: &mut F,
        system_ids: &SystemReasonIds,
        expander: &E,
    ) -> SubmitOutcome
    where
        F: FormAdapter + ?Sized,
        E: TokenExpander + ?Sized,
    {
        let mut state = SubmitState::Idle;
        tracing::debug!(%state, "submit triggered");

        if form.has_custom_template_name()
            && let Some(name) = form.custom_template_name()
        {
            tracing::debug!(name = %name, "submitting under a renamed template");
            form.add_reason_option(None, &name, &name);
            form.set_reason_id(&name);
        }

        let reason_id = form.reason_id();
        let suspend_days = form.suspend_days();
        if system_ids.contains(&reason_id) || suspend_days == 0 {
            tracing::info!(reason_id = %reason_id, suspend_days, "leaving submission to the host");
            return SubmitOutcome::Delegated;
        }

        advance(&mut state, SubmitState::Validating);
        let text = expander.expand(&form.editor_text(), suspend_days);
        let annotation = format!("{reason_id}{ANNOTATION_SUFFIX}");
        let user_id = match self.validate(form, &text, &annotation) {
            Ok(user_id) => user_id,
            Err(err) => return self.reject(err),
        };

        advance(&mut state, SubmitState::Submitting);
        form.set_editor_text(text);
        form.set_reason_id(FALLBACK_REASON_ID);
        let fkey = form.read(FormField::AntiForgeryToken).unwrap_or_default();
        let body = form.serialize();

        let location = match self.send(&body).await {
            Ok(location) => location,
            Err(err) => {
                tracing::error!(error = %err, "message send failed");
                self.notifier.toast(Notice::danger(SEND_FAILED).transient());
                return SubmitOutcome::SendFailed(err);
            }
        };

        advance(&mut state, SubmitState::Annotating);
        match actions::annotate_user(self.transport, &fkey, user_id, &annotation).await {
            Ok(()) => {
                advance(&mut state, SubmitState::Done);
                self.navigator.navigate(&location);
                SubmitOutcome::Done { location }
            }
            Err(err) => {
                tracing::warn!(error = %err, user_id, "message sent but annotation failed");
                advance(&mut state, SubmitState::PartialFailure);
                let navigated = self
                    .notifier
                    .confirm(ConfirmPrompt::new(
                        "Annotation Failed",
                        "The message was sent but the profile was not annotated. Refresh anyway?",
                        "Refresh",
                    ))
                    .await;
                if navigated {
                    self.navigator.navigate(&location);
                }
                SubmitOutcome::PartialFailure {
                    location,
                    navigated,
                }
            }
        }
    }

    fn validate<F>(&self, form: &F, text: &str, annotation: &str) -> Result<u64, ValidationError>
    where
        F: FormAdapter + ?Sized,
    {
        check_message(text)?;
        let user_id = form.about_user_id().ok_or(ValidationError::MissingUserId)?;
        ValidationError::check_length("Annotation text", annotation, self.config.annotation_bounds)?;
        Ok(user_id)
    }

    fn reject(&self, err: ValidationError) -> SubmitOutcome {
        tracing::info!(state = %SubmitState::Rejected, reason = %err, "submission rejected");
        self.notifier.toast(Notice::danger(err.to_string()));
        SubmitOutcome::Rejected(err)
    }

    /// Posts the form and returns the URL the response ended at.
    async fn send(&self, body: &[(String, String)]) -> Result<String, TransportError> {
        let response = self.transport.post_form(&self.config.send_path, body).await?;
        if response.is_success() {
            Ok(response.url)
        } else {
            Err(TransportError::Status {
                path: self.config.send_path.clone(),
                status: response.status,
            })
        }
    }
}

fn advance(state: &mut SubmitState, next: SubmitState) {
    tracing::debug!(from = %state, to = %next, "submit state");
    *state = next;
}
