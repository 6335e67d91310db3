//! Ban-evasion account deletion.
//!
//! Deletes a sock-puppet account and annotates the main account it evaded a
//! ban from. Same two-phase shape as message submission: validate locally,
//! confirm, then delete followed by annotate, stopping at the first failure.

mod detail;

pub use detail::build_detail_string;

use mmh_model::ValidationBounds;

use crate::actions;
use crate::error::{TransportError, ValidationError};
use crate::notify::{ConfirmPrompt, Navigator, Notice, Notifier};
use crate::transport::Transport;

/// Reason recorded with a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteReason {
    /// Account created to get around restrictions.
    #[default]
    BanEvasion,
    /// User is not welcome on the site.
    NoLongerWelcome,
}

impl DeleteReason {
    /// Text the host expects in `deleteReason`.
    #[must_use]
    pub const fn host_text(&self) -> &'static str {
        match self {
            Self::BanEvasion => {
                "This user was created to circumvent system or moderator imposed restrictions and continues to contribute poorly"
            }
            Self::NoLongerWelcome => "This user is no longer welcome to participate on the site",
        }
    }

    /// Short label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BanEvasion => "Ban evasion",
            Self::NoLongerWelcome => "No longer welcome",
        }
    }
}

/// Personal details of the account being deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPii {
    /// Email address.
    pub email: String,
    /// Real name.
    pub real_name: String,
}

/// State of the deletion dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanEvasionForm {
    /// Account being deleted.
    pub sock_account_id: u64,
    /// Account the sock belongs to, once looked up.
    pub main_account_id: Option<u64>,
    /// Reason recorded with the deletion.
    pub deletion_reason: DeleteReason,
    /// Free text sent as the deletion details.
    pub deletion_details: String,
    /// Annotation left on the main account.
    pub annotation_details: String,
    /// Open the message composer for the main account afterwards.
    pub message_after: bool,
}

impl BanEvasionForm {
    /// An empty dialog for `sock_account_id`.
    #[must_use]
    pub fn new(sock_account_id: u64) -> Self {
        Self {
            sock_account_id,
            main_account_id: None,
            deletion_reason: DeleteReason::default(),
            deletion_details: String::new(),
            annotation_details: String::new(),
            message_after: false,
        }
    }
}

/// User actions on the deletion dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanEvasionAction {
    /// Resolve the main account and prefill the details.
    LookupMain {
        /// Id of the main account.
        main_account_id: u64,
        /// Details of the sock account.
        pii: AccountPii,
    },
    /// Validate, confirm and run the deletion.
    Submit,
    /// Abandon the dialog.
    Cancel,
}

/// Result of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanEvasionOutcome {
    /// Main account found; details were prefilled.
    MainResolved {
        /// Canonical profile URL of the main account.
        main_url: String,
    },
    /// Profile URLs could not be resolved.
    LookupFailed(TransportError),
    /// Local validation failed; nothing was sent.
    Rejected(ValidationError),
    /// The user did not confirm.
    Declined,
    /// The sock account was not deleted; nothing was annotated.
    DeletionFailed(TransportError),
    /// The sock account was deleted but the main was not annotated.
    AnnotationFailed(TransportError),
    /// Deleted and annotated.
    Completed {
        /// Composer page opened for the main account, if requested.
        message_url: Option<String>,
    },
    /// Dialog dismissed.
    Cancelled,
}

/// Drives the deletion dialog.
#[derive(Debug)]
pub struct BanEvasionController<'a, T, N, V> {
    transport: &'a T,
    notifier: &'a N,
    navigator: &'a V,
    fkey: String,
    form: BanEvasionForm,
}

impl<'a, T, N, V> BanEvasionController<'a, T, N, V>
where
    T: Transport,
    N: Notifier,
    V: Navigator,
{
    /// Creates a controller for `sock_account_id`.
    pub fn new(
        transport: &'a T,
        notifier: &'a N,
        navigator: &'a V,
        fkey: impl Into<String>,
        sock_account_id: u64,
    ) -> Self {
        Self {
            transport,
            notifier,
            navigator,
            fkey: fkey.into(),
            form: BanEvasionForm::new(sock_account_id),
        }
    }

    /// Dialog state.
    #[must_use]
    pub fn form(&self) -> &BanEvasionForm {
        &self.form
    }

    /// Dialog state, for edits between actions.
    pub fn form_mut(&mut self) -> &mut BanEvasionForm {
        &mut self.form
    }

    /// Handles one action.
    pub async fn dispatch(&mut self, action: BanEvasionAction) -> BanEvasionOutcome {
        match action {
            BanEvasionAction::LookupMain {
                main_account_id,
                pii,
            } => self.lookup_main(main_account_id, &pii).await,
            BanEvasionAction::Submit => self.submit().await,
            BanEvasionAction::Cancel => {
                tracing::debug!(sock = self.form.sock_account_id, "deletion dialog cancelled");
                self.form = BanEvasionForm::new(self.form.sock_account_id);
                BanEvasionOutcome::Cancelled
            }
        }
    }

    async fn lookup_main(&mut self, main_account_id: u64, pii: &AccountPii) -> BanEvasionOutcome {
        let sock_account_id = self.form.sock_account_id;
        if main_account_id == sock_account_id {
            let err = ValidationError::SameAccount;
            self.notifier.toast(Notice::danger(err.to_string()).transient());
            return BanEvasionOutcome::Rejected(err);
        }

        let urls = async {
            let main_url = actions::profile_url(self.transport, main_account_id).await?;
            let sock_url = actions::profile_url(self.transport, sock_account_id).await?;
            Ok::<_, TransportError>((main_url, sock_url))
        };
        let (main_url, sock_url) = match urls.await {
            Ok(urls) => urls,
            Err(err) => {
                tracing::error!(error = %err, "could not resolve profile urls");
                self.notifier
                    .toast(Notice::danger(format!("Could not look up user {main_account_id}.")));
                return BanEvasionOutcome::LookupFailed(err);
            }
        };

        let details = build_detail_string(
            &[
                ("Main Account", main_url.as_str()),
                ("Email", pii.email.as_str()),
                ("Real name", pii.real_name.as_str()),
            ],
            ":  ",
            "\n",
            true,
        );
        self.form.deletion_details = format!("\n\n{details}");
        self.form.annotation_details = build_detail_string(
            &[
                ("Deleted evasion account", sock_url.as_str()),
                ("Email", pii.email.as_str()),
                ("Real name", pii.real_name.as_str()),
            ],
            ": ",
            " | ",
            false,
        );
        self.form.main_account_id = Some(main_account_id);
        tracing::info!(main = main_account_id, sock = sock_account_id, "main account resolved");
        BanEvasionOutcome::MainResolved { main_url }
    }

    fn validate(&self) -> Result<u64, ValidationError> {
        let main_account_id = self
            .form
            .main_account_id
            .ok_or(ValidationError::MainAccountUnresolved)?;
        ValidationError::check_length(
            "Deletion reason details",
            &self.form.deletion_details,
            ValidationBounds::DELETION_DETAILS,
        )?;
        ValidationError::check_length(
            "Annotation details",
            &self.form.annotation_details,
            ValidationBounds::ANNOTATION,
        )?;
        Ok(main_account_id)
    }

    async fn submit(&mut self) -> BanEvasionOutcome {
        let main_account_id = match self.validate() {
            Ok(id) => id,
            Err(err) => {
                self.notifier.toast(Notice::danger(err.to_string()).transient());
                return BanEvasionOutcome::Rejected(err);
            }
        };

        let confirmed = self
            .notifier
            .confirm(ConfirmPrompt::new(
                "Are you sure you want to delete this account?",
                "You will be deleting this account and placing an annotation on the main. This operation cannot be undone.",
                "I'm sure",
            ))
            .await;
        if !confirmed {
            return BanEvasionOutcome::Declined;
        }

        let sock_account_id = self.form.sock_account_id;
        if let Err(err) = actions::delete_user(
            self.transport,
            &self.fkey,
            sock_account_id,
            self.form.deletion_reason.host_text(),
            &self.form.deletion_details,
        )
        .await
        {
            tracing::error!(error = %err, sock = sock_account_id, "deletion failed");
            self.notifier
                .toast(Notice::danger(format!("Deletion on {sock_account_id} unsuccessful.")));
            return BanEvasionOutcome::DeletionFailed(err);
        }

        if let Err(err) = actions::annotate_user(
            self.transport,
            &self.fkey,
            main_account_id,
            &self.form.annotation_details,
        )
        .await
        {
            tracing::error!(error = %err, main = main_account_id, "annotation failed");
            self.notifier
                .toast(Notice::danger(format!("Annotation on {main_account_id} unsuccessful.")));
            return BanEvasionOutcome::AnnotationFailed(err);
        }

        tracing::info!(main = main_account_id, sock = sock_account_id, "sock deleted and main annotated");
        let message_url = self.form.message_after.then(|| {
            let url = actions::message_create_path(main_account_id);
            self.navigator.open_new_tab(&url);
            url
        });
        BanEvasionOutcome::Completed { message_url }
    }
}
