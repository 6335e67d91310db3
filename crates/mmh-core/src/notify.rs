//! User-facing notifications and navigation.
//!
//! The composer never renders anything itself. Transient toasts, blocking
//! confirmation prompts and page navigation are delegated to the host through
//! these traits.

use std::time::Duration;

/// How long transient toasts stay up.
pub const TRANSIENT_TIMEOUT: Duration = Duration::from_secs(3);

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational.
    Info,
    /// Something failed.
    Danger,
}

/// A non-blocking toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Text shown to the user.
    pub message: String,
    /// Visual weight.
    pub kind: NoticeKind,
    /// Auto-dismiss delay; `None` stays until dismissed.
    pub timeout: Option<Duration>,
}

impl Notice {
    /// A persistent danger toast.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Danger,
            timeout: None,
        }
    }

    /// A persistent info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
            timeout: None,
        }
    }

    /// Makes the toast dismiss itself after [`TRANSIENT_TIMEOUT`].
    #[must_use]
    pub fn transient(mut self) -> Self {
        self.timeout = Some(TRANSIENT_TIMEOUT);
        self
    }

    /// Whether the toast dismisses itself.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.timeout.is_some()
    }
}

/// A blocking yes/no decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Dialog title.
    pub title: String,
    /// Dialog body.
    pub body: String,
    /// Label of the confirming button.
    pub button_label: String,
}

impl ConfirmPrompt {
    /// Creates a prompt.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        button_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            button_label: button_label.into(),
        }
    }
}

/// Host notification surface.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Shows a toast.
    fn toast(&self, notice: Notice);

    /// Shows a blocking prompt and resolves to the user's answer.
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool;
}

/// Host navigation surface.
pub trait Navigator {
    /// Replaces the current page.
    fn navigate(&self, url: &str);

    /// Opens a page in a new tab, keeping the current one.
    fn open_new_tab(&self, url: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn toast(&self, notice: Notice) {
        (**self).toast(notice);
    }

    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        (**self).confirm(prompt).await
    }
}

impl<V: Navigator + ?Sized> Navigator for &V {
    fn navigate(&self, url: &str) {
        (**self).navigate(url);
    }

    fn open_new_tab(&self, url: &str) {
        (**self).open_new_tab(url);
    }
}
