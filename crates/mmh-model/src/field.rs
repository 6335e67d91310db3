//! Logical fields of the host's message form.

use std::fmt;

/// One logical field of the message form.
///
/// Every read and write goes through this enum; there is no string-built
/// field lookup anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// Value of the reason selector.
    ReasonId,
    /// Text of the currently selected selector option.
    DisplayedTemplateName,
    /// Editable shadow of the template name shown above the editor.
    CustomTemplateName,
    /// Suspension length in days.
    SuspendDays,
    /// Suspension reason text.
    SuspensionReason,
    /// Markdown editor contents.
    EditorText,
    /// Message template used by the host when auto-suspending.
    AutoSuspendMessage,
    /// Id of the user the message is about.
    AboutUserId,
    /// Anti-forgery token posted with the form.
    AntiForgeryToken,
}

impl FormField {
    /// All fields in declaration order.
    pub const ALL: [Self; 9] = [
        Self::ReasonId,
        Self::DisplayedTemplateName,
        Self::CustomTemplateName,
        Self::SuspendDays,
        Self::SuspensionReason,
        Self::EditorText,
        Self::AutoSuspendMessage,
        Self::AboutUserId,
        Self::AntiForgeryToken,
    ];

    /// Name of the host input that carries this field when the form is posted.
    ///
    /// `None` for display-only fields.
    #[must_use]
    pub const fn input_name(&self) -> Option<&'static str> {
        match self {
            Self::ReasonId => Some("reasonId"),
            Self::DisplayedTemplateName | Self::CustomTemplateName => None,
            Self::SuspendDays => Some("suspendDays"),
            Self::SuspensionReason => Some("suspendReason"),
            Self::EditorText => Some("templateEdit"),
            Self::AutoSuspendMessage => Some("autoSuspendMessage"),
            Self::AboutUserId => Some("userId"),
            Self::AntiForgeryToken => Some("fkey"),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ReasonId => "reason",
            Self::DisplayedTemplateName => "selected template",
            Self::CustomTemplateName => "template name",
            Self::SuspendDays => "suspension days",
            Self::SuspensionReason => "suspension reason",
            Self::EditorText => "message",
            Self::AutoSuspendMessage => "auto-suspend message",
            Self::AboutUserId => "user id",
            Self::AntiForgeryToken => "fkey",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
