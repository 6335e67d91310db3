//! Form state adapter.
//!
//! The message form belongs to the host. Everything here reads and writes it
//! through [`FormAdapter`], keyed by [`FormField`]; [`FormView`] layers the
//! typed accessors the composer and submission controller use.

mod memory;
mod suspension;

pub use memory::{MemoryForm, ReasonOption};
pub use suspension::fix_auto_suspend_pluralisation;

use mmh_model::{BLANK_REASON_ID, FieldDefaults, FormField};

/// Option group that holds the registry's templates in the selector.
pub const CUSTOM_TEMPLATES_GROUP: &str = "Custom Templates";

/// Raw access to the host form. No validation happens here.
pub trait FormAdapter {
    /// Current value of a field; `None` when the field is absent or unset.
    fn read(&self, field: FormField) -> Option<String>;

    /// Replaces a field's value.
    fn write(&mut self, field: FormField, value: String);

    /// Values of every option in the reason selector, in display order.
    fn reason_options(&self) -> Vec<String>;

    /// Appends an option to the reason selector, optionally inside a group.
    fn add_reason_option(&mut self, group: Option<&str>, value: &str, text: &str);

    /// Asks the host to re-render its live preview.
    fn refresh_preview(&mut self);

    /// The host's own handler for a template-fetch response.
    fn apply_defaults(&mut self, defaults: &FieldDefaults);

    /// URL-encodable name/value pairs, as the host would post them.
    fn serialize(&self) -> Vec<(String, String)>;
}

/// Typed helpers over [`FormAdapter`].
pub trait FormView: FormAdapter {
    /// Selected reason id; empty when nothing is selected.
    fn reason_id(&self) -> String {
        self.read(FormField::ReasonId).unwrap_or_default()
    }

    /// Selects a reason id.
    fn set_reason_id(&mut self, reason_id: &str) {
        self.write(FormField::ReasonId, reason_id.to_string());
    }

    /// Suspension length. Anything that does not parse reads as zero.
    fn suspend_days(&self) -> u32 {
        self.read(FormField::SuspendDays)
            .and_then(|days| days.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Editor contents.
    fn editor_text(&self) -> String {
        self.read(FormField::EditorText).unwrap_or_default()
    }

    /// Replaces the editor contents and refreshes the preview.
    fn set_editor_text(&mut self, text: String) {
        self.write(FormField::EditorText, text);
        self.refresh_preview();
    }

    /// Id of the user the message is about.
    fn about_user_id(&self) -> Option<u64> {
        self.read(FormField::AboutUserId)
            .and_then(|id| id.trim().parse().ok())
    }

    /// Text of the selected option.
    fn displayed_template_name(&self) -> Option<String> {
        self.read(FormField::DisplayedTemplateName)
    }

    /// Contents of the editable template name.
    fn custom_template_name(&self) -> Option<String> {
        self.read(FormField::CustomTemplateName)
    }

    /// Whether any template other than the blank option is selected.
    fn has_template_selected(&self) -> bool {
        self.reason_id() != BLANK_REASON_ID
    }

    /// Whether the user renamed the selected template.
    fn has_custom_template_name(&self) -> bool {
        match self.custom_template_name() {
            Some(name) if !name.is_empty() => self.displayed_template_name() != Some(name),
            _ => false,
        }
    }
}

impl<F: FormAdapter + ?Sized> FormView for F {}
