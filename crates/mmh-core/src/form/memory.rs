use std::collections::BTreeMap;

use mmh_model::{BLANK_REASON_ID, FieldDefaults, FormField, SystemReasonIds};

use super::FormAdapter;

/// Text of the selector's blank option.
const BLANK_OPTION_TEXT: &str = "Please select a template...";

/// One option of the reason selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonOption {
    /// Option group label, if grouped.
    pub group: Option<String>,
    /// Submitted value.
    pub value: String,
    /// Displayed text.
    pub text: String,
}

impl ReasonOption {
    /// An ungrouped option.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            group: None,
            value: value.into(),
            text: text.into(),
        }
    }
}

/// A message form held entirely in memory.
///
/// Behaves like the host page: the displayed template name follows the
/// selected option, and applying fetched defaults fills the suspension and
/// editor fields.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    options: Vec<ReasonOption>,
    values: BTreeMap<FormField, String>,
    includes_suspension_footer: bool,
    preview_refreshes: usize,
}

impl MemoryForm {
    /// A form whose selector offers `options`, with the first one selected.
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ReasonOption>,
    {
        let options: Vec<ReasonOption> = options.into_iter().collect();
        let mut values = BTreeMap::new();
        if let Some(first) = options.first() {
            values.insert(FormField::ReasonId, first.value.clone());
        }
        Self {
            options,
            values,
            includes_suspension_footer: true,
            preview_refreshes: 0,
        }
    }

    /// A form offering the blank option followed by each system reason.
    pub fn from_system_reasons(system_ids: &SystemReasonIds) -> Self {
        let blank = ReasonOption::new(BLANK_REASON_ID, BLANK_OPTION_TEXT);
        let system = system_ids
            .iter()
            .filter(|id| *id != BLANK_REASON_ID)
            .map(|id| ReasonOption::new(id, id));
        Self::new(std::iter::once(blank).chain(system))
    }

    /// Sets a field, builder style.
    #[must_use]
    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.write(field, value.into());
        self
    }

    /// Selector options in display order.
    #[must_use]
    pub fn options(&self) -> &[ReasonOption] {
        &self.options
    }

    /// Whether the last applied defaults asked for the suspension footer.
    #[must_use]
    pub fn includes_suspension_footer(&self) -> bool {
        self.includes_suspension_footer
    }

    /// How many times the preview was refreshed.
    #[must_use]
    pub fn preview_refreshes(&self) -> usize {
        self.preview_refreshes
    }

    fn selected_option(&self) -> Option<&ReasonOption> {
        let selected = self.values.get(&FormField::ReasonId)?;
        self.options.iter().find(|option| &option.value == selected)
    }
}

impl FormAdapter for MemoryForm {
    fn read(&self, field: FormField) -> Option<String> {
        match field {
            FormField::DisplayedTemplateName => {
                self.selected_option().map(|option| option.text.clone())
            }
            _ => self.values.get(&field).cloned(),
        }
    }

    fn write(&mut self, field: FormField, value: String) {
        if field == FormField::DisplayedTemplateName {
            tracing::warn!("ignoring write to the displayed template name");
            return;
        }
        self.values.insert(field, value);
    }

    fn reason_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|option| option.value.clone())
            .collect()
    }

    fn add_reason_option(&mut self, group: Option<&str>, value: &str, text: &str) {
        self.options.push(ReasonOption {
            group: group.map(str::to_string),
            value: value.to_string(),
            text: text.to_string(),
        });
    }

    fn refresh_preview(&mut self) {
        self.preview_refreshes += 1;
    }

    fn apply_defaults(&mut self, defaults: &FieldDefaults) {
        self.values.insert(
            FormField::SuspendDays,
            defaults.default_suspend_days().to_string(),
        );
        self.values.insert(
            FormField::SuspensionReason,
            defaults
                .default_suspension_reason()
                .unwrap_or_default()
                .to_string(),
        );

        let mut text = defaults.template_body().unwrap_or_default().to_string();
        if let Some(footer) = defaults.footer().filter(|footer| !footer.is_empty()) {
            text.push_str("\n\n");
            text.push_str(footer);
        }
        self.values.insert(FormField::EditorText, text);
        self.includes_suspension_footer = defaults.includes_suspension_footer();
        self.refresh_preview();
    }

    fn serialize(&self) -> Vec<(String, String)> {
        FormField::ALL
            .iter()
            .filter_map(|field| {
                let name = field.input_name()?;
                let value = self.values.get(field)?;
                Some((name.to_string(), value.clone()))
            })
            .collect()
    }
}
