//! Custom message templates and their deployment scope.

use serde::{Deserialize, Serialize};

/// Parent URL of the one deployment that sees Stack Overflow only templates.
pub const STACK_OVERFLOW_URL: &str = "https://stackoverflow.com";

/// A locally defined message template.
///
/// Field names serialize exactly as the host names them inside the
/// `MessageTemplate` object, so a template can be overlaid onto a fetched
/// payload without any translation. Optional attributes are skipped when
/// absent so the overlay never replaces a host value with `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    /// System reason id this template is an alias of.
    pub analogous_system_reason_id: String,

    /// User-visible name; also the reason id used in the selector.
    pub template_name: String,

    /// Suspension length pre-filled when the template is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_suspend_days: Option<u32>,

    /// Suspension reason pre-filled when the template is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_suspension_reason: Option<String>,

    /// Message body. May contain `{todo}` style placeholders.
    pub template_body: String,

    /// Only offered on Stack Overflow itself.
    #[serde(default, skip_serializing_if = "is_false")]
    pub stack_overflow_only: bool,

    /// Whether the host appends its suspension footer. `None` keeps the host default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_suspension_footer: Option<bool>,

    /// Replacement for the host footer. `None` keeps the host footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Template {
    /// Creates a template that pre-fills a zero-day suspension.
    pub fn new(
        name: impl Into<String>,
        analogous_system_reason_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            analogous_system_reason_id: analogous_system_reason_id.into(),
            template_name: name.into(),
            default_suspend_days: Some(0),
            default_suspension_reason: None,
            template_body: body.into(),
            stack_overflow_only: false,
            include_suspension_footer: None,
            footer: None,
        }
    }

    /// Sets the default suspension length and reason.
    #[must_use]
    pub fn with_suspension(mut self, days: u32, reason: impl Into<String>) -> Self {
        self.default_suspend_days = Some(days);
        self.default_suspension_reason = Some(reason.into());
        self
    }

    /// Sets only the suspension reason, leaving the host's day count alone.
    #[must_use]
    pub fn with_suspension_reason(mut self, reason: impl Into<String>) -> Self {
        self.default_suspend_days = None;
        self.default_suspension_reason = Some(reason.into());
        self
    }

    /// Replaces the host footer.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Restricts the template to Stack Overflow.
    #[must_use]
    pub fn stack_overflow_only(mut self) -> Self {
        self.stack_overflow_only = true;
        self
    }

    /// Sets whether the host suspension footer is appended.
    #[must_use]
    pub fn with_suspension_footer(mut self, include: bool) -> Self {
        self.include_suspension_footer = Some(include);
        self
    }

    /// Name of the template.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.template_name
    }

    /// Whether the host footer is appended (defaults to yes).
    #[must_use]
    pub fn includes_suspension_footer(&self) -> bool {
        self.include_suspension_footer.unwrap_or(true)
    }

    /// Whether the template is offered on the given deployment.
    #[must_use]
    pub fn is_visible_in(&self, scope: &HostScope) -> bool {
        !self.stack_overflow_only || scope.is_stack_overflow()
    }
}

/// Identity of the host deployment the composer is running against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostScope {
    /// Origin of the parent site, e.g. `https://stackoverflow.com`.
    pub parent_url: String,
    /// Display name of the site, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

impl HostScope {
    /// Creates a scope from a parent URL. A trailing slash is dropped.
    pub fn new(parent_url: impl Into<String>) -> Self {
        let mut parent_url = parent_url.into();
        while parent_url.ends_with('/') {
            parent_url.pop();
        }
        Self {
            parent_url,
            site_name: None,
        }
    }

    /// Sets the site display name.
    #[must_use]
    pub fn with_site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = Some(name.into());
        self
    }

    /// True only for the main Stack Overflow deployment.
    #[must_use]
    pub fn is_stack_overflow(&self) -> bool {
        self.parent_url == STACK_OVERFLOW_URL
    }
}
