//! Payload of the host's template-fetch endpoint.
//!
//! The host owns this shape; only the nested `MessageTemplate` object is ever
//! read or rewritten here. Every other key passes through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::template::Template;

/// Key of the nested editable template object.
pub const MESSAGE_TEMPLATE_KEY: &str = "MessageTemplate";

/// Key of the footer inside `MessageTemplate`.
pub const FOOTER_KEY: &str = "Footer";

/// Errors raised while interpreting a payload.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Payload is not a JSON object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Default field values for one selected reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldDefaults(Map<String, Value>);

impl FieldDefaults {
    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(ModelError::NotAnObject("null")),
            Value::Bool(_) => Err(ModelError::NotAnObject("a boolean")),
            Value::Number(_) => Err(ModelError::NotAnObject("a number")),
            Value::String(_) => Err(ModelError::NotAnObject("a string")),
            Value::Array(_) => Err(ModelError::NotAnObject("an array")),
        }
    }

    /// Unwraps into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Top-level keys.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The nested `MessageTemplate` object, if present.
    #[must_use]
    pub fn message_template(&self) -> Option<&Map<String, Value>> {
        self.0.get(MESSAGE_TEMPLATE_KEY).and_then(Value::as_object)
    }

    fn update_message_template(&mut self, update: impl FnOnce(&mut Map<String, Value>)) {
        let mut template = match self.0.remove(MESSAGE_TEMPLATE_KEY) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        update(&mut template);
        self.0
            .insert(MESSAGE_TEMPLATE_KEY.to_string(), Value::Object(template));
    }

    fn template_str(&self, key: &str) -> Option<&str> {
        self.message_template()
            .and_then(|template| template.get(key))
            .and_then(Value::as_str)
    }

    /// `MessageTemplate.Footer`.
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.template_str(FOOTER_KEY)
    }

    /// Replaces `MessageTemplate.Footer`.
    pub fn set_footer(&mut self, footer: impl Into<String>) {
        let footer = Value::String(footer.into());
        self.update_message_template(|template| {
            template.insert(FOOTER_KEY.to_string(), footer);
        });
    }

    /// `MessageTemplate.TemplateBody`.
    #[must_use]
    pub fn template_body(&self) -> Option<&str> {
        self.template_str("TemplateBody")
    }

    /// `MessageTemplate.TemplateName`.
    #[must_use]
    pub fn template_name(&self) -> Option<&str> {
        self.template_str("TemplateName")
    }

    /// `MessageTemplate.DefaultSuspensionReason`.
    #[must_use]
    pub fn default_suspension_reason(&self) -> Option<&str> {
        self.template_str("DefaultSuspensionReason")
    }

    /// `MessageTemplate.DefaultSuspendDays`; absent or non-numeric reads as 0.
    #[must_use]
    pub fn default_suspend_days(&self) -> u32 {
        self.message_template()
            .and_then(|template| template.get("DefaultSuspendDays"))
            .and_then(Value::as_u64)
            .and_then(|days| u32::try_from(days).ok())
            .unwrap_or(0)
    }

    /// `MessageTemplate.IncludeSuspensionFooter`; absent reads as true.
    #[must_use]
    pub fn includes_suspension_footer(&self) -> bool {
        self.message_template()
            .and_then(|template| template.get("IncludeSuspensionFooter"))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Overlays a template's fields onto `MessageTemplate`.
    ///
    /// Shallow and right-biased: keys the template serializes win, all other
    /// keys already in the object are kept.
    pub fn merge_template(&mut self, template: &Template) {
        let Ok(Value::Object(overlay)) = serde_json::to_value(template) else {
            return;
        };
        self.update_message_template(|target| {
            for (key, value) in overlay {
                target.insert(key, value);
            }
        });
    }
}
