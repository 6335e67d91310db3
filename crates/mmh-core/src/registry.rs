//! Template registry.
//!
//! Templates are registered once at start-up and never mutated afterwards.
//! Lookups signal absence with `None`; nothing here fails after construction.

use mmh_model::{HostScope, SystemReasonIds, Template};

use crate::error::RegistryError;

/// Ordered collection of custom templates keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from templates, rejecting duplicate names.
    pub fn from_templates<I>(templates: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Template>,
    {
        let mut registry = Self::new();
        for template in templates {
            registry.register(template)?;
        }
        Ok(registry)
    }

    /// Adds a template at the end of the ordering.
    pub fn register(&mut self, template: Template) -> Result<(), RegistryError> {
        if self.find(template.name()).is_some() {
            return Err(RegistryError::DuplicateName(template.template_name));
        }
        tracing::trace!(name = template.name(), "registered template");
        self.templates.push(template);
        Ok(())
    }

    /// Checks that every template aliases a reason the host knows and that
    /// no template is named after one.
    pub fn validate_against(&self, system_ids: &SystemReasonIds) -> Result<(), RegistryError> {
        for template in &self.templates {
            if system_ids.contains(&template.template_name) {
                return Err(RegistryError::ShadowsSystemReason(
                    template.template_name.clone(),
                ));
            }
            if !system_ids.contains(&template.analogous_system_reason_id) {
                return Err(RegistryError::UnknownSystemReason {
                    template: template.template_name.clone(),
                    reason_id: template.analogous_system_reason_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Templates offered on `scope`, in registration order.
    #[must_use]
    pub fn list(&self, scope: &HostScope) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|template| template.is_visible_in(scope))
            .collect()
    }

    /// Looks up a template by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Template> {
        self.templates
            .iter()
            .find(|template| template.template_name == name)
    }

    /// All templates regardless of scope.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
