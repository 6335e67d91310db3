//! Settings, persisted as TOML in the user's config directory.
//!
//! Every section is `#[serde(default)]`, so a partial file (or none at all)
//! yields a usable configuration.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use mmh_model::{HostScope, SystemReasonIds, Template};
use serde::{Deserialize, Serialize};

use crate::actions::MESSAGE_SAVE_PATH;
use crate::catalog;
use crate::error::{ConfigError, RegistryError};
use crate::registry::TemplateRegistry;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "mod-message-helper";
const APP_NAME: &str = "Mod Message Helper";
const CONFIG_FILENAME: &str = "settings.toml";

/// Default path of the template-fetch endpoint.
pub const DEFAULT_TEMPLATE_FETCH_PATH: &str = "/admin/template/defaults";

/// Root settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host site and session.
    pub site: SiteSettings,

    /// Endpoint paths on the host.
    pub endpoints: EndpointSettings,

    /// Reason ids the host selector offers natively.
    pub system_reasons: SystemReasonSettings,

    /// Extra templates appended after the built-in catalog.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<Template>,
}

/// Host site and session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Parent site origin.
    pub url: String,

    /// Display name of the site.
    pub name: Option<String>,

    /// Raw `Cookie` header value for an authenticated moderator session.
    pub cookie: Option<String>,

    /// Anti-forgery token of that session.
    pub fkey: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: mmh_model::STACK_OVERFLOW_URL.to_string(),
            name: Some("Stack Overflow".to_string()),
            cookie: None,
            fkey: None,
        }
    }
}

/// Endpoint paths on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    /// Template-fetch endpoint.
    pub template_fetch: String,

    /// Message-send endpoint.
    pub message_send: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            template_fetch: DEFAULT_TEMPLATE_FETCH_PATH.to_string(),
            message_send: MESSAGE_SAVE_PATH.to_string(),
        }
    }
}

/// Reason ids the host selector offers natively.
///
/// A browser reads these off the selector; outside one they are configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemReasonSettings {
    /// Option values, including the blank option.
    pub ids: Vec<String>,
}

impl Default for SystemReasonSettings {
    fn default() -> Self {
        let mut ids = vec![mmh_model::BLANK_REASON_ID.to_string()];
        ids.extend(catalog::CATALOG_SYSTEM_REASONS.iter().map(ToString::to_string));
        Self { ids }
    }
}

impl Settings {
    /// Platform settings file path, if a home directory is known.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Loads settings from the platform path. A missing file gives defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Loads settings from `path`. A missing file gives defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let settings = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Writes settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source: std::io::Error| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(io_error)
    }

    /// Deployment identity derived from the site section.
    #[must_use]
    pub fn scope(&self) -> HostScope {
        let scope = HostScope::new(self.site.url.as_str());
        match &self.site.name {
            Some(name) => scope.with_site_name(name.as_str()),
            None => scope,
        }
    }

    /// The configured system reason ids.
    #[must_use]
    pub fn system_reason_ids(&self) -> SystemReasonIds {
        SystemReasonIds::from_options(self.system_reasons.ids.iter().map(String::as_str))
    }

    /// Built-in catalog followed by the configured templates, validated
    /// against the configured system reasons.
    pub fn registry(&self) -> Result<TemplateRegistry, RegistryError> {
        let templates = catalog::builtin(&self.scope())
            .into_iter()
            .chain(self.templates.iter().cloned());
        let registry = TemplateRegistry::from_templates(templates)?;
        registry.validate_against(&self.system_reason_ids())?;
        Ok(registry)
    }
}
