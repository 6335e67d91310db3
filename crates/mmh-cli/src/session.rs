//! Settings resolution: file, then environment and flags.

use anyhow::{Context, Result, anyhow};
use mmh_core::Settings;
use mmh_http::HostClient;

use crate::cli::SessionArgs;

/// Loads the settings file named by `--config`, or the platform default.
pub fn load_settings(args: &SessionArgs) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("load settings from {}", path.display()))?,
        None => Settings::load().context("load settings")?,
    };
    apply_overrides(&mut settings, args);
    Ok(settings)
}

/// Flags and `MMH_*` variables win over the file.
pub fn apply_overrides(settings: &mut Settings, args: &SessionArgs) {
    if let Some(site) = &args.site {
        if settings.site.url != *site {
            // The configured name belongs to the configured site.
            settings.site.name = None;
        }
        settings.site.url.clone_from(site);
    }
    if let Some(cookie) = &args.cookie {
        settings.site.cookie = Some(cookie.clone());
    }
    if let Some(fkey) = &args.fkey {
        settings.site.fkey = Some(fkey.clone());
    }
}

/// Client for the configured site and session.
pub fn host_client(settings: &Settings) -> Result<HostClient> {
    let client = HostClient::new(&settings.site.url, settings.site.cookie.as_deref())
        .with_context(|| format!("create client for {}", settings.site.url))?;
    Ok(match &settings.site.fkey {
        Some(fkey) => client.with_fkey(fkey.as_str()),
        None => client,
    })
}

/// The session's fkey; every write to the site needs one.
pub fn require_fkey(settings: &Settings) -> Result<String> {
    settings
        .site
        .fkey
        .clone()
        .filter(|fkey| !fkey.is_empty())
        .ok_or_else(|| anyhow!("an fkey is required; pass --fkey or set MMH_FKEY"))
}
