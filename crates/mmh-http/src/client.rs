//! Host client.

use mmh_core::{RequestDescriptor, Transport, TransportError, TransportResponse};
use mmh_model::FieldDefaults;
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use crate::error::{HttpError, Result};

/// User agent string for host requests.
pub const USER_AGENT_VALUE: &str = concat!("mod-message-helper/", env!("CARGO_PKG_VERSION"));

/// Client for one host site, authenticated with a session cookie.
#[derive(Debug, Clone)]
pub struct HostClient {
    client: reqwest::Client,
    base: Url,
    fkey: Option<String>,
}

impl HostClient {
    /// Creates a client for `site_url`.
    ///
    /// # Arguments
    /// * `site_url` - Origin of the site, e.g. `https://stackoverflow.com`
    /// * `cookie` - Raw `Cookie` header of a logged-in moderator, if any
    pub fn new(site_url: &str, cookie: Option<&str>) -> Result<Self> {
        let base = Url::parse(site_url).map_err(|source| HttpError::InvalidUrl {
            url: site_url.to_string(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/html;q=0.9"),
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(cookie) = cookie {
            let mut value = HeaderValue::from_str(cookie).map_err(|_| HttpError::InvalidCookie)?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base,
            fkey: None,
        })
    }

    /// Sets the anti-forgery token of the session.
    #[must_use]
    pub fn with_fkey(mut self, fkey: impl Into<String>) -> Self {
        self.fkey = Some(fkey.into());
        self
    }

    /// Anti-forgery token of the session.
    #[must_use]
    pub fn fkey(&self) -> Option<&str> {
        self.fkey.as_deref()
    }

    /// Origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, relative: &str, path: &str) -> std::result::Result<Url, TransportError> {
        self.base
            .join(relative)
            .map_err(|e| TransportError::Network {
                path: path.to_string(),
                message: format!("invalid request url: {e}"),
            })
    }
}

fn network_error(path: &str, error: &reqwest::Error) -> TransportError {
    TransportError::Network {
        path: path.to_string(),
        message: error.to_string(),
    }
}

fn ensure_success(path: &str, response: &reqwest::Response) -> std::result::Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        tracing::warn!(path, %status, "host returned an error status");
        Err(TransportError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        })
    }
}

impl Transport for HostClient {
    async fn get_json(
        &self,
        request: &RequestDescriptor,
    ) -> std::result::Result<FieldDefaults, TransportError> {
        let path = request.path.as_str();
        let url = self.url(&request.to_relative_url(), path)?;
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(path, &e))?;
        ensure_success(path, &response)?;

        let value: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| TransportError::InvalidResponse {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;
        FieldDefaults::from_value(value).map_err(|e| TransportError::invalid_response(path, &e))
    }

    async fn post_form(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> std::result::Result<TransportResponse, TransportError> {
        let url = self.url(path, path)?;
        tracing::debug!(%url, fields = fields.len(), "POST");

        let response = self
            .client
            .post(url)
            .form(fields)
            .send()
            .await
            .map_err(|e| network_error(path, &e))?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| network_error(path, &e))?;
        tracing::debug!(status, url = %final_url, "POST completed");

        Ok(TransportResponse {
            status,
            url: final_url,
            body,
        })
    }

    async fn resolve_url(&self, path: &str) -> std::result::Result<String, TransportError> {
        let url = self.url(path, path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(path, &e))?;
        ensure_success(path, &response)?;
        Ok(response.url().to_string())
    }
}
