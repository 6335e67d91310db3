//! Transport seam between the composer and the host's HTTP endpoints.
//!
//! Requests are described with [`RequestDescriptor`] so interceptors can be
//! exercised with synthetic requests; the real client lives in `mmh-http`.

use std::fmt;

use mmh_model::FieldDefaults;
use url::{Url, form_urlencoded};

use crate::error::TransportError;

/// Base used to resolve relative request URLs. Never contacted.
const PARSE_BASE: &str = "http://host.invalid";

/// HTTP method of a described request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A request relative to the host origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Absolute path, e.g. `/admin/template/defaults`.
    pub path: String,
    /// Decoded query pairs in order.
    pub query: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Parses a relative URL such as `/admin/template/defaults?reasonId=Spam`.
    pub fn parse(method: Method, relative_url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(PARSE_BASE)?.join(relative_url)?;
        Ok(Self {
            method,
            path: url.path().to_string(),
            query: url.query_pairs().into_owned().collect(),
        })
    }

    /// A `GET` for `path` with no query.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Appends or replaces a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.query.iter_mut().find(|(key, _)| key == name) {
            Some(pair) => pair.1 = value,
            None => self.query.push((name.to_string(), value)),
        }
        self
    }

    /// First value of a query parameter.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Path plus encoded query, suitable for joining onto the host origin.
    #[must_use]
    pub fn to_relative_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{}", self.path, query)
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.to_relative_url())
    }
}

/// A completed form post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Final URL after redirects; where the browser would land.
    pub url: String,
    /// Response body.
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The host endpoints the composer talks to.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetches a JSON object. Non-success statuses are errors.
    async fn get_json(&self, request: &RequestDescriptor) -> Result<FieldDefaults, TransportError>;

    /// Posts a URL-encoded form. Any status is returned; only transport
    /// failures are errors.
    async fn post_form(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<TransportResponse, TransportError>;

    /// Follows redirects from `path` and returns the absolute URL reached.
    async fn resolve_url(&self, path: &str) -> Result<String, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative_url() {
        let request =
            RequestDescriptor::parse(Method::Get, "/admin/template/defaults?reasonId=account%20sharing&x=1")
                .unwrap();
        assert_eq!(request.path, "/admin/template/defaults");
        assert_eq!(request.query_value("reasonId"), Some("account sharing"));
        assert_eq!(request.query_value("x"), Some("1"));
        assert_eq!(request.query_value("missing"), None);
    }

    #[test]
    fn test_with_query_replaces_existing() {
        let request = RequestDescriptor::get("/admin/template/defaults")
            .with_query("reasonId", "a")
            .with_query("reasonId", "OtherViolation");
        assert_eq!(request.query.len(), 1);
        assert_eq!(
            request.to_relative_url(),
            "/admin/template/defaults?reasonId=OtherViolation"
        );
    }

    #[test]
    fn test_relative_url_encodes_spaces() {
        let request = RequestDescriptor::get("/p").with_query("reasonId", "low quality answers");
        assert_eq!(request.to_relative_url(), "/p?reasonId=low+quality+answers");
        assert_eq!(request.to_string(), "GET /p?reasonId=low+quality+answers");
    }

    #[test]
    fn test_success_range() {
        let mut response = TransportResponse {
            status: 200,
            url: String::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
    }
}
