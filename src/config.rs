//! Site configuration.

use serde::Deserialize;

use crate::error::{BcError, Result};

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Connection details for one site.
///
/// Every request is sent relative to `root_url` and carries `token` in the
/// `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Site {
    /// Base URL of the site, e.g. `https://example.com`. May be empty for
    /// same-origin requests.
    #[serde(default)]
    pub root_url: String,
    /// Site access token.
    pub token: String,
    /// Timeout applied to each request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Site {
    /// Create a site configuration with the default timeout.
    pub fn new(root_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            root_url: trim_root_url(root_url.into()),
            token: token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Read the configuration from `BC_SITE_URL`, `BC_SITE_TOKEN` and the
    /// optional `BC_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let root_url = std::env::var("BC_SITE_URL").unwrap_or_default();
        let token = std::env::var("BC_SITE_TOKEN")
            .map_err(|_| BcError::Config("BC_SITE_TOKEN is not set".to_string()))?;

        let mut site = Self::new(root_url, token);
        if let Ok(raw) = std::env::var("BC_TIMEOUT_SECS") {
            site.timeout_secs = raw
                .parse()
                .map_err(|_| BcError::Config(format!("Invalid BC_TIMEOUT_SECS: {}", raw)))?;
        }
        Ok(site)
    }

    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut site: Site = serde_json::from_str(json)?;
        site.root_url = trim_root_url(site.root_url);
        Ok(site)
    }
}

fn trim_root_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let site = Site::new("https://example.com/", "tok");
        assert_eq!(site.root_url, "https://example.com");
        assert_eq!(site.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_json_defaults() {
        let site = Site::from_json(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(site.root_url, "");
        assert_eq!(site.token, "abc");
        assert_eq!(site.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let site =
            Site::from_json(r#"{"root_url": "http://x/", "token": "t", "timeout_secs": 5}"#)
                .unwrap();
        assert_eq!(site.root_url, "http://x");
        assert_eq!(site.timeout_secs, 5);
    }

    #[test]
    fn test_from_json_requires_token() {
        assert!(Site::from_json(r#"{"root_url": "http://x"}"#).is_err());
    }
}
