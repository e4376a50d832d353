//! Runtime configuration for reaching the campaigns API.

use thiserror::Error;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "CAMPAIGNS_API_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid API base URL {0:?}: expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
}

impl Settings {
    pub fn new(api_base_url: &str) -> Result<Self, SettingsError> {
        let trimmed = api_base_url.trim();
        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .ok_or_else(|| SettingsError::InvalidBaseUrl(api_base_url.to_string()))?;
        if host.is_empty() || host.starts_with('/') {
            return Err(SettingsError::InvalidBaseUrl(api_base_url.to_string()));
        }
        Ok(Self {
            api_base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    /// Read settings from the process environment, falling back to
    /// [`DEFAULT_BASE_URL`] when the variable is unset or blank.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self::new(&url),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_uses_default() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());

        let blank = Settings::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(blank.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn variable_overrides_default_and_drops_trailing_slash() {
        let settings = Settings::from_lookup(|key| {
            assert_eq!(key, BASE_URL_ENV);
            Some("https://ads.example.com/api/".to_string())
        })
        .unwrap();
        assert_eq!(settings.api_base_url, "https://ads.example.com/api");
    }

    #[test]
    fn rejects_non_http_urls() {
        for url in ["ftp://example.com", "localhost:8000", "http://", "https:///api"] {
            assert_eq!(
                Settings::new(url),
                Err(SettingsError::InvalidBaseUrl(url.to_string())),
                "{url}"
            );
        }
    }
}
