//! Analyzer configuration.
//!
//! The credential and model settings are resolved once at startup (see
//! [`crate::cli`]) and handed to the client as a value. A missing credential is
//! not an error here; it surfaces on the first analysis attempt.

use std::fmt;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Gemini REST endpoint prefix; the model and method are appended per request
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Low randomness favors reproducible classification
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
/// Accepted temperature range for the generation config
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

#[derive(Clone, PartialEq)]
pub struct AnalyzerConfig {
    api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl AnalyzerConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// The credential, if one was configured and is not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

// Hand-written so the credential never reaches logs
impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Parse a temperature argument, rejecting values outside [`TEMPERATURE_RANGE`].
pub fn parse_temperature(raw: &str) -> Result<f32, String> {
    let value: f32 = raw.trim().parse().map_err(|_| format!("'{}' is not a number", raw))?;
    if TEMPERATURE_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "temperature must be between {} and {}",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.temperature, 0.3);
        assert!(!config.has_credential());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        assert!(AnalyzerConfig::new(Some("   ".to_string())).api_key().is_none());
        assert!(AnalyzerConfig::new(Some(String::new())).api_key().is_none());
    }

    #[test]
    fn test_key_is_trimmed() {
        let config = AnalyzerConfig::new(Some(" abc123 \n".to_string()));
        assert_eq!(config.api_key(), Some("abc123"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AnalyzerConfig::new(Some("super-secret".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = AnalyzerConfig::default().with_base_url("http://localhost:8080/models/");
        assert_eq!(config.base_url, "http://localhost:8080/models");
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature("0.3"), Ok(0.3));
        assert_eq!(parse_temperature("0"), Ok(0.0));
        assert_eq!(parse_temperature("2.0"), Ok(2.0));
        assert!(parse_temperature("2.5").is_err());
        assert!(parse_temperature("-0.1").is_err());
        assert!(parse_temperature("warm").is_err());
    }
}
