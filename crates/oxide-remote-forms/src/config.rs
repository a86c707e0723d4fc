//! Validation configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Default key of the catch-all control for form-level errors.
pub const DEFAULT_FALLBACK_KEY: &str = "";

/// Default error category holding server-side messages.
pub const DEFAULT_REMOTE_KEY: &str = "remote";

/// Default prefix the server puts in front of `ModelState` keys.
pub const DEFAULT_MODEL_PREFIX: &str = "model.";

/// Settings shared by the validator and the validation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Key of the control receiving form-level and unmatched errors.
    pub fallback_key: String,
    /// Error category the server messages are stored under.
    pub remote_key: String,
    /// Prefix stripped from `ModelState` keys.
    pub model_prefix: String,
    /// Separator between segments of a field path.
    pub separator: char,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fallback_key: DEFAULT_FALLBACK_KEY.to_string(),
            remote_key: DEFAULT_REMOTE_KEY.to_string(),
            model_prefix: DEFAULT_MODEL_PREFIX.to_string(),
            separator: '.',
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from JSON text. Missing keys keep their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_remote_forms::ValidationConfig;
    ///
    /// let config = ValidationConfig::from_json(r#"{"remote_key": "server"}"#).unwrap();
    /// assert_eq!(config.remote_key, "server");
    /// assert_eq!(config.model_prefix, "model.");
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Sets the fallback control key.
    #[must_use]
    pub fn fallback_key(mut self, key: impl Into<String>) -> Self {
        self.fallback_key = key.into();
        self
    }

    /// Sets the error category for server messages.
    #[must_use]
    pub fn remote_key(mut self, key: impl Into<String>) -> Self {
        self.remote_key = key.into();
        self
    }

    /// Sets the `ModelState` key prefix.
    #[must_use]
    pub fn model_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.model_prefix = prefix.into();
        self
    }

    /// Sets the field path separator.
    #[must_use]
    pub const fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Checks that the settings can be used.
    pub fn check(&self) -> Result<()> {
        if self.remote_key.is_empty() {
            return Err(FormError::InvalidConfig(
                "remote_key must not be empty".to_string(),
            ));
        }
        if self.fallback_key.contains(self.separator) {
            return Err(FormError::InvalidConfig(format!(
                "fallback_key {:?} contains the separator {:?}",
                self.fallback_key, self.separator
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::new();
        assert_eq!(config.fallback_key, "");
        assert_eq!(config.remote_key, "remote");
        assert_eq!(config.model_prefix, "model.");
        assert_eq!(config.separator, '.');
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ValidationConfig::new()
            .fallback_key("__all__")
            .remote_key("server")
            .model_prefix("dto.")
            .separator('/');

        assert_eq!(config.fallback_key, "__all__");
        assert_eq!(config.remote_key, "server");
        assert_eq!(config.model_prefix, "dto.");
        assert_eq!(config.separator, '/');
    }

    #[test]
    fn test_from_json_partial() {
        let config = ValidationConfig::from_json(r#"{"fallback_key": "__all__"}"#).unwrap();
        assert_eq!(config.fallback_key, "__all__");
        assert_eq!(config.remote_key, "remote");
    }

    #[test]
    fn test_from_json_rejects_empty_remote_key() {
        let err = ValidationConfig::from_json(r#"{"remote_key": ""}"#).unwrap_err();
        assert!(matches!(err, FormError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_rejects_bad_json() {
        let err = ValidationConfig::from_json("{").unwrap_err();
        assert!(matches!(err, FormError::Json(_)));
    }

    #[test]
    fn test_fallback_key_with_separator() {
        let config = ValidationConfig::new().fallback_key("form.all");
        assert!(config.check().is_err());
    }
}
