//! Server-side validators.

use serde_json::Value;
use tracing::debug;

use crate::config::ValidationConfig;
use crate::control::ControlTree;
use crate::resolve::{resolve_path, ControlPath};
use crate::result::FormValidationResult;
use crate::shape::ErrorShape;

/// Reads one backend's error payloads and maps its field names to controls.
pub trait ServerSideValidator: Send + Sync {
    /// Normalizes a raw error payload. Unknown shapes give an empty result.
    fn validate(&self, raw: &Value) -> FormValidationResult;

    /// Finds the control a server field name refers to.
    fn resolve<T: ControlTree + ?Sized>(&self, tree: &T, field_name: &str) -> Option<ControlPath>;

    /// Returns the settings used by this validator.
    fn config(&self) -> &ValidationConfig;
}

/// Validator for ASP.NET MVC / Web API error responses.
///
/// # Example
///
/// ```
/// use oxide_remote_forms::{AspMvcValidator, ServerSideValidator};
/// use serde_json::json;
///
/// let validator = AspMvcValidator::new();
/// let result = validator.validate(&json!({
///     "ModelState": {"model.Email": ["Required"]}
/// }));
///
/// let error = result.error_for("Email").unwrap();
/// assert_eq!(error.messages(), ["Required"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AspMvcValidator {
    config: ValidationConfig,
}

impl AspMvcValidator {
    /// Creates a validator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with custom settings.
    pub const fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }
}

impl ServerSideValidator for AspMvcValidator {
    fn validate(&self, raw: &Value) -> FormValidationResult {
        let mut result = FormValidationResult::new();
        for shape in ErrorShape::detect(raw) {
            shape.collect_into(&mut result, &self.config.model_prefix);
        }
        debug!(fields = result.len(), "parsed server validation errors");
        result
    }

    fn resolve<T: ControlTree + ?Sized>(&self, tree: &T, field_name: &str) -> Option<ControlPath> {
        resolve_path(
            tree,
            field_name,
            self.config.separator,
            &self.config.fallback_key,
        )
    }

    fn config(&self) -> &ValidationConfig {
        &self.config
    }
}
