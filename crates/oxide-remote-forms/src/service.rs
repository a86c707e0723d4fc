//! Applying server validation errors to a form.

use serde_json::Value;
use tracing::{debug, warn};

use crate::control::{ControlKind, ControlTree};
use crate::error::Result;
use crate::resolve::ControlPath;
use crate::validator::{AspMvcValidator, ServerSideValidator};

/// Summary of one [`apply`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Errors written to a control.
    pub applied: usize,
    /// Field errors that ended up on a fallback control.
    pub fallback: usize,
    /// Errors that had no control to go to.
    pub dropped: usize,
}

impl ApplyReport {
    /// Returns whether nothing was written to the form.
    pub const fn is_noop(&self) -> bool {
        self.applied == 0 && self.dropped == 0
    }
}

/// Maps a raw server payload onto the controls of `tree`.
///
/// Messages are appended to the remote error category of the resolved
/// controls, leaving other categories alone. Field names without a matching
/// control go to the root fallback control, which is created on demand. An
/// empty payload leaves the tree untouched.
///
/// # Example
///
/// ```
/// use oxide_remote_forms::{apply, AspMvcValidator, FormGroup};
/// use serde_json::json;
///
/// let mut form = FormGroup::new().control("Email");
/// let raw = json!({"ModelState": {"model.email": ["Required"]}});
///
/// let report = apply(&AspMvcValidator::new(), &mut form, &raw);
/// assert_eq!(report.applied, 1);
///
/// let email = form.control_at("Email").unwrap();
/// assert_eq!(email.errors.get("remote").unwrap(), ["Required"]);
/// ```
pub fn apply<V, T>(validator: &V, tree: &mut T, raw: &Value) -> ApplyReport
where
    V: ServerSideValidator,
    T: ControlTree + ?Sized,
{
    let mut report = ApplyReport::default();
    let result = validator.validate(raw);
    if !result.has_errors() {
        return report;
    }

    let config = validator.config();
    if !tree.contains(&config.fallback_key) {
        debug!(key = %config.fallback_key, "adding fallback control");
        tree.add_control(&config.fallback_key);
    }
    let root_fallback = match tree.kind(&config.fallback_key) {
        Some(ControlKind::Leaf) => Some(ControlPath::new([config.fallback_key.as_str()])),
        _ => None,
    };

    for error in &result {
        let path = validator
            .resolve(&*tree, error.field_name())
            .or_else(|| root_fallback.clone());

        let Some(path) = path else {
            warn!(
                field = error.field_name(),
                "no control for server error, dropping {} message(s)",
                error.messages().len()
            );
            report.dropped += 1;
            continue;
        };

        let Some(errors) = tree.errors_at_mut(path.segments()) else {
            report.dropped += 1;
            continue;
        };
        errors.extend(&config.remote_key, error.messages().iter().cloned());

        if !error.is_form_level() && path.leaf() == Some(config.fallback_key.as_str()) {
            report.fallback += 1;
        }
        report.applied += 1;
        debug!(field = error.field_name(), control = %path, "applied server error");
    }

    report
}

/// Parses JSON text and applies it like [`apply`].
pub fn apply_str<V, T>(validator: &V, tree: &mut T, text: &str) -> Result<ApplyReport>
where
    V: ServerSideValidator,
    T: ControlTree + ?Sized,
{
    let raw: Value = serde_json::from_str(text)?;
    Ok(apply(validator, tree, &raw))
}

/// Applies server errors with a fixed validator.
#[derive(Debug, Clone, Default)]
pub struct RemoteValidationService<V = AspMvcValidator> {
    validator: V,
}

impl<V: ServerSideValidator> RemoteValidationService<V> {
    /// Creates a service around `validator`.
    pub const fn new(validator: V) -> Self {
        Self { validator }
    }

    /// Returns the validator.
    pub const fn validator(&self) -> &V {
        &self.validator
    }

    /// See [`apply`].
    pub fn apply<T: ControlTree + ?Sized>(&self, tree: &mut T, raw: &Value) -> ApplyReport {
        apply(&self.validator, tree, raw)
    }

    /// See [`apply_str`].
    pub fn apply_str<T: ControlTree + ?Sized>(&self, tree: &mut T, text: &str) -> Result<ApplyReport> {
        apply_str(&self.validator, tree, text)
    }

    /// Removes every server message from the form, keeping client errors.
    pub fn clear<T: ControlTree + ?Sized>(&self, tree: &mut T) {
        tree.clear_category(&self.validator.config().remote_key);
    }

    /// Clears previous server messages, then applies `raw`.
    pub fn reapply<T: ControlTree + ?Sized>(&self, tree: &mut T, raw: &Value) -> ApplyReport {
        self.clear(tree);
        self.apply(tree, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{FormControl, FormGroup};
    use serde_json::json;

    fn remote<'a>(form: &'a FormGroup, path: &[&str]) -> &'a [String] {
        form.find(path)
            .and_then(|control| control.errors.get("remote"))
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_payload_is_noop() {
        let mut form = FormGroup::new().control("Email");
        let report = apply(&AspMvcValidator::new(), &mut form, &json!({}));
        assert!(report.is_noop());
        assert!(!form.contains(""));
    }

    #[test]
    fn test_creates_fallback_control() {
        let mut form = FormGroup::new().control("Email");
        let report = apply(
            &AspMvcValidator::new(),
            &mut form,
            &json!({"error_description": "invalid_grant"}),
        );
        assert_eq!(report.applied, 1);
        assert_eq!(report.fallback, 0);
        assert_eq!(remote(&form, &[""]), ["invalid_grant"]);
    }

    #[test]
    fn test_unmatched_field_counts_as_fallback() {
        let mut form = FormGroup::new().control("Email");
        let report = apply(
            &AspMvcValidator::new(),
            &mut form,
            &json!({"ModelState": {"model.Phone": ["Required"]}}),
        );
        assert_eq!(report.fallback, 1);
        assert_eq!(remote(&form, &[""]), ["Required"]);
    }

    #[test]
    fn test_merges_with_client_errors() {
        let mut form = FormGroup::new().with(
            "Email",
            FormControl::new().with_error("required", "Email is required"),
        );
        apply(
            &AspMvcValidator::new(),
            &mut form,
            &json!({"ModelState": {"model.Email": ["Taken"]}}),
        );

        let email = form.control_at("Email").unwrap();
        assert_eq!(email.errors.get("required").unwrap(), ["Email is required"]);
        assert_eq!(email.errors.get("remote").unwrap(), ["Taken"]);
    }

    #[test]
    fn test_fallback_group_drops_errors() {
        let mut form = FormGroup::new().group("", FormGroup::new()).control("Email");
        let report = apply(
            &AspMvcValidator::new(),
            &mut form,
            &json!({"Message": "Bad request", "ModelState": {"model.Email": ["Taken"]}}),
        );
        assert_eq!(report.applied, 1);
        assert_eq!(report.dropped, 1);
        assert_eq!(remote(&form, &["Email"]), ["Taken"]);
    }

    #[test]
    fn test_apply_str_invalid_json() {
        let mut form = FormGroup::new();
        let result = apply_str(&AspMvcValidator::new(), &mut form, "not json");
        assert!(result.is_err());
        assert!(form.is_empty());
    }

    #[test]
    fn test_service_reapply_replaces_remote() {
        let service = RemoteValidationService::new(AspMvcValidator::new());
        let mut form = FormGroup::new().control("Email");

        service.apply(&mut form, &json!({"ModelState": {"model.Email": ["Taken"]}}));
        service.reapply(&mut form, &json!({"ModelState": {"model.Email": ["Invalid"]}}));

        assert_eq!(remote(&form, &["Email"]), ["Invalid"]);
    }
}
