//! Normalized server validation results.

use std::fmt;

use serde::Serialize;

/// All messages the server reported for one field.
///
/// An empty field name marks a form-level error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    field_name: String,
    messages: Vec<String>,
}

impl FieldError {
    /// Creates an entry with no messages yet.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            messages: Vec::new(),
        }
    }

    /// Returns the field path, `""` for form-level errors.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Returns the messages in the order they were reported.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns whether this error belongs to the whole form.
    pub fn is_form_level(&self) -> bool {
        self.field_name.is_empty()
    }

    /// Appends a message.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

/// Ordered collection of field errors, one entry per field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormValidationResult {
    errors: Vec<FieldError>,
}

impl FormValidationResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all entries in insertion order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns whether the server reported anything.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the entry for an exact field name.
    pub fn error_for(&self, field_name: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field_name == field_name)
    }

    /// Returns whether an entry exists for an exact field name.
    pub fn has_error_for(&self, field_name: &str) -> bool {
        self.error_for(field_name).is_some()
    }

    /// Adds a message, creating the field entry on first use.
    pub fn add(&mut self, field_name: &str, message: impl Into<String>) {
        let index = match self.errors.iter().position(|e| e.field_name == field_name) {
            Some(index) => index,
            None => {
                self.errors.push(FieldError::new(field_name));
                self.errors.len() - 1
            }
        };
        self.errors[index].add_message(message);
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }
}

impl IntoIterator for FormValidationResult {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormValidationResult {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for FormValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            for message in &error.messages {
                writeln!(f, "{}: {message}", error.field_name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_groups_by_field() {
        let mut result = FormValidationResult::new();
        result.add("Email", "Required");
        result.add("Name", "Too short");
        result.add("Email", "Invalid");

        assert_eq!(result.len(), 2);
        let email = result.error_for("Email").unwrap();
        assert_eq!(email.messages(), ["Required", "Invalid"]);
        assert_eq!(result.errors()[1].field_name(), "Name");
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut result = FormValidationResult::new();
        result.add("Email", "Required");

        assert!(result.has_error_for("Email"));
        assert!(!result.has_error_for("email"));
        assert!(!result.has_error_for(""));
    }

    #[test]
    fn test_empty() {
        let result = FormValidationResult::new();
        assert!(!result.has_errors());
        assert!(result.is_empty());
        assert_eq!(result.to_string(), "");
    }

    #[test]
    fn test_form_level() {
        let mut result = FormValidationResult::new();
        result.add("", "invalid_grant");

        let error = &result.errors()[0];
        assert!(error.is_form_level());
        assert_eq!(result.to_string(), ": invalid_grant\n");
    }

    #[test]
    fn test_serialize() {
        let mut result = FormValidationResult::new();
        result.add("Email", "Required");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"field_name": "Email", "messages": ["Required"]}])
        );
    }
}
