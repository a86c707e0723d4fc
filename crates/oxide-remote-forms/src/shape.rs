//! Recognized server error payload shapes.
//!
//! ASP.NET backends report failures in a few different ways:
//!
//! - OAuth token endpoint: `{"error": "invalid_grant", "error_description": "..."}`
//! - Web API model validation: `{"Message": "...", "ModelState": {"model.Email": ["..."]}}`
//! - Custom field maps: `{"error": {"Email": ["..."]}}`

use serde_json::{Map, Value};

use crate::result::FormValidationResult;

/// Key of the OAuth form-level error description.
pub const ERROR_DESCRIPTION_KEY: &str = "error_description";
/// Key of the MVC model state dictionary.
pub const MODEL_STATE_KEY: &str = "ModelState";
/// Key of a custom field -> messages map.
pub const ERROR_KEY: &str = "error";
/// Key of the Web API form-level message.
pub const MESSAGE_KEY: &str = "Message";

/// One recognized part of an error payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorShape<'a> {
    /// `error_description`, a form-level message.
    Description(&'a Value),
    /// `ModelState`, messages keyed by prefixed field paths.
    ModelState(&'a Map<String, Value>),
    /// `error`, messages keyed by plain field paths.
    FieldMap(&'a Map<String, Value>),
    /// `Message`, a form-level message.
    Message(&'a Value),
}

impl<'a> ErrorShape<'a> {
    /// Returns every shape present in `raw`, in application order.
    ///
    /// Anything that is not a JSON object yields no shapes.
    pub fn detect(raw: &'a Value) -> Vec<Self> {
        let Some(object) = raw.as_object() else {
            return Vec::new();
        };

        let mut shapes = Vec::new();
        if let Some(value) = object.get(ERROR_DESCRIPTION_KEY) {
            shapes.push(Self::Description(value));
        }
        if let Some(map) = object.get(MODEL_STATE_KEY).and_then(Value::as_object) {
            shapes.push(Self::ModelState(map));
        }
        if let Some(map) = object.get(ERROR_KEY).and_then(Value::as_object) {
            shapes.push(Self::FieldMap(map));
        }
        if let Some(value) = object.get(MESSAGE_KEY) {
            shapes.push(Self::Message(value));
        }
        shapes
    }

    /// Adds the messages of this shape to `result`.
    ///
    /// `model_prefix` is stripped once from the start of `ModelState` keys.
    pub fn collect_into(&self, result: &mut FormValidationResult, model_prefix: &str) {
        match self {
            Self::Description(value) | Self::Message(value) => {
                for message in messages(value) {
                    result.add("", message);
                }
            }
            Self::ModelState(map) => {
                for (key, value) in *map {
                    let field = strip_model_prefix(key, model_prefix);
                    for message in messages(value) {
                        result.add(field, message);
                    }
                }
            }
            Self::FieldMap(map) => {
                for (key, value) in *map {
                    for message in messages(value) {
                        result.add(key, message);
                    }
                }
            }
        }
    }
}

fn strip_model_prefix<'k>(key: &'k str, prefix: &str) -> &'k str {
    if prefix.is_empty() {
        return key;
    }
    key.strip_prefix(prefix).unwrap_or(key)
}

/// Flattens a message value into display strings.
///
/// Arrays and objects contribute each of their items, strings are taken as
/// is, `null` contributes nothing and other values use their JSON text.
pub fn messages(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(message_text).collect(),
        Value::Object(map) => map.values().filter_map(message_text).collect(),
        other => message_text(other).into_iter().collect(),
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
