//! # oxide-remote-forms
//!
//! Show server-side model validation errors next to the form inputs they
//! belong to.
//!
//! This crate provides:
//! - Normalization of ASP.NET style error payloads (`ModelState`, `error`,
//!   `error_description`, `Message`)
//! - Case-insensitive resolution of dotted field paths in a control tree
//! - Merging of server messages into each control's error bag under a
//!   dedicated `remote` category
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_remote_forms::{apply, AspMvcValidator, FormGroup};
//! use serde_json::json;
//!
//! let mut form = FormGroup::new()
//!     .control("Email")
//!     .group("Address", FormGroup::new().control("City"));
//!
//! let response = json!({
//!     "Message": "The request is invalid.",
//!     "ModelState": {
//!         "model.Email": ["The Email field is required."],
//!         "model.Address.City": ["Unknown city."]
//!     }
//! });
//!
//! apply(&AspMvcValidator::new(), &mut form, &response);
//!
//! let city = form.find(&["Address", "City"]).unwrap();
//! assert_eq!(city.errors.get("remote").unwrap(), ["Unknown city."]);
//!
//! // Form-level messages land on the "" control, created on demand.
//! let form_level = form.control_at("").unwrap();
//! assert_eq!(form_level.errors.get("remote").unwrap(), ["The request is invalid."]);
//! ```
//!
//! ## Custom Form Models
//!
//! Any form model can receive errors by implementing [`ControlTree`].
//! [`FormGroup`] is the in-memory implementation shipped with the crate.
//!
//! ## Configuration
//!
//! ```rust
//! use oxide_remote_forms::{AspMvcValidator, RemoteValidationService, ValidationConfig};
//!
//! let config = ValidationConfig::new()
//!     .fallback_key("__all__")
//!     .remote_key("server");
//! let service = RemoteValidationService::new(AspMvcValidator::with_config(config));
//! ```

pub mod config;
pub mod control;
mod error;
mod resolve;
mod result;
mod service;
pub mod shape;
mod validator;

pub use config::ValidationConfig;
pub use control::{AbstractControl, ControlErrors, ControlKind, ControlTree, FormControl, FormGroup};
pub use error::{FormError, Result};
pub use resolve::{resolve_path, ControlPath};
pub use result::{FieldError, FormValidationResult};
pub use service::{apply, apply_str, ApplyReport, RemoteValidationService};
pub use shape::ErrorShape;
pub use validator::{AspMvcValidator, ServerSideValidator};
