#![allow(dead_code)]

use oxide_remote_forms::{FormControl, FormGroup};

/// Registration form with a nested address and a client-side error.
pub fn registration_form() -> FormGroup {
    FormGroup::new()
        .control("UserName")
        .control("Email")
        .with(
            "Password",
            FormControl::new().with_error("minlength", "Too short"),
        )
        .group(
            "Address",
            FormGroup::new()
                .control("Street")
                .control("City")
                .group("Geo", FormGroup::new().control("Lat").control("Lng")),
        )
}

/// Returns the remote messages of the leaf at `path`, empty if none.
pub fn remote(form: &FormGroup, path: &[&str]) -> Vec<String> {
    form.find(path)
        .unwrap_or_else(|| panic!("no control at {path:?}"))
        .errors
        .get("remote")
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

/// Installs a test log writer so tracing output shows up on failures.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
