//! Form control tree.
//!
//! A form is a tree of named controls. Leaves ([`FormControl`]) carry an
//! error bag, groups ([`FormGroup`]) nest further controls. The
//! [`ControlTree`] trait is the capability the validator needs, so any form
//! model can receive server errors by implementing it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Error bag of a single control, keyed by error category.
///
/// Client-side categories (`required`, `maxlength`, ...) and the server
/// category live side by side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlErrors {
    categories: IndexMap<String, Vec<String>>,
}

impl ControlErrors {
    /// Creates an empty error bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages of a category.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Replaces the messages of a category.
    pub fn set(&mut self, category: impl Into<String>, messages: Vec<String>) {
        self.categories.insert(category.into(), messages);
    }

    /// Appends messages to a category, creating it if absent.
    pub fn extend<I, S>(&mut self, category: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .entry(category.to_string())
            .or_default()
            .extend(messages.into_iter().map(Into::into));
    }

    /// Removes a category, returning its messages.
    pub fn remove(&mut self, category: &str) -> Option<Vec<String>> {
        self.categories.shift_remove(category)
    }

    /// Returns whether the bag holds no category.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Returns the number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Iterates over categories and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.categories
            .iter()
            .map(|(category, messages)| (category.as_str(), messages.as_slice()))
    }
}

/// A single input's state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormControl {
    /// Errors currently attached to the control.
    pub errors: ControlErrors,
}

impl FormControl {
    /// Creates a control without errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a control with an initial client-side error.
    #[must_use]
    pub fn with_error(mut self, category: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.set(category, vec![message.into()]);
        self
    }

    /// Returns whether the control has no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Either a leaf control or a nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AbstractControl {
    /// A leaf control.
    Control(FormControl),
    /// A nested group of controls.
    Group(FormGroup),
}

impl AbstractControl {
    /// Returns the leaf control, if this is one.
    pub const fn as_control(&self) -> Option<&FormControl> {
        match self {
            Self::Control(control) => Some(control),
            Self::Group(_) => None,
        }
    }

    /// Returns the group, if this is one.
    pub const fn as_group(&self) -> Option<&FormGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Control(_) => None,
        }
    }
}

impl From<FormControl> for AbstractControl {
    fn from(control: FormControl) -> Self {
        Self::Control(control)
    }
}

impl From<FormGroup> for AbstractControl {
    fn from(group: FormGroup) -> Self {
        Self::Group(group)
    }
}

/// What a key in a [`ControlTree`] holds.
#[derive(Debug)]
pub enum ControlKind<'a, T: ?Sized> {
    /// A leaf control with an error bag.
    Leaf,
    /// A nested tree.
    Group(&'a T),
}

/// Capability needed to attach server errors to a form model.
pub trait ControlTree {
    /// Returns the keys of this level in declaration order.
    fn keys(&self) -> Vec<&str>;

    /// Returns what `key` holds, or `None` if the key is absent.
    fn kind(&self, key: &str) -> Option<ControlKind<'_, Self>>;

    /// Returns the error bag of the leaf at `key`.
    fn errors_mut(&mut self, key: &str) -> Option<&mut ControlErrors>;

    /// Returns the nested tree at `key`.
    fn group_mut(&mut self, key: &str) -> Option<&mut Self>;

    /// Adds an empty leaf control at `key`.
    fn add_control(&mut self, key: &str);

    /// Returns whether `key` exists at this level.
    fn contains(&self, key: &str) -> bool {
        self.kind(key).is_some()
    }

    /// Returns the error bag of the leaf at the end of `path`.
    fn errors_at_mut(&mut self, path: &[String]) -> Option<&mut ControlErrors> {
        match path {
            [] => None,
            [key] => self.errors_mut(key),
            [head, rest @ ..] => self.group_mut(head)?.errors_at_mut(rest),
        }
    }

    /// Removes the `category` messages from every leaf of the tree.
    fn clear_category(&mut self, category: &str) {
        let keys: Vec<String> = self.keys().into_iter().map(str::to_owned).collect();
        for key in keys {
            let is_group = matches!(self.kind(&key), Some(ControlKind::Group(_)));
            if is_group {
                if let Some(group) = self.group_mut(&key) {
                    group.clear_category(category);
                }
            } else if let Some(errors) = self.errors_mut(&key) {
                errors.remove(category);
            }
        }
    }
}

/// An ordered group of named controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormGroup {
    /// Child controls by key.
    pub controls: IndexMap<String, AbstractControl>,
}

impl FormGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a child, replacing any existing one with the same key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, control: impl Into<AbstractControl>) -> Self {
        self.controls.insert(key.into(), control.into());
        self
    }

    /// Adds an empty leaf control.
    #[must_use]
    pub fn control(self, key: impl Into<String>) -> Self {
        self.with(key, FormControl::new())
    }

    /// Adds a nested group.
    #[must_use]
    pub fn group(self, key: impl Into<String>, group: Self) -> Self {
        self.with(key, group)
    }

    /// Adds a child, failing if the key is already taken.
    pub fn try_add(
        &mut self,
        key: impl Into<String>,
        control: impl Into<AbstractControl>,
    ) -> Result<()> {
        let key = key.into();
        if self.controls.contains_key(&key) {
            return Err(FormError::DuplicateControl(key));
        }
        self.controls.insert(key, control.into());
        Ok(())
    }

    /// Walks `path`, creating missing groups, and returns the innermost one.
    ///
    /// Fails if a segment already names a leaf control.
    pub fn add_group_path(&mut self, path: &[&str]) -> Result<&mut Self> {
        let Some((head, rest)) = path.split_first() else {
            return Ok(self);
        };
        let child = self
            .controls
            .entry((*head).to_string())
            .or_insert_with(|| AbstractControl::Group(Self::new()));
        match child {
            AbstractControl::Group(group) => group.add_group_path(rest),
            AbstractControl::Control(_) => Err(FormError::NotAGroup((*head).to_string())),
        }
    }

    /// Returns the child at `key`.
    pub fn get(&self, key: &str) -> Option<&AbstractControl> {
        self.controls.get(key)
    }

    /// Returns the leaf control at `key`.
    pub fn control_at(&self, key: &str) -> Option<&FormControl> {
        self.controls.get(key).and_then(AbstractControl::as_control)
    }

    /// Returns the nested group at `key`.
    pub fn group_at(&self, key: &str) -> Option<&Self> {
        self.controls.get(key).and_then(AbstractControl::as_group)
    }

    /// Follows exact keys down to a leaf control.
    pub fn find(&self, path: &[&str]) -> Option<&FormControl> {
        match path {
            [] => None,
            [key] => self.control_at(key),
            [head, rest @ ..] => self.group_at(head)?.find(rest),
        }
    }

    /// Returns whether no leaf in the tree has errors.
    pub fn is_valid(&self) -> bool {
        self.controls.values().all(|child| match child {
            AbstractControl::Control(control) => control.is_valid(),
            AbstractControl::Group(group) => group.is_valid(),
        })
    }

    /// Returns the number of children at this level.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns whether the group has no children.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl ControlTree for FormGroup {
    fn keys(&self) -> Vec<&str> {
        self.controls.keys().map(String::as_str).collect()
    }

    fn kind(&self, key: &str) -> Option<ControlKind<'_, Self>> {
        self.controls.get(key).map(|child| match child {
            AbstractControl::Control(_) => ControlKind::Leaf,
            AbstractControl::Group(group) => ControlKind::Group(group),
        })
    }

    fn errors_mut(&mut self, key: &str) -> Option<&mut ControlErrors> {
        match self.controls.get_mut(key)? {
            AbstractControl::Control(control) => Some(&mut control.errors),
            AbstractControl::Group(_) => None,
        }
    }

    fn group_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self.controls.get_mut(key)? {
            AbstractControl::Group(group) => Some(group),
            AbstractControl::Control(_) => None,
        }
    }

    fn add_control(&mut self, key: &str) {
        self.controls
            .insert(key.to_string(), AbstractControl::Control(FormControl::new()));
    }
}
