//! Mapping backend validation payloads back onto form fields.
//!
//! The backend rejects writes with a body shaped like
//! `{"message": "...", "errors": {"field": ["msg", ...]}}`. Its field names
//! rarely match the names the form uses (`descricao` vs `description`), so
//! each feature supplies a [`FieldMap`] and turns the payload into
//! [`FormErrors`] keyed by form field.
//!
//! ```rust
//! use shopdesk::forms::{FieldErrors, FieldMap, FormErrors};
//!
//! let payload = r#"{"message":"Dados inválidos","errors":{"descricao":["obrigatório"]}}"#;
//! let errors = FieldErrors::from_json(payload).unwrap();
//!
//! let map = FieldMap::new().with("descricao", "description");
//! let form = FormErrors::from_field_errors(&errors, &map);
//! assert_eq!(form.field("description"), &["obrigatório".to_string()]);
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// Per-field validation messages as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    /// Summary message for the whole payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Messages keyed by backend field name.
    #[serde(default, deserialize_with = "one_or_many")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Creates an empty set of field errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the summary message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Appends a message for a backend field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    /// Parses a backend error body.
    ///
    /// Returns `None` unless the body is JSON carrying at least one field
    /// message, so plain error bodies are not mistaken for validation failures.
    pub fn from_json(body: &str) -> Option<Self> {
        let parsed: FieldErrors = serde_json::from_str(body).ok()?;
        if parsed.errors.is_empty() {
            None
        } else {
            Some(parsed)
        }
    }

    /// Returns the messages for a backend field.
    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the backend field names that carry messages.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Returns `true` if no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }
}

// Some endpoints send a bare string instead of a list per field.
fn one_or_many<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let raw: Option<BTreeMap<String, OneOrMany>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(field, value)| match value {
            OneOrMany::One(message) => (field, vec![message]),
            OneOrMany::Many(messages) => (field, messages),
        })
        .collect())
}

/// Translation table from backend field names to form field names.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: HashMap<String, String>,
    passthrough: bool,
}

impl FieldMap {
    /// Creates an empty map; unmapped fields go to the form-level bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map that keeps unmapped names unchanged.
    pub fn passthrough() -> Self {
        Self {
            entries: HashMap::new(),
            passthrough: true,
        }
    }

    /// Adds a translation.
    #[must_use]
    pub fn with(mut self, backend: impl Into<String>, form: impl Into<String>) -> Self {
        self.entries.insert(backend.into(), form.into());
        self
    }

    /// Translates a backend field name, if it has a form counterpart.
    pub fn translate<'a>(&'a self, backend: &'a str) -> Option<Cow<'a, str>> {
        match self.entries.get(backend) {
            Some(form) => Some(Cow::Borrowed(form.as_str())),
            None if self.passthrough => Some(Cow::Borrowed(backend)),
            None => None,
        }
    }
}

impl<B, F> FromIterator<(B, F)> for FieldMap
where
    B: Into<String>,
    F: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (B, F)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FieldMap::new(), |map, (backend, form)| map.with(backend, form))
    }
}

/// Error state of a submitting form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
    form: Vec<String>,
}

impl FormErrors {
    /// Maps backend field errors through `map`.
    ///
    /// Messages for fields without a translation land in the form-level
    /// bucket prefixed with the backend name.
    pub fn from_field_errors(errors: &FieldErrors, map: &FieldMap) -> Self {
        let mut out = FormErrors::default();
        for (backend, messages) in &errors.errors {
            match map.translate(backend) {
                Some(form_field) => out
                    .fields
                    .entry(form_field.into_owned())
                    .or_default()
                    .extend(messages.iter().cloned()),
                None => out
                    .form
                    .extend(messages.iter().map(|m| format!("{}: {}", backend, m))),
            }
        }
        if out.fields.is_empty() && out.form.is_empty() {
            out.form.extend(errors.message.clone());
        }
        out
    }

    /// Builds the form state for any error returned by a submit.
    ///
    /// Silent errors produce an empty state; errors without field details
    /// become a single form-level message.
    pub fn from_error(error: &Error, map: &FieldMap) -> Self {
        if error.is_silent() {
            return FormErrors::default();
        }
        match error.field_errors() {
            Some(fields) => Self::from_field_errors(fields, map),
            None => FormErrors {
                fields: BTreeMap::new(),
                form: vec![error.notification()],
            },
        }
    }

    /// Returns the messages for a form field.
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the first message for a form field.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.field(name).first().map(String::as_str)
    }

    /// Returns the form-level messages.
    pub fn form_messages(&self) -> &[String] {
        &self.form
    }

    /// Returns `true` if there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }
}
