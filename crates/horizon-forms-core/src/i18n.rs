//! Message lookup for user-visible strings.
//!
//! Controls never hard-code user-facing text. They ask a [`Localizer`] for a
//! message by key and pass positional arguments that fill the template's
//! `{...}` placeholders from left to right.
//!
//! # Example
//!
//! ```
//! use horizon_forms_core::{Catalog, Localizer};
//!
//! let catalog = Catalog::english();
//! assert_eq!(
//!     catalog.get("minSelectionRequired", &["1"]),
//!     "Minimum 1 selections required"
//! );
//!
//! // Unknown keys fall back to the key itself.
//! assert_eq!(catalog.get("noSuchKey", &[]), "noSuchKey");
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::warn;

use crate::error::CatalogError;
use crate::logging::targets;

/// Lookup of localized message templates.
pub trait Localizer: Send + Sync {
    /// The raw template for `key`, if known.
    fn lookup(&self, key: &str) -> Option<String>;

    /// The message for `key` with placeholders filled from `args`.
    ///
    /// A missing key is logged and the key itself is returned.
    fn get(&self, key: &str, args: &[&str]) -> String {
        match self.lookup(key) {
            Some(template) => format_message(&template, args),
            None => {
                warn!(target: targets::I18N, key, "missing localization key");
                key.to_string()
            }
        }
    }
}

/// Replace `{...}` placeholders in `template` with `args`, left to right.
///
/// Placeholders beyond the supplied arguments are left untouched, as is an
/// unterminated `{`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str(&rest[start..=start + len]),
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}

/// A thread-safe, in-memory message catalog for one locale.
#[derive(Debug)]
pub struct Catalog {
    locale: String,
    messages: RwLock<HashMap<String, String>>,
}

impl Catalog {
    /// Create an empty catalog for `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: RwLock::new(HashMap::new()),
        }
    }

    /// The built-in English messages.
    pub fn english() -> Self {
        Self::new("en-US")
            .with_message("minSelectionRequired", "Minimum {min} selections required")
            .with_message("other", "Other")
    }

    /// Load a catalog from a flat JSON object of `key: template` pairs.
    ///
    /// ```
    /// use horizon_forms_core::{Catalog, Localizer};
    ///
    /// let catalog = Catalog::from_json("de-DE", r#"{"other": "Andere"}"#).unwrap();
    /// assert_eq!(catalog.get("other", &[]), "Andere");
    /// ```
    pub fn from_json(locale: impl Into<String>, json: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(CatalogError::NotAnObject {
                    found: json_kind(&other),
                });
            }
        };
        let catalog = Self::new(locale);
        {
            let mut messages = catalog.messages.write();
            for (key, value) in map {
                match value {
                    serde_json::Value::String(template) => {
                        messages.insert(key, template);
                    }
                    other => {
                        return Err(CatalogError::NotAnObject {
                            found: json_kind(&other),
                        });
                    }
                }
            }
        }
        Ok(catalog)
    }

    /// The locale tag, e.g. `en-US`.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Add or replace a message.
    pub fn insert(&self, key: impl Into<String>, template: impl Into<String>) {
        self.messages.write().insert(key.into(), template.into());
    }

    /// Add a message using builder pattern.
    pub fn with_message(self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    /// Copy every message from `other`, overriding existing keys.
    pub fn extend_from(&self, other: &Catalog) {
        let source = other.messages.read().clone();
        self.messages.write().extend(source);
    }

    /// Whether the catalog has a message for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.messages.read().contains_key(key)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Whether the catalog has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Localizer for Catalog {
    fn lookup(&self, key: &str) -> Option<String> {
        self.messages.read().get(key).cloned()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
