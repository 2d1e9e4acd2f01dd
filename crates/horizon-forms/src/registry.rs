//! Registry mapping control type names to constructors.
//!
//! The registry is an ordinary value owned by whatever builds forms. Nothing
//! registers itself globally; call [`ControlRegistry::with_builtin_controls`]
//! or [`ControlRegistry::register`] during initialization.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_forms::{ControlConfig, ControlRegistry};
//! use horizon_forms_core::{Catalog, Document};
//!
//! let registry = ControlRegistry::with_builtin_controls();
//! let config = ControlConfig::new("radio-group", "size").with_values(["S", "M", "L"]);
//! let mut control = registry.create(config, Arc::new(Catalog::english())).unwrap();
//!
//! let mut doc = Document::new();
//! let body = doc.root();
//! let root = horizon_forms::mount(&mut doc, body, control.as_mut()).unwrap();
//! assert_eq!(doc.elements_by_tag(root, "input").len(), 3);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use horizon_forms_core::Localizer;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::ControlConfig;
use crate::control::Control;
use crate::error::{FormError, Result};
use crate::logging::targets;
use crate::select::SelectControl;

/// A function creating a control for a configuration.
pub type ControlConstructor = fn(ControlConfig, Arc<dyn Localizer>) -> Box<dyn Control>;

/// Maps type names (e.g. `checkbox-group`) to control constructors.
#[derive(Clone, Default)]
pub struct ControlRegistry {
    constructors: HashMap<String, ControlConstructor>,
}

impl fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("types", &self.types())
            .finish()
    }
}

impl ControlRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in controls registered.
    pub fn with_builtin_controls() -> Self {
        let mut registry = Self::new();
        registry.register(SelectControl::TYPES, SelectControl::boxed);
        registry
    }

    /// Register `constructor` for every name in `types`, replacing earlier entries.
    pub fn register(&mut self, types: &[&str], constructor: ControlConstructor) {
        for &type_name in types {
            if self
                .constructors
                .insert(type_name.to_string(), constructor)
                .is_some()
            {
                debug!(target: targets::REGISTRY, type_name, "replaced control constructor");
            } else {
                debug!(target: targets::REGISTRY, type_name, "registered control");
            }
        }
    }

    /// Whether a constructor is registered for `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Create the control registered for the configuration's type.
    pub fn create(
        &self,
        config: ControlConfig,
        localizer: Arc<dyn Localizer>,
    ) -> Result<Box<dyn Control>> {
        let type_name = config.control_type.as_str();
        let constructor = self
            .constructors
            .get(type_name)
            .ok_or_else(|| FormError::UnknownControlType(type_name.to_string()))?;
        Ok(constructor(config, localizer))
    }
}

/// Thread-safe wrapper around [`ControlRegistry`] for sharing between form builders.
#[derive(Clone, Default)]
pub struct SharedControlRegistry {
    inner: Arc<RwLock<ControlRegistry>>,
}

impl SharedControlRegistry {
    /// Wrap an existing registry.
    pub fn new(registry: ControlRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Register `constructor` for every name in `types`.
    pub fn register(&self, types: &[&str], constructor: ControlConstructor) {
        self.inner.write().register(types, constructor);
    }

    /// Whether a constructor is registered for `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.inner.read().contains(type_name)
    }

    /// Create the control registered for the configuration's type.
    pub fn create(
        &self,
        config: ControlConfig,
        localizer: Arc<dyn Localizer>,
    ) -> Result<Box<dyn Control>> {
        self.inner.read().create(config, localizer)
    }
}
