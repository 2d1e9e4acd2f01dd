//! Choice controls for Horizon Forms.
//!
//! This crate renders form fields from declarative configuration:
//!
//! - **Configuration**: [`ControlConfig`], deserialized leniently from the
//!   JSON a form builder stores
//! - **Controls**: The [`Control`] trait and [`mount`], which builds a control,
//!   attaches it and runs its post-mount hook
//! - **Choice Control**: [`SelectControl`] renders selects, checkbox groups,
//!   radio groups and single checkboxes, including a free-text "other"
//!   choice, a group-level required constraint and restoration of stored
//!   selections
//! - **Registry**: [`ControlRegistry`] maps type names to constructors
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_forms::{mount, ControlConfig, ControlRegistry};
//! use horizon_forms_core::{Catalog, Document};
//!
//! let registry = ControlRegistry::with_builtin_controls();
//! let config = ControlConfig::from_json(r#"{
//!     "type": "checkbox-group",
//!     "id": "toppings",
//!     "name": "toppings",
//!     "required": true,
//!     "values": ["cheese", "olives", "basil"]
//! }"#).unwrap();
//!
//! let mut control = registry.create(config, Arc::new(Catalog::english())).unwrap();
//! let mut doc = Document::new();
//! let body = doc.root();
//! mount(&mut doc, body, control.as_mut()).unwrap();
//!
//! // Nothing checked yet, so the group blocks submission.
//! let first = doc.get_element_by_id("toppings-0").unwrap();
//! assert!(!doc.check_validity(first));
//!
//! doc.click(first).unwrap();
//! assert!(doc.check_validity(first));
//! ```

pub mod config;
pub mod control;
mod error;
pub mod logging;
pub mod registry;
pub mod select;

pub use config::{ControlConfig, ControlType, OptionEntry, OptionSpec};
pub use control::{mount, Control, ControlDefinition};
pub use error::{FormError, Result};
pub use registry::{ControlConstructor, ControlRegistry, SharedControlRegistry};
pub use select::{GroupRequired, NormalizedConfig, OptionRenderer, RenderedControl, SelectControl};
