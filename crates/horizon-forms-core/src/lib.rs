//! Core systems for Horizon Forms.
//!
//! This crate provides the foundation that form controls render into:
//!
//! - **Document**: An arena-backed element tree with stable [`NodeId`] handles
//! - **Element Factory**: [`Document::markup`] builds an element, its attributes,
//!   listeners and children in one call
//! - **Events**: Click/change/input listeners with simulated user interaction
//! - **Validity**: `required` and custom validity messages, like native form inputs
//! - **Localization**: The [`Localizer`] trait and an in-memory [`Catalog`]
//!
//! # Example
//!
//! ```
//! use horizon_forms_core::{Attributes, Content, Document, EventKind};
//!
//! let mut doc = Document::new();
//! let input = doc
//!     .markup(
//!         "input",
//!         Content::Empty,
//!         Attributes::new()
//!             .with("type", "checkbox")
//!             .with("id", "agree")
//!             .on(EventKind::Change, |doc, event| {
//!                 let message = if doc.checked(event.target) { "" } else { "Please agree" };
//!                 doc.set_custom_validity(event.target, message)
//!             }),
//!     )
//!     .unwrap();
//! doc.append_child(doc.root(), input).unwrap();
//!
//! doc.click(input).unwrap();
//! assert!(doc.check_validity(input));
//! doc.click(input).unwrap();
//! assert_eq!(doc.validation_message(input), "Please agree");
//! ```

pub mod dom;
mod error;
pub mod event;
pub mod i18n;
pub mod logging;
pub mod markup;

pub use dom::{Document, NodeId};
pub use error::{CatalogError, DomError, DomResult};
pub use event::{Event, EventHandler, EventKind, ListenerId};
pub use i18n::{format_message, Catalog, Localizer};
pub use markup::{AttrValue, Attributes, Content};
