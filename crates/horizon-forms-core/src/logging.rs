//! Logging facilities for Horizon Forms.
//!
//! Horizon Forms uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Every event is emitted under one of the [`targets`] below so subsystems can
//! be filtered independently, e.g. `RUST_LOG=horizon_forms_core::event=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_forms_core";
    /// Document tree mutations.
    pub const DOM: &str = "horizon_forms_core::dom";
    /// Event listener registration and dispatch.
    pub const EVENT: &str = "horizon_forms_core::event";
    /// Message catalog lookups.
    pub const I18N: &str = "horizon_forms_core::i18n";
}
