//! Log targets for Horizon Forms controls.
//!
//! See [`horizon_forms_core::logging`] for subscriber setup.

/// Target names for log filtering.
pub mod targets {
    /// Configuration parsing.
    pub const CONFIG: &str = "horizon_forms::config";
    /// Control build and post-mount lifecycle.
    pub const CONTROL: &str = "horizon_forms::control";
    /// Control type registry.
    pub const REGISTRY: &str = "horizon_forms::registry";
    /// Restoration of stored selections.
    pub const RESTORE: &str = "horizon_forms::restore";
    /// Group-level validity constraints.
    pub const VALIDITY: &str = "horizon_forms::validity";
}
