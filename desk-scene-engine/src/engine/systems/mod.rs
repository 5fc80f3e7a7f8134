//! Development input handling.
//!
//! Native builds get keyboard shortcuts for cycling the actor animation and
//! swapping the decorative model; the browser build has no shortcuts.

/// `N` and `G` shortcuts for native builds.
pub mod dev_shortcuts;
