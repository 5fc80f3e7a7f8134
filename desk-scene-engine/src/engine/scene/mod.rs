//! Scene composition and the shared look of everything in it.
//!
//! Baked props, the decorative model and the actor all render unlit; this
//! module holds the material and geometry passes they share and the plugin
//! that schedules the per-frame work once the baseline has loaded.

/// Plugin wiring the loading phase and the per-frame update order.
pub mod composer;

/// Baked environment props spawned once the baseline settles.
pub mod environment;

/// Vertex attribute stripping for reduced geometry detail.
pub mod geometry;

/// Unlit material rewriting, texture filtering and shadow policy.
pub mod materials;

/// Solid cubes marking where a model will appear.
pub mod placeholder;
