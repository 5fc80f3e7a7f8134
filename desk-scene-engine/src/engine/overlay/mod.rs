//! The monitor overlay.
//!
//! An embedded document lives in a CSS 3D layer behind the canvas. An
//! invisible plane at the same placement punches a hole in the 3D render so
//! the document shows through and is still hidden by anything in front of
//! the monitor. Pointer activity across the boundary drives the camera
//! hand-off.

/// CSS `perspective` and `matrix3d` strings for the overlay layer.
pub mod css3d;

/// DOM construction for the overlay layer (browser only).
#[cfg(target_arch = "wasm32")]
pub mod dom;

/// Enter/leave signalling for the camera rig.
pub mod handoff;

/// The placement shared by the DOM object and the occlusion plane.
pub mod placement;

/// Plugin, overlay creation and per-frame synchronisation.
pub mod surface;
