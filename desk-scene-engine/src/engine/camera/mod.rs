//! Desk camera for the composed scene.
//!
//! Holds a resting pose over the desk and a pose framing the monitor, and
//! eases between them when the overlay reports the pointer entering or
//! leaving the embedded document.

/// Desk camera resource and the systems that follow rig signals.
pub mod desk_camera;
