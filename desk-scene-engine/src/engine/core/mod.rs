//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, runtime flags,
//! state transitions and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with quality monitoring, model loading, the desk
/// scene composer and platform-specific configurations.
pub mod app_setup;

/// Application state machine: baseline loading, then the running scene.
pub mod app_state;

/// Runtime flags read from the page query string or the command line.
pub mod runtime_config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
