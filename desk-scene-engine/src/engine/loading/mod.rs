//! Model and texture loading with progress aggregation.
//!
//! Wraps the asset server so callers get cancellable requests, monotonic
//! progress and exactly one terminal outcome per request, delivered as
//! [`model_loader::ModelLoadEvent`]s.

/// Baked scene props that must settle before the world is composed.
pub mod baseline;

/// Optional redirect of a request to an encoded twin of the asset.
pub mod decompression;

/// Typed failure reasons for model loads.
pub mod error;

/// Request bookkeeping, cancellation and load event delivery.
pub mod model_loader;

/// Loading progress aggregate used for state transitions.
pub mod progress;

/// Per-request progress and terminal outcome rules.
pub mod tracker;
