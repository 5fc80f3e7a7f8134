//! Runtime performance sensing and quality-tier adaptation.
//!
//! A single [`monitor::QualityMonitor`] resource is seeded from static device
//! signals, then revised once per second from a rolling frame rate average.
//! Consumers react to [`sampling::QualityTierChanged`] events rather than
//! polling the monitor.

/// Static device signals and the initial tier classification.
pub mod device;

/// Rolling frame rate history and tier transition rules.
pub mod monitor;

/// Plugin wiring the monitor into the frame loop.
pub mod sampling;

/// Quality tiers and the render/load parameters derived from them.
pub mod tier;
