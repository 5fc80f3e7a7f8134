//! Cross-document event bridge between the host page and the embedded document.
//!
//! The embedded document forwards its pointer and keyboard activity with
//! `postMessage`. Those messages, together with the host page's own pointer
//! events, are turned into typed [`surface_bridge::SurfaceEvent`]s in host
//! coordinates.
//!
//! ## Message Flow
//!
//! ```text
//! Embedded document (iframe)            Host page (bevy canvas)
//!        │                                        │
//!        ├─ {type:'mousemove',clientX,clientY} ─> │ remap into host space
//!        ├─ {type:'keydown'|'keyup', key} ──────> │
//!        │                                        ├─ SurfaceEvent { origin: EmbeddedSurface }
//!        │                      document events ─>├─ SurfaceEvent { origin: Host }
//! ```
//!
//! ## Envelope
//!
//! Messages are JSON objects tagged by `type`. `mousemove`, `mousedown`,
//! `mouseup`, `keydown` and `keyup` are understood; anything else, including
//! messages that are not JSON at all, is ignored.

/// Envelope parsing, coordinate remapping and the event queue fed by DOM listeners.
pub mod surface_bridge;
