//! The animated actor.
//!
//! One rigged model whose single baked animation track holds several named
//! animations back to back. Each is played as an independent looping
//! sub-clip cut out of the track by frame range.

/// Actor state machine and per-animation placement.
pub mod actor;

/// Frame range slicing and looping sub-clip playback.
pub mod subclip;

/// Systems that load, bind, advance and cycle the actor.
pub mod systems;
