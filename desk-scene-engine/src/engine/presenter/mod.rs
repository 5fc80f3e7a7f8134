//! The decorative model presenter.
//!
//! Picks a catalogue variant suited to the current quality profile, loads it
//! through the model loader under an admission limit, presents it with an
//! unlit tier-scaled look and swaps it on request, on a timer or after a
//! failure.

/// Variant selection over the static catalogue.
pub mod catalogue;

/// Presenter state: request tokens, admission, retries and release.
pub mod presenter;

/// Set of heavy model roots currently attached to the scene.
pub mod residency;

/// Systems that spawn, resolve, swap and re-tier presented models.
pub mod systems;
