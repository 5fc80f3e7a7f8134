use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Moves to `Running` once every baseline source has settled.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.baseline_loaded {
        info!("→ Baseline resources settled, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
