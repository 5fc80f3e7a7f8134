use bevy::prelude::*;
use bevy::transform::TransformSystem;

use crate::engine::actor::systems::{
    advance_actors, cycle_actor_animation, resolve_actor_load, spawn_animated_actor,
};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::loading::baseline::{check_baseline_loading, start_loading};
use crate::engine::overlay::surface::{
    create_overlay, drive_camera_handoff, enforce_overlay_lockstep, sync_overlay_layer,
};
use crate::engine::presenter::systems::{
    apply_tier_to_presenters, drive_fallback_retries, handle_variant_changes,
    resolve_presenter_loads, rotate_variants_periodically, spawn_model_presenter,
};
use crate::engine::quality::monitor::QualityMonitor;
use crate::engine::scene::environment::spawn_baseline_props;

/// Per-frame update order once the scene is running.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneUpdateSet {
    Overlay,
    Presenter,
    Actor,
}

pub struct SceneComposerPlugin;

impl Plugin for SceneComposerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SceneUpdateSet::Overlay,
                SceneUpdateSet::Presenter,
                SceneUpdateSet::Actor,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );

        app.add_systems(Startup, (start_loading, spawn_lighting))
            .add_systems(
                Update,
                (check_baseline_loading, transition_to_running)
                    .chain()
                    .run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                OnEnter(AppState::Running),
                (
                    spawn_baseline_props,
                    create_overlay,
                    spawn_model_presenter,
                    spawn_animated_actor,
                ),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(
            OnEnter(AppState::Running),
            crate::engine::overlay::surface::mount_overlay_dom,
        );

        app.add_systems(
            Update,
            (
                (enforce_overlay_lockstep, drive_camera_handoff).in_set(SceneUpdateSet::Overlay),
                (
                    rotate_variants_periodically,
                    handle_variant_changes,
                    resolve_presenter_loads,
                    drive_fallback_retries,
                    apply_tier_to_presenters,
                )
                    .chain()
                    .in_set(SceneUpdateSet::Presenter),
                (resolve_actor_load, cycle_actor_animation, advance_actors)
                    .chain()
                    .in_set(SceneUpdateSet::Actor),
            ),
        );

        // The CSS layer follows the camera after it has moved this frame.
        app.add_systems(
            PostUpdate,
            sync_overlay_layer
                .after(TransformSystem::TransformPropagate)
                .run_if(in_state(AppState::Running)),
        );

    }
}

fn spawn_lighting(mut commands: Commands, monitor: Res<QualityMonitor>) {
    commands.spawn((
        Name::new("KeyLight"),
        DirectionalLight {
            shadows_enabled: monitor.profile().shadows_enabled,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}
