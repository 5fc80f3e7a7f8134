use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::animation_catalogue::{ACTOR_PLACEHOLDER_COLOR, ACTOR_PLACEHOLDER_SIZE, find_settings};
use constants::path::{ACTOR_BASE_COLOR_TEXTURE_PATH, ACTOR_MODEL_PATH};

use crate::engine::actor::actor::{
    ActorAnimation, ActorState, AnimatedActor, pin_transform, placement_transform,
};
use crate::engine::loading::model_loader::{LoadOptions, LoadOutcome, ModelLoadEvent, ModelLoader};
use crate::engine::quality::monitor::QualityMonitor;
use crate::engine::scene::materials::{UnlitTexture, apply_shadow_policy, rewrite_to_unlit};
use crate::engine::scene::placeholder::spawn_reference_cube;

/// Advance the actor to the next catalogued animation.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NextActorAnimation;

/// Scene root spawned for an actor.
#[derive(Component)]
pub struct ActorModel {
    pub owner: Entity,
}

pub struct ActorPlugin;

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<NextActorAnimation>();
    }
}

pub fn spawn_animated_actor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    monitor: Res<QualityMonitor>,
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
) {
    let animation = AnimatedActor::select_animation(&mut rand::thread_rng());
    let mut actor = AnimatedActor::new(animation, asset_server.load(ACTOR_BASE_COLOR_TEXTURE_PATH));

    let position = find_settings(animation).map_or([0.0; 3], |settings| settings.position);
    actor.placeholder = Some(spawn_reference_cube(
        &mut commands,
        &mut meshes,
        &mut materials,
        "ActorPlaceholder",
        ACTOR_PLACEHOLDER_SIZE,
        position,
        ACTOR_PLACEHOLDER_COLOR,
    ));

    let load = loader.load(
        &*asset_server,
        ACTOR_MODEL_PATH,
        LoadOptions {
            geometry_detail: monitor.profile().geometry_detail,
            report_progress: true,
        },
    );
    actor.begin_loading(load);
    info!("Loading actor, starting with {}", animation);

    commands.spawn((Name::new("AnimatedActor"), actor));
}

pub fn resolve_actor_load(
    mut commands: Commands,
    mut load_events: EventReader<ModelLoadEvent>,
    mut actors: Query<(Entity, &mut AnimatedActor)>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
) {
    for event in load_events.read() {
        for (owner, mut actor) in &mut actors {
            if actor.load.map(|load| load.id()) != Some(event.id) {
                continue;
            }

            match &event.outcome {
                LoadOutcome::Progress(_) => {}
                LoadOutcome::Failed(error) => {
                    error!("Actor failed to load, keeping the placeholder: {}", error);
                    actor.mark_failed();
                }
                LoadOutcome::Loaded(handle) => {
                    let Some(gltf) = gltfs.get(handle) else {
                        actor.mark_failed();
                        continue;
                    };
                    let Some(scene) = gltf
                        .default_scene
                        .clone()
                        .or_else(|| gltf.scenes.first().cloned())
                    else {
                        error!("{} contains no scene", ACTOR_MODEL_PATH);
                        actor.mark_failed();
                        continue;
                    };

                    let animation = match gltf.animations.first() {
                        Some(clip) => {
                            let (graph, node) = AnimationGraph::from_clip(clip.clone());
                            Some(ActorAnimation {
                                graph: graphs.add(graph),
                                node,
                            })
                        }
                        None => {
                            warn!("{} has no baked animation track", ACTOR_MODEL_PATH);
                            None
                        }
                    };

                    if let Some(placeholder) = actor.placeholder.take() {
                        commands.entity(placeholder).despawn();
                    }

                    let transform = find_settings(actor.current_animation())
                        .map(placement_transform)
                        .unwrap_or_default();
                    let model = commands
                        .spawn((
                            Name::new("ActorModel"),
                            SceneRoot(scene),
                            transform,
                            ActorModel { owner },
                        ))
                        .observe(prepare_actor_model)
                        .id();

                    actor.mark_ready(model, animation);
                    if actor.animation().is_some() {
                        actor.start_playback();
                    }
                    info!("Actor ready, playing {}", actor.current_animation());
                }
            }
        }
    }
}

/// Textures the actor's meshes and binds its animation players.
fn prepare_actor_model(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    models: Query<&ActorModel>,
    mut actors: Query<&mut AnimatedActor>,
    children: Query<&Children>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut players: Query<(Entity, &mut AnimationPlayer)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let root = trigger.target();
    let Ok(model) = models.get(root) else {
        return;
    };
    let Ok(mut actor) = actors.get_mut(model.owner) else {
        return;
    };

    let texture = UnlitTexture::Replace(actor.texture.clone());
    for entity in rewrite_to_unlit(
        &mut commands,
        root,
        &children,
        &mesh_materials,
        &mut materials,
        &texture,
    ) {
        apply_shadow_policy(&mut commands, entity, true);
    }

    let Some(animation) = actor.animation().cloned() else {
        return;
    };
    let start = actor
        .playback()
        .map_or(0.0, |playback| playback.source_time());

    let mut bound = Vec::new();
    for entity in children.iter_descendants(root) {
        let Ok((entity, mut player)) = players.get_mut(entity) else {
            continue;
        };
        // The sub-clip clock drives the track, so the player itself never advances.
        player
            .play(animation.node)
            .repeat()
            .set_speed(0.0)
            .seek_to(start);
        commands
            .entity(entity)
            .insert(AnimationGraphHandle(animation.graph.clone()));
        bound.push(entity);
    }

    if bound.is_empty() {
        warn!("Actor model has no animation player");
    }
    actor.bind_players(bound);
}

/// Steps every ready actor's sub-clip, then re-pins its placement.
pub fn advance_actors(
    time: Res<Time>,
    mut actors: Query<&mut AnimatedActor>,
    mut models: Query<&mut Transform, With<ActorModel>>,
    mut players: Query<&mut AnimationPlayer>,
) {
    for mut actor in &mut actors {
        if actor.state() != ActorState::Ready {
            continue;
        }

        if let (Some(source_time), Some(node)) = (
            actor.advance(time.delta_secs()),
            actor.animation().map(|animation| animation.node),
        ) {
            for &entity in actor.players() {
                if let Some(active) = players
                    .get_mut(entity)
                    .ok()
                    .and_then(|player| player.into_inner().animation_mut(node))
                {
                    active.seek_to(source_time);
                }
            }
        }

        let Some(settings) = find_settings(actor.current_animation()) else {
            continue;
        };
        if let Some(mut transform) = actor.model().and_then(|model| models.get_mut(model).ok()) {
            pin_transform(settings, &mut transform);
        }
    }
}

pub fn cycle_actor_animation(
    mut requests: EventReader<NextActorAnimation>,
    mut actors: Query<&mut AnimatedActor>,
    mut models: Query<&mut Transform, With<ActorModel>>,
    mut players: Query<&mut AnimationPlayer>,
) {
    for _ in requests.read() {
        for mut actor in &mut actors {
            if actor.state() != ActorState::Ready {
                continue;
            }

            for &entity in actor.players() {
                if let Ok(mut player) = players.get_mut(entity) {
                    player.stop_all();
                }
            }

            let next = actor.next_animation();
            info!("Actor animation → {}", next);

            if let Some(mut transform) = actor.model().and_then(|model| models.get_mut(model).ok()) {
                transform.translation = Vec3::ZERO;
                if let Some(settings) = find_settings(next) {
                    *transform = placement_transform(settings);
                }
            }

            let (Some(animation), Some(start)) = (
                actor.animation().map(|animation| animation.node),
                actor.playback().map(|playback| playback.source_time()),
            ) else {
                continue;
            };
            for &entity in actor.players() {
                if let Ok(mut player) = players.get_mut(entity) {
                    player.play(animation).repeat().set_speed(0.0).seek_to(start);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::actor::subclip::extract_subclip;
    use constants::animation_catalogue::ANIMATION_FRAME_RATE;

    fn ready_actor(app: &mut App, animation: &'static str, drifted: Transform) -> (Entity, Entity) {
        let owner = app.world_mut().spawn_empty().id();
        let model = app
            .world_mut()
            .spawn((drifted, ActorModel { owner }))
            .id();
        let mut actor = AnimatedActor::new(animation, Handle::default());
        actor.mark_ready(model, None);
        actor.start_playback();
        app.world_mut().entity_mut(owner).insert(actor);
        (owner, model)
    }

    #[test]
    fn advance_re_pins_a_drifted_model() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_systems(Update, advance_actors);
        let drifted = Transform::from_xyz(5.0, 5.0, 5.0).with_scale(Vec3::splat(2.0));
        let (_, model) = ready_actor(&mut app, "Stretch", drifted);

        app.update();

        let transform = app.world().get::<Transform>(model).unwrap();
        assert_eq!(transform.translation, Vec3::new(-2250.0, -450.0, 100.0));
        assert_eq!(transform.scale, Vec3::splat(1700.0));
    }

    #[test]
    fn next_animation_event_moves_to_the_new_placement() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<NextActorAnimation>()
            .add_systems(Update, cycle_actor_animation);
        let (owner, model) = ready_actor(&mut app, "IdleSit", Transform::default());

        app.world_mut().send_event(NextActorAnimation);
        app.update();

        let actor = app.world().get::<AnimatedActor>(owner).unwrap();
        assert_eq!(actor.current_animation(), "IdleLayDown");
        assert_eq!(
            actor.playback().map(|playback| playback.clip().clone()),
            extract_subclip("IdleLayDown", ANIMATION_FRAME_RATE)
        );
        let transform = app.world().get::<Transform>(model).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, 1220.0, 150.0));
    }
}
