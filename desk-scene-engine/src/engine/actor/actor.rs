use bevy::animation::graph::AnimationNodeIndex;
use bevy::prelude::*;
use constants::animation_catalogue::{ANIMATION_FRAME_RATE, ANIMATION_ORDER, AnimationSettings};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::actor::subclip::{SubclipPlayback, extract_subclip};
use crate::engine::loading::model_loader::CancelHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    Unloaded,
    Loading,
    Failed,
    Ready,
}

/// The baked track bound to the spawned model.
#[derive(Debug, Clone)]
pub struct ActorAnimation {
    pub graph: Handle<AnimationGraph>,
    pub node: AnimationNodeIndex,
}

#[derive(Component)]
pub struct AnimatedActor {
    state: ActorState,
    current: &'static str,
    pub(crate) load: Option<CancelHandle>,
    pub(crate) placeholder: Option<Entity>,
    pub(crate) model: Option<Entity>,
    pub(crate) texture: Handle<Image>,
    animation: Option<ActorAnimation>,
    players: Vec<Entity>,
    playback: Option<SubclipPlayback>,
}

impl AnimatedActor {
    pub fn new(current: &'static str, texture: Handle<Image>) -> Self {
        Self {
            state: ActorState::Unloaded,
            current,
            load: None,
            placeholder: None,
            model: None,
            texture,
            animation: None,
            players: Vec::new(),
            playback: None,
        }
    }

    /// Uniform pick, used once when the actor is constructed.
    pub fn select_animation<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
        ANIMATION_ORDER.choose(rng).copied().unwrap_or("IdleSit")
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn current_animation(&self) -> &'static str {
        self.current
    }

    pub fn model(&self) -> Option<Entity> {
        self.model
    }

    pub fn players(&self) -> &[Entity] {
        &self.players
    }

    pub fn animation(&self) -> Option<&ActorAnimation> {
        self.animation.as_ref()
    }

    pub fn playback(&self) -> Option<&SubclipPlayback> {
        self.playback.as_ref()
    }

    pub fn begin_loading(&mut self, load: CancelHandle) {
        self.load = Some(load);
        self.state = ActorState::Loading;
    }

    pub fn mark_failed(&mut self) {
        self.load = None;
        self.state = ActorState::Failed;
    }

    pub fn mark_ready(&mut self, model: Entity, animation: Option<ActorAnimation>) {
        self.load = None;
        self.model = Some(model);
        self.animation = animation;
        self.state = ActorState::Ready;
    }

    pub fn bind_players(&mut self, players: Vec<Entity>) {
        self.players = players;
    }

    /// (Re)starts the sub-clip of the current animation from its first frame.
    ///
    /// Returns false and leaves playback stopped when no frame range is catalogued.
    pub fn start_playback(&mut self) -> bool {
        match extract_subclip(self.current, ANIMATION_FRAME_RATE) {
            Some(clip) => {
                self.playback = Some(SubclipPlayback::new(clip));
                true
            }
            None => {
                warn!("No frame range for animation {}", self.current);
                self.playback = None;
                false
            }
        }
    }

    /// Steps the sub-clip; yields the baked track time to sample.
    pub fn advance(&mut self, delta: f32) -> Option<f32> {
        self.playback
            .as_mut()
            .map(|playback| playback.advance(delta))
    }

    /// Moves to the next animation in catalogue order and restarts playback.
    pub fn next_animation(&mut self) -> &'static str {
        let index = ANIMATION_ORDER
            .iter()
            .position(|name| *name == self.current)
            .map_or(0, |index| (index + 1) % ANIMATION_ORDER.len());
        self.current = ANIMATION_ORDER[index];
        self.start_playback();
        self.current
    }
}

fn euler(rotation: [f32; 3]) -> Quat {
    let [x, y, z] = rotation;
    Quat::from_euler(EulerRot::XYZ, x, y, z)
}

/// Full placement for an animation, applied when it starts.
pub fn placement_transform(settings: &AnimationSettings) -> Transform {
    Transform {
        translation: Vec3::from_array(settings.position),
        rotation: euler(settings.rotation),
        scale: Vec3::splat(settings.scale),
    }
}

/// Per-frame re-pin: undoes any drift the animation introduced.
pub fn pin_transform(settings: &AnimationSettings, transform: &mut Transform) {
    transform.translation = Vec3::from_array(settings.position);
    transform.scale = Vec3::splat(settings.scale);
    if let Some(rotation) = settings.rotation_override {
        transform.rotation = euler(rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::animation_catalogue::find_settings;

    #[test]
    fn next_animation_cycles_in_catalogue_order() {
        let mut actor = AnimatedActor::new("IdleSit", Handle::default());
        assert_eq!(actor.next_animation(), "IdleLayDown");

        let mut actor = AnimatedActor::new("Stretch", Handle::default());
        assert_eq!(actor.next_animation(), "IdleSit");
        let playback = actor.playback().unwrap();
        assert_eq!(playback.clip().name, "IdleSit");
        assert_eq!(playback.source_time(), 10.0);
    }

    #[test]
    fn unknown_animation_does_not_start_playback() {
        let mut actor = AnimatedActor::new("Backflip", Handle::default());
        assert!(!actor.start_playback());
        assert_eq!(actor.advance(0.1), None);
    }

    #[test]
    fn pin_restores_position_and_scale() {
        let settings = find_settings("IdleSit").unwrap();
        let mut transform = placement_transform(settings);
        let authored_rotation = transform.rotation;
        transform.translation += Vec3::new(12.0, -3.0, 40.0);
        transform.scale = Vec3::ONE;
        transform.rotation = Quat::IDENTITY;

        pin_transform(settings, &mut transform);

        assert_eq!(transform.translation, Vec3::new(-1600.0, -100.0, 0.0));
        assert_eq!(transform.scale, Vec3::splat(1700.0));
        // No override for sitting: rotation is left to the animation.
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_ne!(transform.rotation, authored_rotation);
    }

    #[test]
    fn lying_animations_force_their_rotation() {
        let settings = find_settings("IdleSleep").unwrap();
        let mut transform = Transform::default();
        pin_transform(settings, &mut transform);
        let expected = euler(settings.rotation_override.unwrap());
        assert!(transform.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn state_machine_reaches_ready_with_the_current_animation() {
        let mut actor = AnimatedActor::new("LickPaw", Handle::default());
        assert_eq!(actor.state(), ActorState::Unloaded);
        actor.mark_ready(Entity::from_raw(3), None);
        assert_eq!(actor.state(), ActorState::Ready);
        assert_eq!(actor.current_animation(), "LickPaw");
    }
}
