use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use bevy::render::camera::ClearColorConfig;
use constants::camera::{
    CAMERA_EASING_RATE, CAMERA_FAR, CAMERA_NEAR, DESK_EYE, DESK_TARGET, MONITOR_EYE,
    MONITOR_TARGET,
};

use crate::engine::overlay::handoff::CameraRigSignal;

#[derive(Component)]
pub struct DeskCamera;

#[derive(Resource)]
pub struct DeskCameraRig {
    pub desk_pose: Transform,
    pub monitor_pose: Transform,
    pub focused: bool,
    pub easing_rate: f32,
}

impl Default for DeskCameraRig {
    fn default() -> Self {
        Self {
            desk_pose: Transform::from_translation(Vec3::from_array(DESK_EYE))
                .looking_at(Vec3::from_array(DESK_TARGET), Vec3::Y),
            monitor_pose: Transform::from_translation(Vec3::from_array(MONITOR_EYE))
                .looking_at(Vec3::from_array(MONITOR_TARGET), Vec3::Y),
            focused: false,
            easing_rate: CAMERA_EASING_RATE,
        }
    }
}

impl DeskCameraRig {
    pub fn target_pose(&self) -> Transform {
        if self.focused {
            self.monitor_pose
        } else {
            self.desk_pose
        }
    }
}

pub struct DeskCameraPlugin;

impl Plugin for DeskCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DeskCameraRig>()
            .add_systems(Startup, spawn_desk_camera)
            .add_systems(Update, (follow_rig_signals, ease_desk_camera).chain());
    }
}

pub fn spawn_desk_camera(mut commands: Commands, rig: Res<DeskCameraRig>) {
    commands.spawn((
        Name::new("DeskCamera"),
        DeskCamera,
        Camera3d::default(),
        desk_camera_settings(),
        Projection::Perspective(PerspectiveProjection {
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        rig.desk_pose,
    ));
}

fn desk_camera_settings() -> Camera {
    #[cfg(target_arch = "wasm32")]
    {
        // Transparent where nothing is drawn so the CSS layer is visible.
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Camera::default()
    }
}

pub fn follow_rig_signals(mut signals: EventReader<CameraRigSignal>, mut rig: ResMut<DeskCameraRig>) {
    for signal in signals.read() {
        rig.focused = matches!(signal, CameraRigSignal::EnterMonitor);
    }
}

/// Exponential approach towards the current target pose.
pub fn ease_desk_camera(
    time: Res<Time>,
    rig: Res<DeskCameraRig>,
    mut cameras: Query<&mut Transform, With<DeskCamera>>,
) {
    let target = rig.target_pose();
    let blend = 1.0 - (-rig.easing_rate * time.delta_secs()).exp();

    for mut transform in &mut cameras {
        transform.translation = transform.translation.lerp(target.translation, blend);
        transform.rotation = transform.rotation.slerp(target.rotation, blend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_toggle_the_target_pose() {
        let mut app = App::new();
        app.add_event::<CameraRigSignal>()
            .init_resource::<DeskCameraRig>()
            .add_systems(Update, follow_rig_signals);

        app.world_mut().send_event(CameraRigSignal::EnterMonitor);
        app.update();
        let rig = app.world().resource::<DeskCameraRig>();
        assert!(rig.focused);
        assert_eq!(rig.target_pose(), rig.monitor_pose);

        app.world_mut().send_event(CameraRigSignal::LeftMonitor);
        app.update();
        assert!(!app.world().resource::<DeskCameraRig>().focused);
    }
}
