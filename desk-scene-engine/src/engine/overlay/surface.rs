use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;

use crate::engine::camera::desk_camera::DeskCamera;
use crate::engine::overlay::css3d::{CssLayerStyles, layer_styles};
use crate::engine::overlay::handoff::{CameraHandoff, CameraRigSignal};
use crate::engine::overlay::placement::OverlayPlacement;
use crate::engine::shaders::OcclusionMaterial;
use crate::rpc::surface_bridge::{EventOrigin, SurfaceEvent, SurfaceEventKind};

#[cfg(target_arch = "wasm32")]
use crate::engine::overlay::dom::OverlayDom;

/// The occlusion plane standing in for the monitor surface.
#[derive(Component, Debug, Clone, Copy)]
pub struct OverlaySurface {
    pub placement: OverlayPlacement,
}

/// Last styles pushed to the CSS layer.
#[derive(Resource, Debug, Default)]
pub struct OverlayLayerState {
    pub styles: Option<CssLayerStyles>,
    pub mounted: bool,
}

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<OcclusionMaterial>::default())
            .init_resource::<CameraHandoff>()
            .init_resource::<OverlayLayerState>()
            .add_event::<CameraRigSignal>();
    }
}

pub fn create_overlay(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<OcclusionMaterial>>,
) {
    let placement = OverlayPlacement::monitor();

    commands.spawn((
        Name::new("MonitorOverlay"),
        OverlaySurface { placement },
        Mesh3d(meshes.add(Rectangle::new(placement.size.x, placement.size.y))),
        MeshMaterial3d(materials.add(OcclusionMaterial::default())),
        placement.transform(),
        NotShadowCaster,
        NotShadowReceiver,
    ));
    info!(
        "Monitor overlay placed at {:?} ({}x{})",
        placement.position, placement.size.x, placement.size.y
    );
}

#[cfg(target_arch = "wasm32")]
pub fn mount_overlay_dom(world: &mut World) {
    use crate::engine::core::runtime_config::RuntimeConfig;
    use crate::rpc::surface_bridge::SurfaceEventQueue;

    let placement = OverlayPlacement::monitor();
    let config = world
        .get_resource::<RuntimeConfig>()
        .copied()
        .unwrap_or_default();
    let queue = world
        .get_resource::<SurfaceEventQueue>()
        .cloned()
        .unwrap_or_default();

    match crate::engine::overlay::dom::build_overlay_dom(&placement, &config, &queue) {
        Ok(dom) => {
            world.insert_non_send_resource(dom);
            world.resource_mut::<OverlayLayerState>().mounted = true;
            info!("Overlay layer mounted ({})", config.embedded_document_url());
        }
        Err(err) => error!("Failed to build overlay layer: {:?}", err),
    }
}

/// Keeps the plane on its placement so the CSS object and the hole match.
pub fn enforce_overlay_lockstep(mut surfaces: Query<(&OverlaySurface, &mut Transform)>) {
    for (surface, mut transform) in &mut surfaces {
        let expected = surface.placement.transform();
        if *transform != expected {
            warn!("Overlay plane moved off its placement, restoring");
            *transform = expected;
        }
    }
}

/// Recomputes the CSS transforms from the camera and plane each frame.
pub fn sync_overlay_layer(
    cameras: Query<(&Camera, &GlobalTransform), With<DeskCamera>>,
    surfaces: Query<&GlobalTransform, With<OverlaySurface>>,
    mut state: ResMut<OverlayLayerState>,
    #[cfg(target_arch = "wasm32")] dom: Option<NonSend<OverlayDom>>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(surface_transform) = surfaces.single() else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_size() else {
        return;
    };

    let styles = layer_styles(
        &camera_transform.compute_matrix(),
        &camera.clip_from_view(),
        viewport,
        &surface_transform.compute_matrix(),
    );
    if state.styles.as_ref() == Some(&styles) {
        return;
    }

    #[cfg(target_arch = "wasm32")]
    if let Some(dom) = dom {
        if let Err(err) = dom.apply(&styles) {
            error!("Failed to update overlay layer: {:?}", err);
            return;
        }
    }
    state.styles = Some(styles);
}

/// Turns pointer activity on either side of the boundary into rig signals.
pub fn drive_camera_handoff(
    mut surface_events: EventReader<SurfaceEvent>,
    mut handoff: ResMut<CameraHandoff>,
    mut signals: EventWriter<CameraRigSignal>,
) {
    for event in surface_events.read() {
        let signal = match &event.kind {
            SurfaceEventKind::PointerMove { .. } => {
                handoff.pointer_moved(event.origin == EventOrigin::EmbeddedSurface)
            }
            SurfaceEventKind::PointerDown => {
                handoff.button_pressed();
                None
            }
            SurfaceEventKind::PointerUp => handoff.button_released(),
            SurfaceEventKind::KeyDown { key } | SurfaceEventKind::KeyUp { key } => {
                debug!("Key '{}' from {:?}", key, event.origin);
                None
            }
        };

        if let Some(signal) = signal {
            debug!("Camera rig signal: {:?}", signal);
            signals.write(signal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_signals(app: &mut App) -> Vec<CameraRigSignal> {
        let events = app.world().resource::<Events<CameraRigSignal>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).copied().collect()
    }

    fn moved(origin: EventOrigin) -> SurfaceEvent {
        SurfaceEvent {
            origin,
            kind: SurfaceEventKind::PointerMove { position: Vec2::ZERO },
        }
    }

    #[test]
    fn drag_off_the_monitor_leaves_on_release() {
        let mut app = App::new();
        app.add_event::<SurfaceEvent>()
            .add_event::<CameraRigSignal>()
            .init_resource::<CameraHandoff>()
            .add_systems(Update, drive_camera_handoff);

        app.world_mut().send_event(moved(EventOrigin::EmbeddedSurface));
        app.update();
        assert_eq!(collect_signals(&mut app), vec![CameraRigSignal::EnterMonitor]);

        app.world_mut()
            .send_event(SurfaceEvent::host(SurfaceEventKind::PointerDown));
        app.world_mut().send_event(moved(EventOrigin::Host));
        app.update();
        assert!(app.world().resource::<CameraHandoff>().leave_deferred());

        app.world_mut()
            .send_event(SurfaceEvent::host(SurfaceEventKind::PointerUp));
        app.update();
        assert_eq!(collect_signals(&mut app), vec![CameraRigSignal::LeftMonitor]);
    }

    #[test]
    fn displaced_plane_is_restored() {
        let mut app = App::new();
        app.add_systems(Update, enforce_overlay_lockstep);

        let placement = OverlayPlacement::monitor();
        let plane = app
            .world_mut()
            .spawn((
                OverlaySurface { placement },
                Transform::from_xyz(1.0, 2.0, 3.0),
            ))
            .id();
        app.update();

        assert_eq!(
            *app.world().entity(plane).get::<Transform>().unwrap(),
            placement.transform()
        );
    }
}
