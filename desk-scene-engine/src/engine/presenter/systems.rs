use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::model_catalogue::{
    PLACEHOLDER_COLOR, PLACEHOLDER_POSITION, PLACEHOLDER_SIZE, VARIANT_ROTATION_INTERVAL_SECS,
    find_variant,
};

use crate::engine::loading::error::LoadError;
use crate::engine::loading::model_loader::{ModelLoadEvent, ModelLoader};
use crate::engine::presenter::catalogue::{ModelVariant, select_variant, variant_transform};
use crate::engine::presenter::presenter::{ModelPresenter, PresentedModel, Resolution, load_and_present};
use crate::engine::presenter::residency::SceneResidency;
use crate::engine::quality::monitor::QualityMonitor;
use crate::engine::quality::sampling::QualityTierChanged;
use crate::engine::quality::tier::QualityProfile;
use crate::engine::scene::geometry::strip_vertex_attributes;
use crate::engine::scene::materials::{
    UnlitTexture, apply_shadow_policy, apply_texture_quality, rewrite_to_unlit,
};
use crate::engine::scene::placeholder::spawn_reference_cube;

/// Request to swap the presented variant.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeModelVariant {
    pub random: bool,
    /// Catalogue id used when `random` is false.
    pub explicit: Option<&'static str>,
}

impl ChangeModelVariant {
    pub fn random() -> Self {
        Self {
            random: true,
            explicit: None,
        }
    }
}

/// Root of a presented model and the profile its look was derived from.
#[derive(Component)]
pub struct PresentedVariant {
    pub profile: QualityProfile,
}

#[derive(Resource)]
pub struct VariantRotation(pub Timer);

impl Default for VariantRotation {
    fn default() -> Self {
        Self(Timer::from_seconds(
            VARIANT_ROTATION_INTERVAL_SECS,
            TimerMode::Repeating,
        ))
    }
}

pub struct PresenterPlugin;

impl Plugin for PresenterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneResidency>()
            .init_resource::<VariantRotation>()
            .add_event::<ChangeModelVariant>();
    }
}

fn spawn_presenter_placeholder(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    spawn_reference_cube(
        commands,
        meshes,
        materials,
        "ModelPresenterPlaceholder",
        PLACEHOLDER_SIZE,
        PLACEHOLDER_POSITION,
        PLACEHOLDER_COLOR,
    )
}

pub fn spawn_model_presenter(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    monitor: Res<QualityMonitor>,
    residency: Res<SceneResidency>,
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
) {
    let profile = monitor.profile();
    let mut presenter = ModelPresenter::new(profile);
    presenter.set_placeholder(spawn_presenter_placeholder(
        &mut commands,
        &mut meshes,
        &mut materials,
    ));

    let variant = select_variant(&profile, &mut rand::thread_rng(), None);
    info!("Selected decorative model {}", variant.display_name);
    load_and_present(&mut presenter, variant, &residency, &mut loader, &*asset_server);

    commands.spawn((Name::new("ModelPresenter"), presenter));
}

pub fn resolve_presenter_loads(
    mut commands: Commands,
    mut load_events: EventReader<ModelLoadEvent>,
    mut presenters: Query<&mut ModelPresenter>,
    mut residency: ResMut<SceneResidency>,
    gltfs: Res<Assets<Gltf>>,
) {
    for event in load_events.read() {
        for mut presenter in &mut presenters {
            match presenter.resolve(event) {
                Resolution::Present { variant, gltf } => {
                    present_variant(&mut commands, &mut presenter, &mut residency, &gltfs, variant, gltf);
                }
                Resolution::Progress(fraction) => {
                    debug!("Decorative model {:.0}% loaded", fraction * 100.0);
                }
                Resolution::RetryWithFallback { failed } => {
                    warn!("{} failed to load, retrying with the fallback model", failed.display_name);
                }
                Resolution::GiveUp { failed } => {
                    error!("Fallback model {} failed to load, keeping the placeholder", failed.display_name);
                }
                Resolution::Ignored => {}
            }
        }
    }
}

fn present_variant(
    commands: &mut Commands,
    presenter: &mut ModelPresenter,
    residency: &mut SceneResidency,
    gltfs: &Assets<Gltf>,
    variant: ModelVariant,
    gltf: Handle<Gltf>,
) {
    let Some(scene) = gltfs
        .get(&gltf)
        .and_then(|loaded| loaded.default_scene.clone().or_else(|| loaded.scenes.first().cloned()))
    else {
        let error = LoadError::MissingScene { path: variant.path.to_owned() };
        match presenter.presentation_failed(variant) {
            Resolution::GiveUp { .. } => error!("{}, keeping the placeholder", error),
            _ => warn!("{}, retrying with the fallback model", error),
        }
        return;
    };

    if let Some(placeholder) = presenter.take_placeholder() {
        commands.entity(placeholder).despawn();
    }

    let profile = presenter.profile;
    let root = commands
        .spawn((
            Name::new(variant.display_name),
            SceneRoot(scene),
            variant_transform(variant, &profile),
            PresentedVariant { profile },
        ))
        .observe(prepare_presented_meshes)
        .id();

    residency.attach(root);
    presenter.mark_presented(root, variant, gltf);
    info!("Presented {}", variant.display_name);
}

/// Applies the presenter look once the scene has spawned its meshes.
fn prepare_presented_meshes(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    roots: Query<&PresentedVariant>,
    children: Query<&Children>,
    mesh_handles: Query<&Mesh3d>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let root = trigger.target();
    let Ok(presented) = roots.get(root) else {
        return;
    };
    let profile = presented.profile;

    let rewritten = rewrite_to_unlit(
        &mut commands,
        root,
        &children,
        &mesh_materials,
        &mut materials,
        &UnlitTexture::Preserve,
    );

    let anisotropy = profile.anisotropy_clamp();
    for entity in rewritten {
        if let Some(texture) = mesh_materials
            .get(entity)
            .ok()
            .and_then(|imported| materials.get(&imported.0))
            .and_then(|material| material.base_color_texture.clone())
        {
            apply_texture_quality(&mut images, &texture, anisotropy);
        }

        if let Some(mesh) = mesh_handles
            .get(entity)
            .ok()
            .and_then(|handle| meshes.get_mut(&handle.0))
        {
            strip_vertex_attributes(mesh, &profile);
        }

        apply_shadow_policy(&mut commands, entity, profile.shadows_enabled);
    }
}

/// Removes the presented model and every asset it was drawn with.
fn release_model_resources(
    commands: &mut Commands,
    released: PresentedModel,
    children: &Query<&Children>,
    mesh_handles: &Query<&Mesh3d>,
    mesh_materials: &Query<&MeshMaterial3d<StandardMaterial>>,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
) {
    let mut freed = 0usize;
    for entity in children.iter_descendants(released.root) {
        if let Ok(mesh) = mesh_handles.get(entity) {
            meshes.remove(&mesh.0);
        }
        let Ok(material) = mesh_materials.get(entity) else {
            continue;
        };
        let Some(material) = materials.remove(&material.0) else {
            continue;
        };
        freed += 1;
        for texture in [
            material.base_color_texture,
            material.emissive_texture,
            material.normal_map_texture,
            material.metallic_roughness_texture,
            material.occlusion_texture,
        ]
        .into_iter()
        .flatten()
        {
            images.remove(&texture);
        }
    }

    commands.entity(released.root).despawn();
    info!("Released {} ({} materials)", released.variant.display_name, freed);
}

pub fn handle_variant_changes(
    mut commands: Commands,
    mut requests: EventReader<ChangeModelVariant>,
    mut presenters: Query<&mut ModelPresenter>,
    mut residency: ResMut<SceneResidency>,
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
    children: Query<&Children>,
    mesh_handles: Query<&Mesh3d>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    for request in requests.read() {
        for mut presenter in &mut presenters {
            let current = presenter.current_variant().map(|variant| variant.id);
            let variant = match request.explicit.filter(|_| !request.random) {
                Some(id) => match find_variant(id) {
                    Some(variant) => variant,
                    None => {
                        warn!("Unknown model variant {id}, keeping {current:?}");
                        continue;
                    }
                },
                None => select_variant(&presenter.profile, &mut rand::thread_rng(), current),
            };

            if let Some(released) = presenter.release(&mut residency) {
                release_model_resources(
                    &mut commands,
                    released,
                    &children,
                    &mesh_handles,
                    &mesh_materials,
                    &mut meshes,
                    &mut materials,
                    &mut images,
                );
            }
            if presenter.placeholder().is_none() {
                let placeholder =
                    spawn_presenter_placeholder(&mut commands, &mut meshes, &mut materials);
                presenter.set_placeholder(placeholder);
            }

            load_and_present(&mut presenter, variant, &residency, &mut loader, &*asset_server);
        }
    }
}

pub fn drive_fallback_retries(
    time: Res<Time>,
    mut presenters: Query<&mut ModelPresenter>,
    residency: Res<SceneResidency>,
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
) {
    for mut presenter in &mut presenters {
        if let Some(fallback) = presenter.tick_retry(time.delta()) {
            load_and_present(&mut presenter, fallback, &residency, &mut loader, &*asset_server);
        }
    }
}

/// Re-applies scale and shadows to presented models in place.
pub fn apply_tier_to_presenters(
    mut commands: Commands,
    mut tier_events: EventReader<QualityTierChanged>,
    mut presenters: Query<&mut ModelPresenter>,
    mut roots: Query<(&mut Transform, &mut PresentedVariant)>,
    children: Query<&Children>,
    mesh_entities: Query<(), With<Mesh3d>>,
) {
    let Some(change) = tier_events.read().last() else {
        return;
    };

    for mut presenter in &mut presenters {
        presenter.profile = change.profile;
        let Some((root, variant)) = presenter
            .presented()
            .map(|presented| (presented.root, presented.variant))
        else {
            continue;
        };

        if let Ok((mut transform, mut presented)) = roots.get_mut(root) {
            transform.scale =
                Vec3::splat(variant.placement.base_scale * change.profile.uniform_scale_factor);
            presented.profile = change.profile;
        }

        for entity in children.iter_descendants(root) {
            if mesh_entities.contains(entity) {
                apply_shadow_policy(&mut commands, entity, change.profile.shadows_enabled);
            }
        }
    }
}

pub fn rotate_variants_periodically(
    time: Res<Time>,
    mut rotation: ResMut<VariantRotation>,
    mut requests: EventWriter<ChangeModelVariant>,
) {
    if rotation.0.tick(time.delta()).just_finished() {
        requests.write(ChangeModelVariant::random());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::presenter::presenter::PresenterStatus;
    use crate::engine::quality::tier::QualityTier;
    use crate::engine::scene::placeholder::ReferenceCube;

    #[test]
    fn tier_change_rescales_the_presented_root() {
        let mut app = App::new();
        app.add_event::<QualityTierChanged>()
            .add_systems(Update, apply_tier_to_presenters);

        let high = QualityTier::High.profile();
        let rx78 = find_variant("rx78").unwrap();
        let root = app
            .world_mut()
            .spawn((variant_transform(rx78, &high), PresentedVariant { profile: high }))
            .id();
        let mut presenter = ModelPresenter::new(high);
        presenter.mark_presented(root, rx78, Handle::default());
        let presenter = app.world_mut().spawn(presenter).id();

        let low = QualityTier::Low.profile();
        app.world_mut().send_event(QualityTierChanged {
            tier: QualityTier::Low,
            profile: low,
        });
        app.update();

        let transform = app.world().get::<Transform>(root).unwrap();
        assert!((transform.scale.x - 280.0).abs() < 1e-3);
        assert_eq!(
            app.world().get::<ModelPresenter>(presenter).unwrap().profile,
            low
        );
        assert_eq!(app.world().get::<PresentedVariant>(root).unwrap().profile, low);
    }

    #[test]
    fn variant_change_frees_the_presented_model() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Gltf>()
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_asset::<Image>()
            .init_resource::<SceneResidency>()
            .init_resource::<ModelLoader>()
            .add_event::<ChangeModelVariant>()
            .add_systems(Update, handle_variant_changes);

        let world = app.world_mut();
        let texture = world.resource_mut::<Assets<Image>>().add(Image::default());
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color_texture: Some(texture.clone()),
                ..default()
            });
        let mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Cuboid::from_length(1.0));
        let root = world
            .spawn(Transform::default())
            .with_children(|parent| {
                parent.spawn((Mesh3d(mesh.clone()), MeshMaterial3d(material.clone())));
            })
            .id();
        world.resource_mut::<SceneResidency>().attach(root);

        let mut presenter = ModelPresenter::new(QualityTier::High.profile());
        presenter.mark_presented(root, find_variant("rx78").unwrap(), Handle::default());
        let presenter = world.spawn(presenter).id();

        world.send_event(ChangeModelVariant {
            random: false,
            explicit: Some("gf"),
        });
        app.update();

        let world = app.world_mut();
        assert!(world.resource::<Assets<Mesh>>().get(&mesh).is_none());
        assert!(world.resource::<Assets<StandardMaterial>>().get(&material).is_none());
        assert!(world.resource::<Assets<Image>>().get(&texture).is_none());
        assert!(world.get_entity(root).is_err());
        assert_eq!(world.resource::<SceneResidency>().count(), 0);

        let mut cubes = world.query_filtered::<Entity, With<ReferenceCube>>();
        assert_eq!(cubes.iter(world).count(), 1);

        let presenter = world.get::<ModelPresenter>(presenter).unwrap();
        assert!(presenter.placeholder().is_some());
        assert!(presenter.presented().is_none());
        assert_eq!(presenter.current_variant().map(|variant| variant.id), Some("gf"));
        assert_eq!(presenter.status(), PresenterStatus::Loading);
    }
}
