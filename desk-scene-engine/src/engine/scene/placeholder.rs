use bevy::prelude::*;

use crate::engine::scene::materials::solid_unlit_material;

/// Solid cube marking where a model will appear.
#[derive(Component)]
pub struct ReferenceCube;

pub fn spawn_reference_cube(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    label: &'static str,
    size: f32,
    position: [f32; 3],
    color: [f32; 3],
) -> Entity {
    commands
        .spawn((
            Name::new(label),
            ReferenceCube,
            Mesh3d(meshes.add(Cuboid::from_length(size))),
            MeshMaterial3d(materials.add(solid_unlit_material(color))),
            Transform::from_translation(Vec3::from_array(position)),
        ))
        .id()
}
