use bevy::prelude::*;

use crate::engine::quality::tier::QualityProfile;

/// Drops vertex attributes the current quality does not need.
///
/// Returns how many attributes were removed.
pub fn strip_vertex_attributes(mesh: &mut Mesh, profile: &QualityProfile) -> usize {
    let mut stripped = Vec::new();

    if profile.strip_auxiliary_attributes() {
        stripped.push(Mesh::ATTRIBUTE_TANGENT);
        stripped.push(Mesh::ATTRIBUTE_UV_1);
    }
    if profile.strip_normals() {
        stripped.push(Mesh::ATTRIBUTE_NORMAL);
    }

    stripped
        .into_iter()
        .filter(|attribute| mesh.remove_attribute(attribute.id).is_some())
        .count()
}
