/// Occlusion material for the overlay plane.
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{RenderPipelineDescriptor, SpecializedMeshPipelineError};
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};
use constants::path::OCCLUSION_SHADER_PATH;

/// Writes depth and fully transparent pixels without blending.
///
/// Anything behind the plane is replaced by a hole in the canvas, through
/// which the CSS layer beneath shows; anything in front still covers it.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone, Default)]
pub struct OcclusionMaterial {}

impl Material for OcclusionMaterial {
    fn fragment_shader() -> ShaderRef {
        OCCLUSION_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Opaque
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        descriptor.primitive.cull_mode = None;
        if let Some(fragment) = descriptor.fragment.as_mut() {
            for target in fragment.targets.iter_mut().flatten() {
                target.blend = None;
            }
        }
        Ok(())
    }
}
