use bevy::image::{ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;

/// Where the base colour of a rewritten material comes from.
#[derive(Debug, Clone)]
pub enum UnlitTexture {
    /// Keep whatever texture the imported material carried.
    Preserve,
    /// Use one texture for every mesh, e.g. a baked lightmap.
    Replace(Handle<Image>),
}

pub fn unlit_material(base_color_texture: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

pub fn solid_unlit_material(color: [f32; 3]) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb(color[0], color[1], color[2]),
        unlit: true,
        ..default()
    }
}

/// Swaps every imported material under `root` for an unlit, double-sided one.
///
/// Returns the mesh entities that were rewritten.
pub fn rewrite_to_unlit(
    commands: &mut Commands,
    root: Entity,
    children: &Query<&Children>,
    mesh_materials: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
    texture: &UnlitTexture,
) -> Vec<Entity> {
    let mut rewritten = Vec::new();

    for entity in children.iter_descendants(root) {
        let Ok(imported) = mesh_materials.get(entity) else {
            continue;
        };

        let base_color_texture = match texture {
            UnlitTexture::Preserve => materials
                .get(&imported.0)
                .and_then(|material| material.base_color_texture.clone()),
            UnlitTexture::Replace(handle) => Some(handle.clone()),
        };

        let handle = materials.add(unlit_material(base_color_texture));
        commands.entity(entity).insert(MeshMaterial3d(handle));
        rewritten.push(entity);
    }

    rewritten
}

/// Anisotropic filtering for a texture, keeping its address modes.
pub fn apply_texture_quality(images: &mut Assets<Image>, texture: &Handle<Image>, anisotropy: u16) {
    let Some(image) = images.get_mut(texture) else {
        return;
    };

    let mut descriptor = match &image.sampler {
        ImageSampler::Descriptor(descriptor) => descriptor.clone(),
        ImageSampler::Default => ImageSamplerDescriptor::linear(),
    };
    descriptor.anisotropy_clamp = anisotropy.max(1);
    if descriptor.anisotropy_clamp > 1 {
        // Anisotropic sampling requires linear filtering throughout.
        descriptor.mag_filter = ImageFilterMode::Linear;
        descriptor.min_filter = ImageFilterMode::Linear;
        descriptor.mipmap_filter = ImageFilterMode::Linear;
    }
    image.sampler = ImageSampler::Descriptor(descriptor);
}

pub fn apply_shadow_policy(commands: &mut Commands, entity: Entity, shadows_enabled: bool) {
    let mut entity = commands.entity(entity);
    if shadows_enabled {
        entity.remove::<(NotShadowCaster, NotShadowReceiver)>();
    } else {
        entity.insert((NotShadowCaster, NotShadowReceiver));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlit_material_renders_both_faces() {
        let material = unlit_material(None);
        assert!(material.unlit);
        assert!(material.double_sided);
        assert_eq!(material.cull_mode, None);
    }

    #[test]
    fn texture_quality_keeps_address_modes() {
        use bevy::image::ImageAddressMode;

        let mut images = Assets::<Image>::default();
        let mut image = Image::default();
        image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::Repeat,
            ..ImageSamplerDescriptor::nearest()
        });
        let handle = images.add(image);

        apply_texture_quality(&mut images, &handle, 8);

        let Some(ImageSampler::Descriptor(descriptor)) = images.get(&handle).map(|i| &i.sampler) else {
            panic!("sampler descriptor expected");
        };
        assert_eq!(descriptor.anisotropy_clamp, 8);
        assert_eq!(descriptor.address_mode_u, ImageAddressMode::Repeat);
        assert_eq!(descriptor.min_filter, ImageFilterMode::Linear);
    }
}
