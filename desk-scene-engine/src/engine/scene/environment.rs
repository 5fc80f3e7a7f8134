use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::loading::baseline::{BaselineAssets, BaselineState};
use crate::engine::scene::materials::{UnlitTexture, rewrite_to_unlit};

/// Root of a baked prop and the lightmap its meshes are drawn with.
#[derive(Component)]
pub struct BakedProp {
    pub texture: Handle<Image>,
}

pub fn spawn_baseline_props(
    mut commands: Commands,
    baseline: Res<BaselineAssets>,
    gltfs: Res<Assets<bevy::gltf::Gltf>>,
) {
    for prop in &baseline.props {
        if prop.state != BaselineState::Ready {
            warn!("Composing without {}", prop.name);
            continue;
        }
        let Some(scene) = gltfs
            .get(&prop.model)
            .and_then(|gltf| gltf.default_scene.clone().or_else(|| gltf.scenes.first().cloned()))
        else {
            warn!("{} has no scene, composing without it", prop.name);
            continue;
        };

        commands
            .spawn((
                Name::new(prop.name),
                SceneRoot(scene),
                Transform::IDENTITY,
                BakedProp {
                    texture: prop.texture.clone(),
                },
            ))
            .observe(apply_baked_texture);
    }
}

fn apply_baked_texture(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    props: Query<&BakedProp>,
    children: Query<&Children>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let root = trigger.target();
    let Ok(prop) = props.get(root) else {
        return;
    };

    let rewritten = rewrite_to_unlit(
        &mut commands,
        root,
        &children,
        &mesh_materials,
        &mut materials,
        &UnlitTexture::Replace(prop.texture.clone()),
    );
    debug!("Baked texture applied to {} meshes", rewritten.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::baseline::BaselineProp;

    #[test]
    fn failed_and_unloaded_props_are_skipped() {
        let mut app = App::new();
        app.init_resource::<Assets<bevy::gltf::Gltf>>()
            .insert_resource(BaselineAssets {
                props: vec![
                    BaselineProp {
                        name: "decor",
                        model: Handle::default(),
                        texture: Handle::default(),
                        state: BaselineState::Failed,
                    },
                    BaselineProp {
                        name: "environment",
                        model: Handle::default(),
                        texture: Handle::default(),
                        state: BaselineState::Ready,
                    },
                ],
            })
            .add_systems(Update, spawn_baseline_props);
        app.update();

        let mut props = app.world_mut().query::<&BakedProp>();
        assert_eq!(props.iter(app.world()).count(), 0);
    }
}
