/// Rigged actor model and the texture applied uniformly to its meshes.
pub const ACTOR_MODEL_PATH: &str = "models/Cat/scene.gltf";
pub const ACTOR_BASE_COLOR_TEXTURE_PATH: &str = "models/Cat/textures/Cat_Shorthair_baseColor.png";

/// Baked scene props loaded before the world is composed.
pub struct BaselineSource {
    pub name: &'static str,
    pub model_path: &'static str,
    pub texture_path: &'static str,
}

pub const BASELINE_SOURCES: &[BaselineSource] = &[
    BaselineSource {
        name: "computer_setup",
        model_path: "models/Computer/computer_setup.glb",
        texture_path: "models/Computer/baked_computer.jpg",
    },
    BaselineSource {
        name: "environment",
        model_path: "models/World/environment.glb",
        texture_path: "models/World/baked_environment.jpg",
    },
    BaselineSource {
        name: "decor",
        model_path: "models/Decor/decor.glb",
        texture_path: "models/Decor/baked_decor_modified.jpg",
    },
];

/// Fragment shader for the overlay occlusion plane.
pub const OCCLUSION_SHADER_PATH: &str = "shaders/occlusion.wgsl";
