pub mod actor;
pub mod camera;
pub mod core;
pub mod loading;
pub mod overlay;
pub mod presenter;
pub mod quality;
pub mod scene;
pub mod shaders;
pub mod systems;
