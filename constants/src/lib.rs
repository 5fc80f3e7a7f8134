pub mod animation_catalogue;
pub mod camera;
pub mod model_catalogue;
pub mod overlay;
pub mod path;
pub mod quality;
