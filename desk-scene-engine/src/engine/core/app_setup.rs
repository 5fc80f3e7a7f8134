use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;

use crate::engine::actor::systems::ActorPlugin;
use crate::engine::camera::desk_camera::DeskCameraPlugin;
use crate::engine::core::app_state::AppState;
use crate::engine::core::runtime_config::RuntimeConfig;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::baseline::BaselineAssets;
use crate::engine::loading::model_loader::ModelLoadingPlugin;
use crate::engine::overlay::surface::OverlayPlugin;
use crate::engine::presenter::systems::PresenterPlugin;
use crate::engine::quality::sampling::QualityPlugin;
use crate::engine::scene::composer::SceneComposerPlugin;
use crate::engine::systems::dev_shortcuts::handle_dev_shortcuts;
use crate::rpc::surface_bridge::SurfaceBridgePlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    let config = RuntimeConfig::from_environment();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .insert_resource(config)
        .init_resource::<BaselineAssets>();

    // Quality is classified before anything reads the profile.
    app.add_plugins(QualityPlugin)
        .add_plugins(ModelLoadingPlugin)
        .add_plugins(SurfaceBridgePlugin)
        .add_plugins(OverlayPlugin)
        .add_plugins(DeskCameraPlugin)
        .add_plugins(PresenterPlugin)
        .add_plugins(ActorPlugin)
        .add_plugins(SceneComposerPlugin);

    app.add_systems(
        Update,
        handle_dev_shortcuts.run_if(in_state(AppState::Running)),
    );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
