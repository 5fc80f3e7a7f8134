use bevy::prelude::*;
use bevy::window::PresentMode;

#[cfg(target_arch = "wasm32")]
use bevy::window::CompositeAlphaMode;
#[cfg(target_arch = "wasm32")]
use constants::overlay::CANVAS_SELECTOR;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        // The CSS layer holding the embedded document sits behind the canvas and
        // shows through wherever the occlusion plane clears to transparent.
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            transparent: true,
            composite_alpha_mode: CompositeAlphaMode::PreMultiplied,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Desk Scene".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
