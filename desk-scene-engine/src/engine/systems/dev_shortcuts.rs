use bevy::prelude::*;

use crate::engine::actor::systems::NextActorAnimation;
use crate::engine::presenter::systems::ChangeModelVariant;

/// Native-only keys: `N` advances the actor animation, `G` swaps the model.
pub fn handle_dev_shortcuts(
    #[cfg(not(target_arch = "wasm32"))] keyboard: Res<ButtonInput<KeyCode>>,
    mut next_animation: EventWriter<NextActorAnimation>,
    mut change_variant: EventWriter<ChangeModelVariant>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if keyboard.just_pressed(KeyCode::KeyN) {
            info!("Shortcut: next actor animation");
            next_animation.write(NextActorAnimation);
        }

        if keyboard.just_pressed(KeyCode::KeyG) {
            info!("Shortcut: swap decorative model");
            change_variant.write(ChangeModelVariant::random());
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = (&mut next_animation, &mut change_variant);
    }
}
