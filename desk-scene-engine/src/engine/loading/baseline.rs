use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::path::BASELINE_SOURCES;

use crate::engine::loading::model_loader::observe_load_states;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::tracker::LoadObservation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineState {
    Loading,
    Ready,
    Failed,
}

pub struct BaselineProp {
    pub name: &'static str,
    pub model: Handle<Gltf>,
    pub texture: Handle<Image>,
    pub state: BaselineState,
}

/// Baked props the scene is composed from.
#[derive(Resource, Default)]
pub struct BaselineAssets {
    pub props: Vec<BaselineProp>,
}

impl BaselineAssets {
    pub fn settled(&self) -> bool {
        self.props
            .iter()
            .all(|prop| prop.state != BaselineState::Loading)
    }
}

pub fn start_loading(mut baseline: ResMut<BaselineAssets>, asset_server: Res<AssetServer>) {
    println!("=== DESK SCENE: loading {} baseline props ===", BASELINE_SOURCES.len());

    baseline.props = BASELINE_SOURCES
        .iter()
        .map(|source| BaselineProp {
            name: source.name,
            model: asset_server.load(source.model_path),
            texture: asset_server.load(source.texture_path),
            state: BaselineState::Loading,
        })
        .collect();
}

/// Folds model and texture state into one state per prop.
fn combine(model: LoadObservation, texture: LoadObservation) -> (BaselineState, f32) {
    match (model, texture) {
        (LoadObservation::Failed(error), _) | (_, LoadObservation::Failed(error)) => {
            warn!("Baseline prop skipped: {}", error);
            (BaselineState::Failed, 1.0)
        }
        (LoadObservation::Ready, LoadObservation::Ready) => (BaselineState::Ready, 1.0),
        (LoadObservation::Ready, LoadObservation::Pending(texture)) => {
            (BaselineState::Loading, (1.0 + texture) / 2.0)
        }
        (LoadObservation::Pending(model), LoadObservation::Ready) => {
            (BaselineState::Loading, (model + 1.0) / 2.0)
        }
        (LoadObservation::Pending(model), LoadObservation::Pending(texture)) => {
            (BaselineState::Loading, (model + texture) / 2.0)
        }
    }
}

pub fn check_baseline_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    mut baseline: ResMut<BaselineAssets>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.baseline_loaded {
        return;
    }

    for prop in baseline
        .props
        .iter_mut()
        .filter(|prop| prop.state == BaselineState::Loading)
    {
        let model = observe_load_states(&asset_server, prop.model.id(), prop.name);
        let texture = observe_load_states(&asset_server, prop.texture.id(), prop.name);
        let (state, fraction) = combine(model, texture);

        loading_progress.report(prop.name, fraction);
        prop.state = state;
        if state == BaselineState::Ready {
            info!("✓ Baseline prop {} loaded", prop.name);
        }
    }

    if baseline.settled() {
        loading_progress.baseline_loaded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::error::LoadError;

    #[test]
    fn a_failed_half_settles_the_prop() {
        let failed = LoadObservation::Failed(LoadError::Asset {
            path: "decor".into(),
            reason: "404".into(),
        });
        assert_eq!(
            combine(LoadObservation::Ready, failed),
            (BaselineState::Failed, 1.0)
        );
    }

    #[test]
    fn both_halves_contribute_to_progress() {
        assert_eq!(
            combine(LoadObservation::Ready, LoadObservation::Pending(0.5)),
            (BaselineState::Loading, 0.75)
        );
        assert_eq!(
            combine(LoadObservation::Ready, LoadObservation::Ready),
            (BaselineState::Ready, 1.0)
        );
    }

    #[test]
    fn empty_baseline_is_settled() {
        assert!(BaselineAssets::default().settled());
    }
}
