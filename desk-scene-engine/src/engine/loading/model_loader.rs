use std::collections::BTreeMap;

use bevy::asset::{DependencyLoadState, LoadState, RecursiveDependencyLoadState, UntypedAssetId};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::quality::DECOMPRESSION_MIN_GEOMETRY_DETAIL;

use crate::engine::loading::decompression::{DecompressionStage, SupercompressedTextureStage};
use crate::engine::loading::error::LoadError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::tracker::{LoadObservation, LoadSignal, LoadTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadId(u64);

/// Returned by [`ModelLoader::load`]; the only way to cancel a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelHandle(LoadId);

impl CancelHandle {
    pub fn id(&self) -> LoadId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    pub geometry_detail: f32,
    /// Feed this request into the shared [`LoadingProgress`] aggregate.
    pub report_progress: bool,
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Progress(f32),
    Loaded(Handle<Gltf>),
    Failed(LoadError),
}

#[derive(Event, Debug, Clone)]
pub struct ModelLoadEvent {
    pub id: LoadId,
    pub outcome: LoadOutcome,
}

/// The fetch primitive behind the loader.
pub trait AssetFetch {
    fn fetch_model(&self, path: &str) -> Handle<Gltf>;
}

impl AssetFetch for AssetServer {
    fn fetch_model(&self, path: &str) -> Handle<Gltf> {
        self.load(path.to_owned())
    }
}

struct TrackedLoad {
    /// Path asked for by the caller; progress is reported under it.
    requested: String,
    /// Path currently being fetched.
    path: String,
    /// Set while an encoded twin is fetched; the plain asset is tried once if it fails.
    plain_fallback: bool,
    handle: Handle<Gltf>,
    tracker: LoadTracker,
    report_progress: bool,
}

/// Owns every in-flight model request.
///
/// Dropping a request drops its strong handle, so a cancelled asset is freed
/// once nothing else holds it.
#[derive(Resource, Default)]
pub struct ModelLoader {
    next_id: u64,
    requests: BTreeMap<LoadId, TrackedLoad>,
    decompression: Option<Box<dyn DecompressionStage>>,
}

impl ModelLoader {
    pub fn with_decompression(stage: impl DecompressionStage) -> Self {
        Self {
            decompression: Some(Box::new(stage)),
            ..default()
        }
    }

    pub fn load<F: AssetFetch + ?Sized>(
        &mut self,
        fetch: &F,
        path: &str,
        options: LoadOptions,
    ) -> CancelHandle {
        let id = LoadId(self.next_id);
        self.next_id += 1;

        let source = self.resolve_source(path, &options);
        debug!("Requesting {} as load {:?}", source, id);

        self.requests.insert(
            id,
            TrackedLoad {
                handle: fetch.fetch_model(&source),
                requested: path.to_owned(),
                plain_fallback: source != path,
                path: source,
                tracker: LoadTracker::default(),
                report_progress: options.report_progress,
            },
        );
        CancelHandle(id)
    }

    /// Forgets the request; returns false if it had already settled.
    pub fn cancel(&mut self, handle: CancelHandle) -> bool {
        self.requests.remove(&handle.id()).is_some()
    }

    pub fn in_flight(&self) -> usize {
        self.requests.len()
    }

    /// The path actually fetched for `path` under `options`.
    pub fn resolve_source(&self, path: &str, options: &LoadOptions) -> String {
        let decoded = self
            .decompression
            .as_ref()
            .filter(|_| options.geometry_detail > DECOMPRESSION_MIN_GEOMETRY_DETAIL)
            .and_then(|stage| {
                stage.encoded_source(path).inspect(|source| {
                    debug!("{} stage serves {} from {}", stage.name(), path, source);
                })
            });
        decoded.unwrap_or_else(|| path.to_owned())
    }

    /// Runs `observe` over every request and turns the answers into events.
    ///
    /// A failed encoded twin is re-fetched from the plain path through `fetch`
    /// instead of failing the request. Settled requests are dropped after
    /// their terminal event.
    pub fn collect_events<F: AssetFetch + ?Sized>(
        &mut self,
        fetch: &F,
        progress: &mut LoadingProgress,
        observe: impl Fn(&Handle<Gltf>, &str) -> LoadObservation,
    ) -> Vec<ModelLoadEvent> {
        let mut events = Vec::new();

        for (&id, request) in self.requests.iter_mut() {
            let observation = observe(&request.handle, &request.path);
            for signal in request.tracker.observe(observation) {
                let outcome = match signal {
                    LoadSignal::Progress(fraction) => {
                        if request.report_progress {
                            progress.report(&request.requested, fraction);
                        }
                        LoadOutcome::Progress(fraction)
                    }
                    LoadSignal::Success => LoadOutcome::Loaded(request.handle.clone()),
                    LoadSignal::Error(error) if request.plain_fallback => {
                        warn!("{}, loading {} instead", error, request.requested);
                        request.plain_fallback = false;
                        request.path = request.requested.clone();
                        request.handle = fetch.fetch_model(&request.requested);
                        request.tracker.rearm();
                        continue;
                    }
                    LoadSignal::Error(error) => LoadOutcome::Failed(error),
                };
                events.push(ModelLoadEvent { id, outcome });
            }
        }

        self.requests.retain(|_, request| !request.tracker.is_settled());
        events
    }
}

/// Staged progress derived from the asset server's three load states.
pub fn observe_load_states(
    asset_server: &AssetServer,
    id: impl Into<UntypedAssetId>,
    path: &str,
) -> LoadObservation {
    let Some((own, direct, recursive)) = asset_server.get_load_states(id) else {
        return LoadObservation::Pending(0.0);
    };

    if let LoadState::Failed(error) = &own {
        return LoadObservation::Failed(LoadError::Asset {
            path: path.to_owned(),
            reason: error.to_string(),
        });
    }
    if let DependencyLoadState::Failed(error) = &direct {
        return LoadObservation::Failed(LoadError::Dependency {
            path: path.to_owned(),
            reason: error.to_string(),
        });
    }
    if let RecursiveDependencyLoadState::Failed(error) = &recursive {
        return LoadObservation::Failed(LoadError::Dependency {
            path: path.to_owned(),
            reason: error.to_string(),
        });
    }

    match (own, direct, recursive) {
        (LoadState::Loaded, _, RecursiveDependencyLoadState::Loaded) => LoadObservation::Ready,
        (LoadState::Loaded, DependencyLoadState::Loaded, _) => LoadObservation::Pending(0.75),
        (LoadState::Loaded, _, _) => LoadObservation::Pending(0.5),
        (LoadState::Loading, _, _) => LoadObservation::Pending(0.1),
        _ => LoadObservation::Pending(0.0),
    }
}

pub fn poll_model_loads(
    asset_server: Res<AssetServer>,
    mut loader: ResMut<ModelLoader>,
    mut progress: ResMut<LoadingProgress>,
    mut load_events: EventWriter<ModelLoadEvent>,
) {
    if loader.in_flight() == 0 {
        return;
    }

    let events = loader.collect_events(&*asset_server, &mut progress, |handle, path| {
        observe_load_states(&asset_server, handle.id(), path)
    });
    for event in events {
        if let LoadOutcome::Failed(error) = &event.outcome {
            warn!("Load {:?} failed: {}", event.id, error);
        }
        load_events.write(event);
    }
}

pub struct ModelLoadingPlugin;

impl Plugin for ModelLoadingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ModelLoader::with_decompression(
            SupercompressedTextureStage::from_catalogue(),
        ))
        .init_resource::<LoadingProgress>()
        .add_event::<ModelLoadEvent>()
        .add_systems(PreUpdate, poll_model_loads);
    }
}
