use std::time::Duration;

use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::model_catalogue::{FALLBACK_RETRY_DELAY_SECS, FALLBACK_VARIANT_ID};

use crate::engine::loading::model_loader::{
    AssetFetch, CancelHandle, LoadOptions, LoadOutcome, ModelLoadEvent, ModelLoader,
};
use crate::engine::presenter::catalogue::{ModelVariant, fallback_variant};
use crate::engine::presenter::residency::SceneResidency;
use crate::engine::quality::tier::QualityProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterStatus {
    Idle,
    Loading,
    Presented,
    /// The admission limit refused the last request.
    Rejected,
    /// The fallback variant failed too; the placeholder stays.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted { token: u64 },
    Rejected { resident: usize, limit: u32 },
}

/// What a load event means for the presenter that owns it.
#[derive(Debug, Clone)]
pub enum Resolution {
    Present {
        variant: ModelVariant,
        gltf: Handle<Gltf>,
    },
    Progress(f32),
    RetryWithFallback {
        failed: ModelVariant,
    },
    GiveUp {
        failed: ModelVariant,
    },
    /// Not ours, or superseded by a newer request.
    Ignored,
}

struct ActiveLoad {
    token: u64,
    handle: CancelHandle,
    variant: ModelVariant,
}

struct PendingRetry {
    token: u64,
    timer: Timer,
}

pub struct PresentedModel {
    pub root: Entity,
    pub variant: ModelVariant,
    pub gltf: Handle<Gltf>,
}

/// Decorative model slot: at most one request in flight, at most one model shown.
#[derive(Component)]
pub struct ModelPresenter {
    pub profile: QualityProfile,
    token: u64,
    status: PresenterStatus,
    current_variant: Option<ModelVariant>,
    active: Option<ActiveLoad>,
    retry: Option<PendingRetry>,
    presented: Option<PresentedModel>,
    placeholder: Option<Entity>,
}

impl ModelPresenter {
    pub fn new(profile: QualityProfile) -> Self {
        Self {
            profile,
            token: 0,
            status: PresenterStatus::Idle,
            current_variant: None,
            active: None,
            retry: None,
            presented: None,
            placeholder: None,
        }
    }

    pub fn status(&self) -> PresenterStatus {
        self.status
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn current_variant(&self) -> Option<ModelVariant> {
        self.current_variant
    }

    pub fn presented(&self) -> Option<&PresentedModel> {
        self.presented.as_ref()
    }

    pub fn placeholder(&self) -> Option<Entity> {
        self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: Entity) {
        self.placeholder = Some(placeholder);
    }

    pub fn take_placeholder(&mut self) -> Option<Entity> {
        self.placeholder.take()
    }

    pub fn retry_pending(&self) -> bool {
        self.retry.is_some()
    }

    /// Starts a new request generation, invalidating every older one.
    ///
    /// Returns the superseded in-flight request, if any, so it can be cancelled.
    fn supersede(&mut self) -> (u64, Option<CancelHandle>) {
        self.token += 1;
        self.retry = None;
        (self.token, self.active.take().map(|active| active.handle))
    }

    pub fn mark_presented(&mut self, root: Entity, variant: ModelVariant, gltf: Handle<Gltf>) {
        self.presented = Some(PresentedModel { root, variant, gltf });
        self.status = PresenterStatus::Presented;
    }

    /// Maps a load event onto this presenter; only the current request counts.
    pub fn resolve(&mut self, event: &ModelLoadEvent) -> Resolution {
        let Some(active) = self
            .active
            .as_ref()
            .filter(|active| active.handle.id() == event.id && active.token == self.token)
        else {
            return Resolution::Ignored;
        };
        let variant = active.variant;

        match &event.outcome {
            LoadOutcome::Progress(fraction) => Resolution::Progress(*fraction),
            LoadOutcome::Loaded(gltf) => {
                self.active = None;
                Resolution::Present {
                    variant,
                    gltf: gltf.clone(),
                }
            }
            LoadOutcome::Failed(_) => {
                self.active = None;
                self.fail(variant)
            }
        }
    }

    /// A loaded model that turned out unusable, e.g. a glTF without a scene.
    pub fn presentation_failed(&mut self, variant: ModelVariant) -> Resolution {
        self.fail(variant)
    }

    /// Schedules the fallback retry, or gives up when the fallback itself failed.
    fn fail(&mut self, variant: ModelVariant) -> Resolution {
        if variant.id == FALLBACK_VARIANT_ID {
            self.status = PresenterStatus::Failed;
            Resolution::GiveUp { failed: variant }
        } else {
            self.retry = Some(PendingRetry {
                token: self.token,
                timer: Timer::from_seconds(FALLBACK_RETRY_DELAY_SECS, TimerMode::Once),
            });
            Resolution::RetryWithFallback { failed: variant }
        }
    }

    /// Advances a scheduled fallback retry; yields the variant once it is due.
    pub fn tick_retry(&mut self, delta: Duration) -> Option<ModelVariant> {
        let retry = self.retry.as_mut()?;
        if retry.token != self.token {
            self.retry = None;
            return None;
        }

        retry.timer.tick(delta);
        if !retry.timer.finished() {
            return None;
        }
        self.retry = None;
        Some(fallback_variant())
    }

    /// Hands back the presented model and frees its residency slot.
    ///
    /// A second call finds nothing and changes nothing.
    pub fn release(&mut self, residency: &mut SceneResidency) -> Option<PresentedModel> {
        let presented = self.presented.take()?;
        residency.release(presented.root);
        if self.status == PresenterStatus::Presented {
            self.status = PresenterStatus::Idle;
        }
        Some(presented)
    }
}

/// Admission check, then a fresh request for `variant`.
///
/// Any older request is cancelled first so its result can never reach the scene.
pub fn load_and_present<F: AssetFetch + ?Sized>(
    presenter: &mut ModelPresenter,
    variant: ModelVariant,
    residency: &SceneResidency,
    loader: &mut ModelLoader,
    fetch: &F,
) -> Admission {
    let (token, superseded) = presenter.supersede();
    if let Some(previous) = superseded {
        loader.cancel(previous);
    }
    presenter.current_variant = Some(variant);

    let limit = presenter.profile.max_concurrent_heavy_models;
    if !residency.has_capacity(limit) {
        warn!(
            "Not loading {}: {} heavy models resident, limit is {}",
            variant.display_name,
            residency.count(),
            limit
        );
        presenter.status = PresenterStatus::Rejected;
        return Admission::Rejected {
            resident: residency.count(),
            limit,
        };
    }

    let handle = loader.load(
        fetch,
        variant.path,
        LoadOptions {
            geometry_detail: presenter.profile.geometry_detail,
            report_progress: true,
        },
    );
    presenter.active = Some(ActiveLoad {
        token,
        handle,
        variant,
    });
    presenter.status = PresenterStatus::Loading;
    info!("Loading {} ({})", variant.display_name, variant.path);
    Admission::Admitted { token }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::error::LoadError;
    use crate::engine::loading::model_loader::tests::RecordingFetch;
    use crate::engine::quality::tier::QualityTier;
    use constants::model_catalogue::find_variant;

    fn variant(id: &str) -> ModelVariant {
        find_variant(id).unwrap()
    }

    fn event(handle: CancelHandle, outcome: LoadOutcome) -> ModelLoadEvent {
        ModelLoadEvent {
            id: handle.id(),
            outcome,
        }
    }

    fn loaded() -> LoadOutcome {
        LoadOutcome::Loaded(Handle::default())
    }

    fn failed() -> LoadOutcome {
        LoadOutcome::Failed(LoadError::Asset {
            path: "models/x.glb".into(),
            reason: "404".into(),
        })
    }

    struct Fixture {
        presenter: ModelPresenter,
        residency: SceneResidency,
        loader: ModelLoader,
        fetch: RecordingFetch,
    }

    impl Fixture {
        fn new(tier: QualityTier) -> Self {
            Self {
                presenter: ModelPresenter::new(tier.profile()),
                residency: SceneResidency::default(),
                loader: ModelLoader::default(),
                fetch: RecordingFetch::default(),
            }
        }

        fn request(&mut self, id: &str) -> Admission {
            load_and_present(
                &mut self.presenter,
                variant(id),
                &self.residency,
                &mut self.loader,
                &self.fetch,
            )
        }

        fn active_handle(&self) -> CancelHandle {
            self.presenter.active.as_ref().unwrap().handle
        }
    }

    #[test]
    fn superseded_result_never_reaches_the_scene() {
        let mut fixture = Fixture::new(QualityTier::High);
        fixture.request("rx93");
        let first = fixture.active_handle();
        fixture.request("gf");
        let second = fixture.active_handle();

        assert_eq!(fixture.loader.in_flight(), 1);
        assert!(matches!(
            fixture.presenter.resolve(&event(first, loaded())),
            Resolution::Ignored
        ));
        assert!(matches!(
            fixture.presenter.resolve(&event(second, loaded())),
            Resolution::Present { variant, .. } if variant.id == "gf"
        ));
    }

    #[test]
    fn full_residency_rejects_without_fetching() {
        let mut fixture = Fixture::new(QualityTier::Low);
        fixture.residency.attach(Entity::from_raw(1));
        fixture.residency.attach(Entity::from_raw(2));

        let admission = fixture.request("rx78");

        assert_eq!(
            admission,
            Admission::Rejected {
                resident: 2,
                limit: 2
            }
        );
        assert!(fixture.fetch.fetched.borrow().is_empty());
        assert_eq!(fixture.residency.count(), 2);
        assert_eq!(fixture.presenter.status(), PresenterStatus::Rejected);
    }

    #[test]
    fn failed_variant_retries_with_fallback_after_delay() {
        let mut fixture = Fixture::new(QualityTier::High);
        fixture.request("rx0");
        let handle = fixture.active_handle();

        assert!(matches!(
            fixture.presenter.resolve(&event(handle, failed())),
            Resolution::RetryWithFallback { failed } if failed.id == "rx0"
        ));
        assert_eq!(fixture.presenter.tick_retry(Duration::from_millis(500)), None);
        let retry = fixture.presenter.tick_retry(Duration::from_millis(600));
        assert_eq!(retry.map(|variant| variant.id), Some(FALLBACK_VARIANT_ID));
        assert!(!fixture.presenter.retry_pending());
    }

    #[test]
    fn loaded_model_without_a_scene_retries_with_fallback() {
        let mut fixture = Fixture::new(QualityTier::High);
        fixture.request("rx93");
        let handle = fixture.active_handle();
        assert!(matches!(
            fixture.presenter.resolve(&event(handle, loaded())),
            Resolution::Present { .. }
        ));

        assert!(matches!(
            fixture.presenter.presentation_failed(variant("rx93")),
            Resolution::RetryWithFallback { failed } if failed.id == "rx93"
        ));
        let retry = fixture.presenter.tick_retry(Duration::from_secs(2));
        assert_eq!(retry.map(|variant| variant.id), Some(FALLBACK_VARIANT_ID));

        assert!(matches!(
            fixture.presenter.presentation_failed(variant(FALLBACK_VARIANT_ID)),
            Resolution::GiveUp { .. }
        ));
        assert_eq!(fixture.presenter.status(), PresenterStatus::Failed);
    }

    #[test]
    fn failed_fallback_gives_up() {
        let mut fixture = Fixture::new(QualityTier::High);
        fixture.request(FALLBACK_VARIANT_ID);
        let handle = fixture.active_handle();

        assert!(matches!(
            fixture.presenter.resolve(&event(handle, failed())),
            Resolution::GiveUp { .. }
        ));
        assert_eq!(fixture.presenter.status(), PresenterStatus::Failed);
        assert!(!fixture.presenter.retry_pending());
    }

    #[test]
    fn newer_request_cancels_a_scheduled_retry() {
        let mut fixture = Fixture::new(QualityTier::High);
        fixture.request("gf");
        let handle = fixture.active_handle();
        fixture.presenter.resolve(&event(handle, failed()));
        assert!(fixture.presenter.retry_pending());

        fixture.request("rx93");
        assert!(!fixture.presenter.retry_pending());
        assert_eq!(fixture.presenter.tick_retry(Duration::from_secs(5)), None);
    }

    #[test]
    fn double_release_is_a_no_op() {
        let mut fixture = Fixture::new(QualityTier::High);
        let root = Entity::from_raw(42);
        fixture.residency.attach(Entity::from_raw(7));
        fixture.residency.attach(root);
        fixture
            .presenter
            .mark_presented(root, variant("rx78"), Handle::default());

        assert!(fixture.presenter.release(&mut fixture.residency).is_some());
        assert_eq!(fixture.residency.count(), 1);
        assert!(fixture.presenter.release(&mut fixture.residency).is_none());
        assert_eq!(fixture.residency.count(), 1);
        assert!(fixture.residency.contains(Entity::from_raw(7)));
    }

    #[test]
    fn progress_is_forwarded_for_the_current_request() {
        let mut fixture = Fixture::new(QualityTier::Medium);
        fixture.request("rx78");
        let handle = fixture.active_handle();
        assert!(matches!(
            fixture.presenter.resolve(&event(handle, LoadOutcome::Progress(0.5))),
            Resolution::Progress(p) if p == 0.5
        ));
        assert_eq!(fixture.presenter.status(), PresenterStatus::Loading);
    }
}
