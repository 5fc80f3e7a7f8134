use crate::engine::loading::error::LoadError;

/// What the asset server currently says about a request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadObservation {
    Pending(f32),
    Ready,
    Failed(LoadError),
}

/// What the request owner should be told.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSignal {
    Progress(f32),
    Success,
    Error(LoadError),
}

/// Turns repeated observations into a well formed signal stream: progress is
/// non-decreasing within `[0, 1]` and exactly one terminal signal is emitted.
#[derive(Debug, Default)]
pub struct LoadTracker {
    reported: Option<f32>,
    settled: bool,
}

impl LoadTracker {
    pub fn observe(&mut self, observation: LoadObservation) -> Vec<LoadSignal> {
        if self.settled {
            return Vec::new();
        }

        match observation {
            LoadObservation::Pending(fraction) => self.advance(fraction).into_iter().collect(),
            LoadObservation::Ready => {
                self.settled = true;
                let mut signals: Vec<_> = self.advance(1.0).into_iter().collect();
                signals.push(LoadSignal::Success);
                signals
            }
            LoadObservation::Failed(error) => {
                self.settled = true;
                vec![LoadSignal::Error(error)]
            }
        }
    }

    /// Accepts observations again after a terminal one, keeping the progress
    /// already reported so the stream stays non-decreasing.
    pub fn rearm(&mut self) {
        self.settled = false;
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn progress(&self) -> f32 {
        self.reported.unwrap_or(0.0)
    }

    fn advance(&mut self, fraction: f32) -> Option<LoadSignal> {
        if fraction.is_nan() {
            return None;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        match self.reported {
            Some(previous) if fraction <= previous => None,
            _ => {
                self.reported = Some(fraction);
                Some(LoadSignal::Progress(fraction))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> LoadError {
        LoadError::Asset {
            path: "models/missing.glb".into(),
            reason: "404".into(),
        }
    }

    #[test]
    fn progress_is_monotonic_and_clamped() {
        let mut tracker = LoadTracker::default();
        let mut seen = Vec::new();
        for fraction in [0.0, 0.5, 0.25, 0.5, 3.0, f32::NAN] {
            seen.extend(tracker.observe(LoadObservation::Pending(fraction)));
        }
        assert_eq!(
            seen,
            vec![
                LoadSignal::Progress(0.0),
                LoadSignal::Progress(0.5),
                LoadSignal::Progress(1.0)
            ]
        );
    }

    #[test]
    fn success_completes_progress_then_settles() {
        let mut tracker = LoadTracker::default();
        tracker.observe(LoadObservation::Pending(0.5));
        assert_eq!(
            tracker.observe(LoadObservation::Ready),
            vec![LoadSignal::Progress(1.0), LoadSignal::Success]
        );
        assert!(tracker.is_settled());
        assert!(tracker.observe(LoadObservation::Ready).is_empty());
    }

    #[test]
    fn rearmed_tracker_keeps_progress_monotonic() {
        let mut tracker = LoadTracker::default();
        tracker.observe(LoadObservation::Pending(0.5));
        tracker.observe(LoadObservation::Failed(failure()));
        tracker.rearm();

        assert!(!tracker.is_settled());
        assert!(tracker.observe(LoadObservation::Pending(0.1)).is_empty());
        assert_eq!(
            tracker.observe(LoadObservation::Ready),
            vec![LoadSignal::Progress(1.0), LoadSignal::Success]
        );
    }

    #[test]
    fn failure_is_reported_once_and_never_followed_by_success() {
        let mut tracker = LoadTracker::default();
        assert_eq!(
            tracker.observe(LoadObservation::Failed(failure())),
            vec![LoadSignal::Error(failure())]
        );
        assert!(tracker.observe(LoadObservation::Failed(failure())).is_empty());
        assert!(tracker.observe(LoadObservation::Ready).is_empty());
    }
}
