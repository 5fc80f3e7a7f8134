use std::collections::VecDeque;

use bevy::prelude::*;
use constants::quality::{
    DOWNGRADE_BELOW_FPS, FPS_HISTORY_LEN, FPS_SAMPLE_WINDOW_MS, MIN_SAMPLES_FOR_TIER_CHANGE,
    UPGRADE_ABOVE_FPS,
};

use crate::engine::quality::tier::{QualityProfile, QualityTier};

type TierListener = Box<dyn Fn(QualityTier) + Send + Sync>;

/// One closed measurement window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpsSample {
    pub fps: u32,
    /// Set when this sample moved the monitor to a new tier.
    pub tier_change: Option<QualityTier>,
}

/// The single source of truth for the current quality tier.
///
/// Only the frame sampling system writes to it; everything else reads.
#[derive(Resource)]
pub struct QualityMonitor {
    tier: QualityTier,
    fps: u32,
    history: VecDeque<u32>,
    frames_in_window: u32,
    window_start_ms: Option<f64>,
    previously_downgraded: bool,
    listeners: Vec<TierListener>,
}

impl QualityMonitor {
    pub fn new(initial: QualityTier) -> Self {
        Self {
            tier: initial,
            fps: 0,
            history: VecDeque::with_capacity(FPS_HISTORY_LEN),
            frames_in_window: 0,
            window_start_ms: None,
            previously_downgraded: false,
            listeners: Vec::new(),
        }
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    pub fn profile(&self) -> QualityProfile {
        self.tier.profile()
    }

    /// Most recent one-second frame rate, 0 before the first window closes.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn history(&self) -> impl Iterator<Item = u32> + '_ {
        self.history.iter().copied()
    }

    /// Registers a callback invoked on every tier change.
    pub fn subscribe(&mut self, listener: impl Fn(QualityTier) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Counts one rendered frame at `now_ms` and closes the window once it
    /// spans a full second.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<FpsSample> {
        let Some(window_start) = self.window_start_ms else {
            self.window_start_ms = Some(now_ms);
            self.frames_in_window = 0;
            return None;
        };

        self.frames_in_window += 1;
        let elapsed = now_ms - window_start;
        if elapsed < FPS_SAMPLE_WINDOW_MS {
            return None;
        }

        let fps = (f64::from(self.frames_in_window) * 1000.0 / elapsed).round() as u32;
        self.frames_in_window = 0;
        self.window_start_ms = Some(now_ms);

        Some(FpsSample {
            fps,
            tier_change: self.push_sample(fps),
        })
    }

    /// Appends a measured frame rate and re-evaluates the tier.
    pub fn push_sample(&mut self, fps: u32) -> Option<QualityTier> {
        self.fps = fps;
        if self.history.len() == FPS_HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(fps);
        self.evaluate()
    }

    fn evaluate(&mut self) -> Option<QualityTier> {
        if self.history.len() < MIN_SAMPLES_FOR_TIER_CHANGE {
            return None;
        }

        let average =
            self.history.iter().map(|&fps| f64::from(fps)).sum::<f64>() / self.history.len() as f64;

        let next = if average < DOWNGRADE_BELOW_FPS && self.tier != QualityTier::Low {
            self.previously_downgraded = true;
            QualityTier::Low
        } else if average > UPGRADE_ABOVE_FPS
            && self.previously_downgraded
            && self.tier == QualityTier::Low
        {
            // Recovery stops at medium; high is only ever assigned at startup.
            self.previously_downgraded = false;
            QualityTier::Medium
        } else {
            return None;
        };

        self.tier = next;
        for listener in &self.listeners {
            listener(next);
        }
        Some(next)
    }
}
