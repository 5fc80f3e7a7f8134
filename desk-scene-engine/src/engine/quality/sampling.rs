use bevy::prelude::*;

use crate::engine::core::runtime_config::RuntimeConfig;
use crate::engine::quality::device::{classify, detect_device_signals};
use crate::engine::quality::monitor::QualityMonitor;
use crate::engine::quality::tier::{QualityProfile, QualityTier};

/// Broadcast whenever the monitor settles on a different tier.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct QualityTierChanged {
    pub tier: QualityTier,
    pub profile: QualityProfile,
}

/// Installs the quality monitor, seeded from the device classification.
pub struct QualityPlugin;

impl Plugin for QualityPlugin {
    fn build(&self, app: &mut App) {
        let signals = detect_device_signals();
        let tier = classify(&signals);
        info!(
            "Device classified as {} (cores: {}, dpr: {}, context: {}, mobile: {})",
            tier.as_str(),
            signals.logical_cores,
            signals.device_pixel_ratio,
            signals.graphics_context_version,
            signals.mobile
        );

        let mut monitor = QualityMonitor::new(tier);
        monitor.subscribe(|tier| info!("Quality tier changed to {}", tier.as_str()));

        app.insert_resource(monitor)
            .add_event::<QualityTierChanged>()
            .add_systems(First, sample_frame_rate);
    }
}

/// Sole writer of [`QualityMonitor`]; runs once per rendered frame.
pub fn sample_frame_rate(
    time: Res<Time<Real>>,
    config: Res<RuntimeConfig>,
    mut monitor: ResMut<QualityMonitor>,
    mut tier_events: EventWriter<QualityTierChanged>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    let Some(sample) = monitor.record_frame(now_ms) else {
        return;
    };

    if config.debug {
        info!("FPS: {} | tier: {}", sample.fps, monitor.tier().as_str());
    }

    if let Some(tier) = sample.tier_change {
        tier_events.write(QualityTierChanged {
            tier,
            profile: tier.profile(),
        });
    }
}
