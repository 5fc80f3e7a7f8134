/// Length of one FPS measurement window in milliseconds.
pub const FPS_SAMPLE_WINDOW_MS: f64 = 1000.0;

/// Number of one-second samples kept for the rolling average.
pub const FPS_HISTORY_LEN: usize = 10;

/// Samples required before the tier may change.
pub const MIN_SAMPLES_FOR_TIER_CHANGE: usize = 5;

/// Rolling average below which the tier drops to low.
pub const DOWNGRADE_BELOW_FPS: f64 = 30.0;

/// Rolling average above which a previously downgraded device returns to medium.
pub const UPGRADE_ABOVE_FPS: f64 = 55.0;

/// Geometry detail above which the decompression stage is allowed to run.
pub const DECOMPRESSION_MIN_GEOMETRY_DETAIL: f32 = 0.5;

/// Geometry detail below which tangents and the secondary UV set are stripped.
pub const STRIP_AUXILIARY_ATTRIBUTES_BELOW: f32 = 0.8;

/// Geometry detail below which normals are stripped as well.
pub const STRIP_NORMALS_BELOW: f32 = 0.5;

/// Admission limit at or below which only light catalogue variants are eligible.
pub const LIGHT_VARIANTS_ONLY_AT_OR_BELOW: u32 = 2;
