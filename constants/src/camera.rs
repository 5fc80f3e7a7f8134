/// Resting pose overlooking the desk.
pub const DESK_EYE: [f32; 3] = [0.0, 2400.0, 8500.0];
pub const DESK_TARGET: [f32; 3] = [0.0, 700.0, 0.0];

/// Pose framing the monitor surface while the pointer is on it.
pub const MONITOR_EYE: [f32; 3] = [0.0, 950.0, 1700.0];
pub const MONITOR_TARGET: [f32; 3] = [0.0, 950.0, 255.0];

/// Exponential easing rate between poses, per second.
pub const CAMERA_EASING_RATE: f32 = 4.0;

pub const CAMERA_NEAR: f32 = 10.0;
pub const CAMERA_FAR: f32 = 900_000.0;
