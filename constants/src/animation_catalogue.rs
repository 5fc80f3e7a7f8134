/// Frame rate the baked actor track was authored at.
pub const ANIMATION_FRAME_RATE: f32 = 30.0;

pub struct AnimationRange {
    pub name: &'static str,
    pub start_frame: u32,
    pub end_frame: u32,
}

pub const ANIMATION_RANGES: &[AnimationRange] = &[
    AnimationRange {
        name: "IdleSit",
        start_frame: 300,
        end_frame: 465,
    },
    AnimationRange {
        name: "IdleLayDown",
        start_frame: 470,
        end_frame: 630,
    },
    AnimationRange {
        name: "IdleSleep",
        start_frame: 635,
        end_frame: 755,
    },
    AnimationRange {
        name: "LickPaw",
        start_frame: 1030,
        end_frame: 1150,
    },
    AnimationRange {
        name: "Stretch",
        start_frame: 1240,
        end_frame: 1370,
    },
];

pub struct AnimationSettings {
    pub name: &'static str,
    pub position: [f32; 3],
    /// Euler XYZ in radians.
    pub rotation: [f32; 3],
    pub scale: f32,
    /// Playback speed of the sub-clip, independent of the authoring frame rate.
    pub speed: f32,
    /// Rotation forced every frame instead of `rotation`.
    pub rotation_override: Option<[f32; 3]>,
}

const HALF_TURN: f32 = std::f32::consts::PI;
const LYING_YAW: f32 = -60.0 * (std::f32::consts::PI / 180.0);

pub const ANIMATION_SETTINGS: &[AnimationSettings] = &[
    AnimationSettings {
        name: "IdleSit",
        position: [-1600.0, -100.0, 0.0],
        rotation: [HALF_TURN, 0.0, 0.0],
        scale: 1700.0,
        speed: 0.5,
        rotation_override: None,
    },
    AnimationSettings {
        name: "IdleLayDown",
        position: [0.0, 1220.0, 150.0],
        rotation: [HALF_TURN, LYING_YAW, 0.0],
        scale: 1700.0,
        speed: 0.5,
        rotation_override: Some([HALF_TURN, LYING_YAW, 0.0]),
    },
    AnimationSettings {
        name: "IdleSleep",
        position: [0.0, 1610.0, 100.0],
        rotation: [HALF_TURN, LYING_YAW, 0.0],
        scale: 1700.0,
        speed: 0.5,
        rotation_override: Some([HALF_TURN, LYING_YAW, 0.0]),
    },
    AnimationSettings {
        name: "LickPaw",
        position: [-1600.0, -100.0, 0.0],
        rotation: [HALF_TURN, 0.0, 0.0],
        scale: 1700.0,
        speed: 0.5,
        rotation_override: None,
    },
    AnimationSettings {
        name: "Stretch",
        position: [-2250.0, -450.0, 100.0],
        rotation: [HALF_TURN, 0.0, 0.0],
        scale: 1700.0,
        speed: 0.5,
        rotation_override: None,
    },
];

/// Playback order used when cycling animations.
pub const ANIMATION_ORDER: &[&str] = &["IdleSit", "IdleLayDown", "IdleSleep", "LickPaw", "Stretch"];

pub const ACTOR_PLACEHOLDER_SIZE: f32 = 500.0;
pub const ACTOR_PLACEHOLDER_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

pub fn find_range(name: &str) -> Option<&'static AnimationRange> {
    ANIMATION_RANGES.iter().find(|range| range.name == name)
}

pub fn find_settings(name: &str) -> Option<&'static AnimationSettings> {
    ANIMATION_SETTINGS.iter().find(|settings| settings.name == name)
}
