/// Authored placement of a decorative model.
///
/// Rotation values are applied as radians exactly as authored.
#[derive(Debug, PartialEq)]
pub struct ModelPlacement {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub base_scale: f32,
}

#[derive(Debug, PartialEq)]
pub struct ModelVariantInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub path: &'static str,
    pub placement: ModelPlacement,
    /// Part of the reduced set offered to low-tier devices.
    pub light: bool,
}

pub const MODEL_VARIANTS: &[ModelVariantInfo] = &[
    ModelVariantInfo {
        id: "rx78",
        display_name: "RX-78NT-1 Gundam Alex",
        path: "models/Gundam/rx78/rx-78nt-1_gundam_alex.glb",
        placement: ModelPlacement {
            position: [-3000.0, -450.0, 700.0],
            rotation: [0.0, -50.0, 0.0],
            base_scale: 400.0,
        },
        light: true,
    },
    ModelVariantInfo {
        id: "rx0",
        display_name: "RX-0 Full Armor Unicorn Gundam",
        path: "models/Gundam/rx0/rx-0_full_armor_unicorn_gundam.glb",
        placement: ModelPlacement {
            position: [-2800.0, -3000.0, 2800.0],
            rotation: [0.0, 180.0, 0.0],
            base_scale: 600.0,
        },
        light: false,
    },
    ModelVariantInfo {
        id: "rx93",
        display_name: "RX-93-2 Hi-Nu Gundam",
        path: "models/Gundam/rx93/rx-93-2_hi-nu.glb",
        placement: ModelPlacement {
            position: [2000.0, -350.0, 500.0],
            rotation: [0.0, -45.0, 0.0],
            base_scale: 480.0,
        },
        light: false,
    },
    ModelVariantInfo {
        id: "rx93nu",
        display_name: "RX-93 Nu Gundam",
        path: "models/Gundam/rx93nu/rx-93_nu_gundam.glb",
        placement: ModelPlacement {
            position: [-3000.0, 300.0, 0.0],
            rotation: [0.0, 70.0, 0.0],
            base_scale: 450.0,
        },
        light: true,
    },
    ModelVariantInfo {
        id: "gf",
        display_name: "GF13-017NJII God Gundam",
        path: "models/Gundam/gf/gf13-017njii_god_gundam.glb",
        placement: ModelPlacement {
            position: [2000.0, -400.0, 500.0],
            rotation: [0.0, -45.0, 0.0],
            base_scale: 550.0,
        },
        light: false,
    },
    ModelVariantInfo {
        id: "unicorn",
        display_name: "Gundam Unicorn",
        path: "models/Gundam/gundam/gundam_unicorn.glb",
        placement: ModelPlacement {
            position: [-3000.0, -450.0, 900.0],
            rotation: [0.0, -50.0, 0.0],
            base_scale: 6.0,
        },
        light: true,
    },
];

/// Variant retried when any other variant fails to load.
pub const FALLBACK_VARIANT_ID: &str = "rx78";

/// Catalogue models that may ship a twin with KTX2/zstd supercompressed textures.
/// A missing twin falls back to the plain `.glb`.
pub const SUPERCOMPRESSED_VARIANT_IDS: &[&str] = &["rx0", "rx93", "gf"];

/// Suffix replacing `.glb` for the supercompressed twin.
pub const SUPERCOMPRESSED_SUFFIX: &str = ".ktx2.glb";

/// Reference cube shown while a variant is loading or after it failed.
pub const PLACEHOLDER_SIZE: f32 = 500.0;
pub const PLACEHOLDER_POSITION: [f32; 3] = [3000.0, -2700.0, 0.0];
pub const PLACEHOLDER_COLOR: [f32; 3] = [0.0, 0.0, 1.0];

/// Delay before retrying with the fallback variant.
pub const FALLBACK_RETRY_DELAY_SECS: f32 = 1.0;

/// Interval between automatic variant swaps.
pub const VARIANT_ROTATION_INTERVAL_SECS: f32 = 90.0;

pub fn find_variant(id: &str) -> Option<&'static ModelVariantInfo> {
    MODEL_VARIANTS.iter().find(|variant| variant.id == id)
}
