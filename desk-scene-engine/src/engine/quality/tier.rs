use constants::quality::{
    DECOMPRESSION_MIN_GEOMETRY_DETAIL, LIGHT_VARIANTS_ONLY_AT_OR_BELOW,
    STRIP_AUXILIARY_ATTRIBUTES_BELOW, STRIP_NORMALS_BELOW,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

/// Parameters every tier-aware system reads instead of branching on the tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityProfile {
    pub texture_quality: f32,
    pub geometry_detail: f32,
    pub max_concurrent_heavy_models: u32,
    pub uniform_scale_factor: f32,
    pub shadows_enabled: bool,
}

impl QualityTier {
    pub fn profile(self) -> QualityProfile {
        match self {
            QualityTier::Low => QualityProfile {
                texture_quality: 0.5,
                geometry_detail: 0.3,
                max_concurrent_heavy_models: 2,
                uniform_scale_factor: 0.7,
                shadows_enabled: false,
            },
            QualityTier::Medium => QualityProfile {
                texture_quality: 0.8,
                geometry_detail: 0.7,
                max_concurrent_heavy_models: 3,
                uniform_scale_factor: 0.85,
                shadows_enabled: true,
            },
            QualityTier::High => QualityProfile {
                texture_quality: 1.0,
                geometry_detail: 1.0,
                max_concurrent_heavy_models: 5,
                uniform_scale_factor: 1.0,
                shadows_enabled: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl QualityProfile {
    pub fn light_variants_only(&self) -> bool {
        self.max_concurrent_heavy_models <= LIGHT_VARIANTS_ONLY_AT_OR_BELOW
    }

    pub fn decompression_allowed(&self) -> bool {
        self.geometry_detail > DECOMPRESSION_MIN_GEOMETRY_DETAIL
    }

    /// Tangents and the secondary UV set.
    pub fn strip_auxiliary_attributes(&self) -> bool {
        self.geometry_detail < STRIP_AUXILIARY_ATTRIBUTES_BELOW
    }

    pub fn strip_normals(&self) -> bool {
        self.geometry_detail < STRIP_NORMALS_BELOW
    }

    /// Anisotropic filtering clamp for textures presented at this quality.
    pub fn anisotropy_clamp(&self) -> u16 {
        match self.texture_quality {
            q if q >= 1.0 => 16,
            q if q >= 0.8 => 8,
            q if q >= 0.5 => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(QualityTier::Low < QualityTier::Medium);
        assert!(QualityTier::Medium < QualityTier::High);
    }

    #[test]
    fn low_profile_restricts_everything() {
        let low = QualityTier::Low.profile();
        assert!(low.light_variants_only());
        assert!(!low.decompression_allowed());
        assert!(low.strip_auxiliary_attributes());
        assert!(low.strip_normals());
        assert!(!low.shadows_enabled);
        assert_eq!(low.anisotropy_clamp(), 4);
    }

    #[test]
    fn medium_keeps_normals_but_strips_tangents() {
        let medium = QualityTier::Medium.profile();
        assert!(!medium.light_variants_only());
        assert!(medium.decompression_allowed());
        assert!(medium.strip_auxiliary_attributes());
        assert!(!medium.strip_normals());
        assert_eq!(medium.anisotropy_clamp(), 8);
    }

    #[test]
    fn high_keeps_full_geometry() {
        let high = QualityTier::High.profile();
        assert!(!high.strip_auxiliary_attributes());
        assert_eq!(high.max_concurrent_heavy_models, 5);
        assert_eq!(high.uniform_scale_factor, 1.0);
        assert_eq!(high.anisotropy_clamp(), 16);
    }
}
