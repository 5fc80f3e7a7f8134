use bevy::prelude::*;
use constants::model_catalogue::{FALLBACK_VARIANT_ID, MODEL_VARIANTS, ModelVariantInfo, find_variant};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::quality::tier::QualityProfile;

pub type ModelVariant = &'static ModelVariantInfo;

pub fn fallback_variant() -> ModelVariant {
    find_variant(FALLBACK_VARIANT_ID).unwrap_or(&MODEL_VARIANTS[0])
}

/// Variants a device with `profile` may load.
pub fn candidate_variants(profile: &QualityProfile) -> Vec<ModelVariant> {
    let light_only = profile.light_variants_only();
    MODEL_VARIANTS
        .iter()
        .filter(|variant| !light_only || variant.light)
        .collect()
}

/// Uniform pick among the candidates, avoiding `exclude` when anything else is left.
pub fn select_variant<R: Rng + ?Sized>(
    profile: &QualityProfile,
    rng: &mut R,
    exclude: Option<&str>,
) -> ModelVariant {
    let candidates = candidate_variants(profile);
    let others: Vec<ModelVariant> = candidates
        .iter()
        .copied()
        .filter(|variant| Some(variant.id) != exclude)
        .collect();

    let pool = if others.is_empty() { &candidates } else { &others };
    pool.choose(rng).copied().unwrap_or_else(fallback_variant)
}

/// Placement transform at the tier's scale factor.
pub fn variant_transform(variant: ModelVariant, profile: &QualityProfile) -> Transform {
    let placement = &variant.placement;
    let [x, y, z] = placement.rotation;
    Transform {
        translation: Vec3::from_array(placement.position),
        rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
        scale: Vec3::splat(placement.base_scale * profile.uniform_scale_factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::quality::tier::QualityTier;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn low_profile_only_offers_light_variants() {
        let low = QualityTier::Low.profile();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(select_variant(&low, &mut rng, None).light);
        }
        assert_eq!(candidate_variants(&low).len(), 3);
    }

    #[test]
    fn stronger_profiles_see_the_whole_catalogue() {
        assert_eq!(
            candidate_variants(&QualityTier::Medium.profile()).len(),
            MODEL_VARIANTS.len()
        );
    }

    #[test]
    fn random_swap_avoids_the_current_variant() {
        let high = QualityTier::High.profile();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert_ne!(select_variant(&high, &mut rng, Some("rx93")).id, "rx93");
        }
    }

    #[test]
    fn transform_scale_follows_the_tier() {
        let rx78 = fallback_variant();
        let low = variant_transform(rx78, &QualityTier::Low.profile());
        let high = variant_transform(rx78, &QualityTier::High.profile());
        assert_eq!(high.scale, Vec3::splat(400.0));
        assert!((low.scale.x - 280.0).abs() < 1e-3);
        assert_eq!(low.translation, Vec3::new(-3000.0, -450.0, 700.0));
    }
}
