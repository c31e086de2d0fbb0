//! Cultural influence adjuster
//!
//! Applies declarative per-dimension offsets representing known
//! culinary-tradition biases to a cuisine's mean vectors. Variances, the
//! recipe count, and the sample-id list are never touched.
//!
//! **[ALC-CUL-010]** Idempotent only for the empty config; a non-empty
//! config applied twice double-adjusts. Callers apply at most once per
//! pipeline run.

use crate::config::{AdjustmentMode, CulturalInfluenceConfig};
use alchm_common::alchemy::AlchemicalVector;
use alchm_common::elements::ElementalVector;
use alchm_common::properties::CuisineAggregateProperties;
use tracing::debug;

/// Apply cultural-influence offsets to the mean vectors
///
/// Pure function: consumes the aggregate and returns the adjusted copy.
/// `Clamp` mode bounds each adjusted component to [0, 1]; `Renormalize`
/// rescales each vector back to its pre-adjustment component sum (falling
/// back to clamping when the adjusted sum is not positive).
pub fn apply_cultural_influences(
    mut properties: CuisineAggregateProperties,
    config: &CulturalInfluenceConfig,
) -> CuisineAggregateProperties {
    if config.is_empty() {
        return properties;
    }

    properties.mean_elemental = adjust_elemental(
        &properties.mean_elemental,
        &config.elemental_offsets,
        config.mode,
    );
    properties.mean_alchemical = adjust_alchemical(
        &properties.mean_alchemical,
        &config.alchemical_offsets,
        config.mode,
    );

    debug!(
        cuisine = %properties.cuisine_name,
        mode = ?config.mode,
        note = config.note.as_deref().unwrap_or(""),
        "Cultural influences applied"
    );
    properties
}

fn adjust_elemental(
    mean: &ElementalVector,
    offsets: &ElementalVector,
    mode: AdjustmentMode,
) -> ElementalVector {
    let prior_total = mean.total();
    let shifted = mean.add(offsets);
    match mode {
        AdjustmentMode::Clamp => shifted.clamp_unit(),
        AdjustmentMode::Renormalize => {
            let shifted = shifted.clamp_non_negative();
            let total = shifted.total();
            if total > 0.0 && prior_total > 0.0 {
                shifted.scaled(prior_total / total)
            } else {
                shifted.clamp_unit()
            }
        }
    }
}

fn adjust_alchemical(
    mean: &AlchemicalVector,
    offsets: &AlchemicalVector,
    mode: AdjustmentMode,
) -> AlchemicalVector {
    let prior_total = mean.total();
    let shifted = mean.add(offsets);
    match mode {
        AdjustmentMode::Clamp => shifted.clamp_unit(),
        AdjustmentMode::Renormalize => {
            let shifted = shifted.clamp_non_negative();
            let total = shifted.total();
            if total > 0.0 && prior_total > 0.0 {
                shifted.scaled(prior_total / total)
            } else {
                shifted.clamp_unit()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn aggregate() -> CuisineAggregateProperties {
        CuisineAggregateProperties {
            cuisine_name: "szechuan".into(),
            mean_elemental: ElementalVector::new(0.4, 0.2, 0.2, 0.2),
            variance_elemental: ElementalVector::new(0.01, 0.01, 0.01, 0.01),
            mean_alchemical: AlchemicalVector::neutral(),
            variance_alchemical: AlchemicalVector::ZERO,
            recipe_count: 12,
            sample_recipe_ids: vec![Uuid::new_v4()],
            signatures: vec![],
            planetary_patterns: vec![],
        }
    }

    #[test]
    fn test_empty_config_is_identity() {
        let before = aggregate();
        let after = apply_cultural_influences(before.clone(), &CulturalInfluenceConfig::default());
        assert_eq!(after, before);
    }

    #[test]
    fn test_offsets_shift_means_and_clamp() {
        let config = CulturalInfluenceConfig {
            elemental_offsets: ElementalVector::new(0.8, -0.5, 0.0, 0.0),
            ..Default::default()
        };
        let after = apply_cultural_influences(aggregate(), &config);

        assert_eq!(after.mean_elemental.fire, 1.0, "0.4 + 0.8 clamps to 1.0");
        assert_eq!(after.mean_elemental.water, 0.0, "0.2 - 0.5 clamps to 0.0");
        assert_eq!(after.mean_elemental.earth, 0.2);
    }

    #[test]
    fn test_variance_count_and_samples_untouched() {
        let before = aggregate();
        let config = CulturalInfluenceConfig {
            elemental_offsets: ElementalVector::new(0.1, 0.0, 0.0, 0.0),
            alchemical_offsets: AlchemicalVector::new(0.0, 0.1, 0.0, 0.0),
            ..Default::default()
        };
        let after = apply_cultural_influences(before.clone(), &config);

        assert_eq!(after.variance_elemental, before.variance_elemental);
        assert_eq!(after.recipe_count, before.recipe_count);
        assert_eq!(after.sample_recipe_ids, before.sample_recipe_ids);
        assert!((after.mean_alchemical.essence - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_renormalize_preserves_component_sum() {
        let config = CulturalInfluenceConfig {
            elemental_offsets: ElementalVector::new(0.5, 0.0, 0.0, 0.0),
            mode: AdjustmentMode::Renormalize,
            ..Default::default()
        };
        let before = aggregate();
        let prior_total = before.mean_elemental.total();
        let after = apply_cultural_influences(before, &config);

        assert!((after.mean_elemental.total() - prior_total).abs() < 1e-12);
        // Fire share grows: 0.9/1.5 of the original total.
        assert!((after.mean_elemental.fire - 0.9 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_double_application_double_adjusts() {
        let config = CulturalInfluenceConfig {
            elemental_offsets: ElementalVector::new(0.1, 0.0, 0.0, 0.0),
            ..Default::default()
        };
        let once = apply_cultural_influences(aggregate(), &config);
        let twice = apply_cultural_influences(once.clone(), &config);
        assert!((twice.mean_elemental.fire - once.mean_elemental.fire - 0.1).abs() < 1e-12);
    }
}
