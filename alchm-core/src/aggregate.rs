//! Cuisine aggregator
//!
//! Weighted statistical aggregation of many recipe vectors into one cuisine
//! vector: weighted mean per dimension and, optionally, Bessel-corrected
//! weighted sample variance.
//!
//! **[ALC-AGG-010]** Aggregation over zero recipes is undefined and fails
//! with `Error::EmptyInput`; it never silently returns a default.

use crate::config::{AggregationOptions, WeightingStrategy};
use alchm_common::alchemy::AlchemicalVector;
use alchm_common::elements::ElementalVector;
use alchm_common::properties::{CuisineAggregateProperties, CuisineRecipe, Dimension};
use alchm_common::{Error, Result};
use tracing::{debug, warn};

/// Half-life for the by-recency weighting strategy, in days
const RECENCY_HALF_LIFE_DAYS: f64 = 180.0;

/// Aggregate a cuisine's recipe vectors into means and variances
///
/// Signatures and planetary patterns are left empty at this stage; the
/// detector and analyzer fill them in downstream.
pub fn compute_cuisine_properties(
    cuisine_name: &str,
    recipes: &[CuisineRecipe],
    options: &AggregationOptions,
) -> Result<CuisineAggregateProperties> {
    if recipes.is_empty() {
        return Err(Error::EmptyInput(format!(
            "cuisine '{cuisine_name}' has no recipes to aggregate"
        )));
    }

    // Minimal shape check: reject non-finite upstream components
    for recipe in recipes {
        let p = &recipe.properties;
        if let Some(dimension) = Dimension::ALL
            .into_iter()
            .find(|d| !d.component(&p.elemental, &p.alchemical).is_finite())
        {
            return Err(Error::MissingDimension {
                cuisine: cuisine_name.to_string(),
                dimension,
            });
        }
    }

    let n = recipes.len();
    let weights = recipe_weights(cuisine_name, recipes, options.weighting_strategy);
    let total: f64 = weights.iter().sum();

    let mut mean_elemental = ElementalVector::ZERO;
    let mut mean_alchemical = AlchemicalVector::ZERO;
    for (recipe, weight) in recipes.iter().zip(&weights) {
        mean_elemental.add_scaled(&recipe.properties.elemental, weight / total);
        mean_alchemical.add_scaled(&recipe.properties.alchemical, weight / total);
    }

    let (variance_elemental, variance_alchemical) = if options.include_variance {
        weighted_variance(recipes, &weights, total, &mean_elemental, &mean_alchemical)
    } else {
        (ElementalVector::ZERO, AlchemicalVector::ZERO)
    };

    let sample_recipe_ids = recipes
        .iter()
        .take(options.sample_id_limit)
        .map(|r| r.properties.recipe_id)
        .collect();

    debug!(
        cuisine = cuisine_name,
        recipe_count = n,
        strategy = ?options.weighting_strategy,
        "Cuisine aggregate computed"
    );

    Ok(CuisineAggregateProperties {
        cuisine_name: cuisine_name.to_string(),
        mean_elemental,
        variance_elemental,
        mean_alchemical,
        variance_alchemical,
        recipe_count: n,
        sample_recipe_ids,
        signatures: Vec::new(),
        planetary_patterns: Vec::new(),
    })
}

/// Per-recipe weights for the chosen strategy
///
/// Equal: 1.0 each. ByPopularity: the recipe's popularity, 1.0 when absent.
/// ByRecency: half-life decay measured from the newest `prepared_at` in the
/// set — the reference instant comes from the data, not the wall clock, so
/// aggregation stays deterministic; recipes without a timestamp weigh 1.0.
/// A degenerate all-zero weighting falls back to equal weights with a
/// warning.
fn recipe_weights(
    cuisine_name: &str,
    recipes: &[CuisineRecipe],
    strategy: WeightingStrategy,
) -> Vec<f64> {
    let weights: Vec<f64> = match strategy {
        WeightingStrategy::Equal => vec![1.0; recipes.len()],
        WeightingStrategy::ByPopularity => recipes
            .iter()
            .map(|r| r.popularity.unwrap_or(1.0).max(0.0))
            .collect(),
        WeightingStrategy::ByRecency => {
            let reference = recipes.iter().filter_map(|r| r.prepared_at).max();
            recipes
                .iter()
                .map(|r| match (r.prepared_at, reference) {
                    (Some(at), Some(newest)) => {
                        let age_days =
                            (newest - at).num_seconds().max(0) as f64 / 86_400.0;
                        0.5_f64.powf(age_days / RECENCY_HALF_LIFE_DAYS)
                    }
                    _ => 1.0,
                })
                .collect()
        }
    };

    if weights.iter().sum::<f64>() > 0.0 {
        weights
    } else {
        warn!(
            cuisine = cuisine_name,
            strategy = ?strategy,
            "Degenerate zero-weight set; falling back to equal weights"
        );
        vec![1.0; recipes.len()]
    }
}

/// Bessel-corrected weighted sample variance per dimension
///
/// With normalized weights ŵ: variance = (n / max(n−1, 1)) × Σ ŵᵢ(xᵢ − μ)².
/// For equal weights this reduces to Σ(xᵢ − μ)² / (n − 1); a single recipe
/// has variance 0 in every dimension.
fn weighted_variance(
    recipes: &[CuisineRecipe],
    weights: &[f64],
    total: f64,
    mean_elemental: &ElementalVector,
    mean_alchemical: &AlchemicalVector,
) -> (ElementalVector, AlchemicalVector) {
    let n = recipes.len();
    let bessel = n as f64 / n.saturating_sub(1).max(1) as f64;

    let mut variance_elemental = ElementalVector::ZERO;
    let mut variance_alchemical = AlchemicalVector::ZERO;
    for dimension in Dimension::ALL {
        let mean = dimension.component(mean_elemental, mean_alchemical);
        let accumulated: f64 = recipes
            .iter()
            .zip(weights)
            .map(|(recipe, weight)| {
                let value = dimension
                    .component(&recipe.properties.elemental, &recipe.properties.alchemical);
                (weight / total) * (value - mean).powi(2)
            })
            .sum();
        // Floating error can leave a hair below zero; variance is >= 0
        let variance = (bessel * accumulated).max(0.0);
        match dimension {
            Dimension::Elemental(e) => variance_elemental.set(e, variance),
            Dimension::Alchemical(a) => variance_alchemical.set(a, variance),
        }
    }
    (variance_elemental, variance_alchemical)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alchm_common::alchemy::ThermodynamicMetrics;
    use alchm_common::elements::Element;
    use alchm_common::properties::RecipeComputedProperties;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn recipe(elemental: ElementalVector) -> CuisineRecipe {
        let alchemical = AlchemicalVector::neutral();
        CuisineRecipe {
            properties: RecipeComputedProperties {
                recipe_id: Uuid::new_v4(),
                elemental,
                alchemical,
                thermodynamic: ThermodynamicMetrics::derive(&elemental, &alchemical),
                dominant_planets: vec![],
                source_ingredient_ids: vec![],
                source_cooking_method_ids: vec![],
                warnings: vec![],
            },
            popularity: None,
            prepared_at: None,
        }
    }

    #[test]
    fn test_empty_recipe_list_fails() {
        let result = compute_cuisine_properties("ghost", &[], &AggregationOptions::default());
        assert!(matches!(result, Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_equal_weights_mean_is_arithmetic_mean() {
        let recipes = vec![
            recipe(ElementalVector::new(0.2, 0.4, 0.2, 0.2)),
            recipe(ElementalVector::new(0.6, 0.2, 0.1, 0.1)),
            recipe(ElementalVector::new(0.1, 0.3, 0.3, 0.3)),
        ];
        let aggregate =
            compute_cuisine_properties("test", &recipes, &AggregationOptions::default()).unwrap();
        assert!((aggregate.mean_elemental.fire - 0.3).abs() < 1e-12);
        assert!((aggregate.mean_elemental.water - 0.3).abs() < 1e-12);
        assert_eq!(aggregate.recipe_count, 3);
    }

    #[test]
    fn test_two_recipe_variance_matches_bessel_example() {
        let recipes = vec![
            recipe(ElementalVector::new(0.2, 0.3, 0.3, 0.2)),
            recipe(ElementalVector::new(0.6, 0.3, 0.3, 0.2)),
        ];
        let aggregate =
            compute_cuisine_properties("test", &recipes, &AggregationOptions::default()).unwrap();

        // ((0.2-0.4)^2 + (0.6-0.4)^2) / (2-1) = 0.08
        assert!((aggregate.mean_elemental.fire - 0.4).abs() < 1e-12);
        assert!((aggregate.variance_elemental.fire - 0.08).abs() < 1e-12);
        assert_eq!(aggregate.variance_elemental.water, 0.0);
    }

    #[test]
    fn test_single_recipe_variance_is_zero() {
        let recipes = vec![recipe(ElementalVector::new(0.4, 0.3, 0.2, 0.1))];
        let aggregate =
            compute_cuisine_properties("solo", &recipes, &AggregationOptions::default()).unwrap();
        for dimension in Dimension::ALL {
            assert_eq!(aggregate.variance(dimension), 0.0, "{dimension}");
        }
    }

    #[test]
    fn test_variance_skipped_when_not_requested() {
        let recipes = vec![
            recipe(ElementalVector::new(0.2, 0.3, 0.3, 0.2)),
            recipe(ElementalVector::new(0.6, 0.3, 0.3, 0.2)),
        ];
        let options = AggregationOptions {
            include_variance: false,
            ..Default::default()
        };
        let aggregate = compute_cuisine_properties("test", &recipes, &options).unwrap();
        assert_eq!(aggregate.variance_elemental, ElementalVector::ZERO);
    }

    #[test]
    fn test_popularity_weighting_shifts_mean() {
        let mut popular = recipe(ElementalVector::new(1.0, 0.0, 0.0, 0.0));
        popular.popularity = Some(3.0);
        let unpopular = recipe(ElementalVector::new(0.0, 1.0, 0.0, 0.0));

        let options = AggregationOptions {
            weighting_strategy: WeightingStrategy::ByPopularity,
            ..Default::default()
        };
        let aggregate =
            compute_cuisine_properties("test", &[popular, unpopular], &options).unwrap();

        // Weights 3.0 and 1.0 (default): fire mean = 0.75
        assert!((aggregate.mean_elemental.fire - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_recency_weighting_favors_newer_recipes() {
        let newest = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let mut new_recipe = recipe(ElementalVector::new(1.0, 0.0, 0.0, 0.0));
        new_recipe.prepared_at = Some(newest);
        let mut old_recipe = recipe(ElementalVector::new(0.0, 1.0, 0.0, 0.0));
        old_recipe.prepared_at = Some(newest - Duration::days(180));

        let options = AggregationOptions {
            weighting_strategy: WeightingStrategy::ByRecency,
            ..Default::default()
        };
        let aggregate =
            compute_cuisine_properties("test", &[new_recipe, old_recipe], &options).unwrap();

        // Weights 1.0 and 0.5 after one half-life: fire mean = 2/3
        assert!((aggregate.mean_elemental.fire - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_popularity_everywhere_falls_back_to_equal() {
        let mut a = recipe(ElementalVector::new(1.0, 0.0, 0.0, 0.0));
        a.popularity = Some(0.0);
        let mut b = recipe(ElementalVector::new(0.0, 1.0, 0.0, 0.0));
        b.popularity = Some(0.0);

        let options = AggregationOptions {
            weighting_strategy: WeightingStrategy::ByPopularity,
            ..Default::default()
        };
        let aggregate = compute_cuisine_properties("test", &[a, b], &options).unwrap();
        assert!((aggregate.mean_elemental.fire - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_component_is_reported() {
        let mut bad = recipe(ElementalVector::new(0.2, 0.3, 0.3, 0.2));
        bad.properties.elemental.earth = f64::NAN;
        let result =
            compute_cuisine_properties("thai", &[bad], &AggregationOptions::default());
        match result {
            Err(Error::MissingDimension { cuisine, dimension }) => {
                assert_eq!(cuisine, "thai");
                assert_eq!(dimension, Dimension::Elemental(Element::Earth));
            }
            other => panic!("expected MissingDimension, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_ids_are_bounded() {
        let recipes: Vec<CuisineRecipe> = (0..40)
            .map(|_| recipe(ElementalVector::neutral()))
            .collect();
        let aggregate =
            compute_cuisine_properties("big", &recipes, &AggregationOptions::default()).unwrap();
        assert_eq!(aggregate.sample_recipe_ids.len(), 16);
        assert_eq!(aggregate.recipe_count, 40);
    }
}
