//! Planetary pattern analyzer
//!
//! Correlates per-recipe dominant planets with deviations from the cuisine
//! mean. Descriptive correlation only; no significance test, no causal
//! claim.
//!
//! **[ALC-PAT-010]** strength = RMS of the per-dimension deviation between
//! the planet's recipe group and the cuisine mean, scaled to [0, 1].

use crate::config::PatternOptions;
use alchm_common::astrology::Planet;
use alchm_common::properties::{
    CuisineAggregateProperties, CuisineRecipe, Dimension, PlanetaryPattern,
};
use alchm_common::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// Deviation RMS mapping to full strength; RMS at or above this scale
/// clamps to 1.0
const STRENGTH_RMS_SCALE: f64 = 0.25;

/// Correlate dominant planets with deviations from the cuisine mean
///
/// Recipes are grouped by each planet appearing in their `dominant_planets`;
/// a recipe with several dominant planets contributes to several groups.
/// Patterns are retained when strength ≥ `min_strength`, sorted by strength
/// descending with ties broken by canonical planet order.
pub fn analyze_planetary_patterns(
    recipes: &[CuisineRecipe],
    cuisine: &CuisineAggregateProperties,
    options: &PatternOptions,
) -> Result<Vec<PlanetaryPattern>> {
    if recipes.is_empty() {
        return Err(Error::EmptyInput(format!(
            "cuisine '{}' has no recipes to analyze",
            cuisine.cuisine_name
        )));
    }

    // Reject non-finite upstream components before they reach the group
    // means; NaN would otherwise survive the strength clamp and filter
    for recipe in recipes {
        let p = &recipe.properties;
        if let Some(dimension) = Dimension::ALL
            .into_iter()
            .find(|d| !d.component(&p.elemental, &p.alchemical).is_finite())
        {
            return Err(Error::MissingDimension {
                cuisine: cuisine.cuisine_name.clone(),
                dimension,
            });
        }
    }

    let mut groups: HashMap<Planet, Vec<&CuisineRecipe>> = HashMap::new();
    for recipe in recipes {
        for planet in &recipe.properties.dominant_planets {
            groups.entry(*planet).or_default().push(recipe);
        }
    }

    let mut patterns = Vec::new();
    // Canonical planet order, not hash order: output must be deterministic
    for planet in Planet::ALL {
        let Some(group) = groups.get(&planet) else {
            continue;
        };

        let deviations: Vec<(Dimension, f64)> = Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let group_mean: f64 = group
                    .iter()
                    .map(|r| {
                        dimension.component(
                            &r.properties.elemental,
                            &r.properties.alchemical,
                        )
                    })
                    .sum::<f64>()
                    / group.len() as f64;
                (dimension, group_mean - cuisine.mean(dimension))
            })
            .collect();

        let rms = (deviations.iter().map(|(_, d)| d * d).sum::<f64>()
            / deviations.len() as f64)
            .sqrt();
        let strength = (rms / STRENGTH_RMS_SCALE).clamp(0.0, 1.0);
        if strength < options.min_strength {
            continue;
        }

        // Most-affected dimension: largest |deviation|, ties by dimension order
        let (affected_dimension, affected_deviation) = deviations
            .iter()
            .copied()
            .max_by(|a, b| {
                a.1.abs()
                    .partial_cmp(&b.1.abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(b.0.cmp(&a.0))
            })
            .unwrap_or((Dimension::ALL[0], 0.0));

        let cultural_note = options.include_cultural_notes.then(|| {
            format!(
                "Recipes where {} is dominant run {} on {} relative to the cuisine mean",
                planet,
                if affected_deviation >= 0.0 { "high" } else { "low" },
                affected_dimension,
            )
        });

        patterns.push(PlanetaryPattern {
            planet,
            strength,
            affected_dimension,
            cultural_note,
        });
    }

    patterns.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.planet.cmp(&b.planet))
    });

    debug!(
        cuisine = %cuisine.cuisine_name,
        pattern_count = patterns.len(),
        min_strength = options.min_strength,
        "Planetary pattern analysis complete"
    );
    Ok(patterns)
}

// ============================================================================
// Tests
// ============================================================================
