//! Recipe property computer
//!
//! Turns ingredient, cooking-method, and planetary inputs into one property
//! vector set per recipe. Pure aside from an optional cache write.
//!
//! **[ALC-CMP-010]** Pass order is a pinned numeric contract:
//! 1. Quantity-weighted ingredient sum
//! 2. Cooking-method transformations, sequentially in list order
//! 3. Planetary modifiers
//! 4. Non-negative clamp, then thermodynamic derivation
//!
//! **[ALC-CMP-020]** Identical inputs yield bit-identical output; planets
//! are visited in canonical order, never hash order.

use crate::cache::RecipeCache;
use crate::config::ComputeOptions;
use alchm_common::alchemy::{AlchemicalVector, ThermodynamicMetrics};
use alchm_common::astrology::Planet;
use alchm_common::cooking::MethodRegistry;
use alchm_common::elements::ElementalVector;
use alchm_common::properties::{RecipeComputedProperties, RecipeIngredient};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Scale applied to every planetary elemental bias (small fixed nudge)
const PLANETARY_MODIFIER_SCALE: f64 = 0.05;

/// Maximum number of dominant planets recorded per recipe
const MAX_DOMINANT_PLANETS: usize = 3;

/// Inputs for a single recipe computation
#[derive(Debug, Clone)]
pub struct RecipeContext {
    /// Recipe UUID
    pub recipe_id: Uuid,
    /// Ingredient rows from the external ingredient database
    pub ingredients: Vec<RecipeIngredient>,
    /// Cooking method ids in application order; order is significant
    pub cooking_method_ids: Vec<Uuid>,
}

/// Recipe property computer
///
/// Holds the method registry (external collaborator data) and an optional
/// recipe cache. One computer can serve many recipes and many threads; it
/// holds no per-recipe state.
pub struct RecipePropertyComputer {
    registry: MethodRegistry,
    cache: Option<Arc<RecipeCache>>,
}

impl RecipePropertyComputer {
    /// Computer without a cache; `cache_results` is then a no-op
    pub fn new(registry: MethodRegistry) -> Self {
        Self {
            registry,
            cache: None,
        }
    }

    /// Computer with an attached recipe cache
    pub fn with_cache(registry: MethodRegistry, cache: Arc<RecipeCache>) -> Self {
        Self {
            registry,
            cache: Some(cache),
        }
    }

    /// Compute property vectors for one recipe
    ///
    /// Never fails: empty ingredient lists fall back to the neutral profile
    /// with a warning, unknown method ids are skipped and logged, planets
    /// absent from the position snapshot are excluded.
    pub fn compute(
        &self,
        ctx: &RecipeContext,
        options: &ComputeOptions,
    ) -> RecipeComputedProperties {
        let fingerprint = if options.cache_results && self.cache.is_some() {
            let key = input_fingerprint(ctx, options);
            if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&key)) {
                debug!(recipe_id = %ctx.recipe_id, "Recipe computation cache hit");
                // Identical inputs under a different recipe id are still a hit;
                // only the identity field differs.
                let mut properties = cached;
                properties.recipe_id = ctx.recipe_id;
                return properties;
            }
            Some(key)
        } else {
            None
        };

        let mut warnings = Vec::new();

        // Pass 1: quantity-weighted ingredient sum
        let (mut elemental, mut alchemical) =
            self.sum_ingredients(ctx, options, &mut warnings);

        // Pass 2: cooking-method transformations, in list order
        let mut applied_method_ids = Vec::new();
        if options.apply_cooking_methods {
            for method_id in &ctx.cooking_method_ids {
                match self.registry.get(method_id) {
                    Some(method) => {
                        method.apply(&mut elemental, &mut alchemical);
                        applied_method_ids.push(*method_id);
                    }
                    None => {
                        warn!(recipe_id = %ctx.recipe_id, method_id = %method_id,
                            "Unknown cooking method id; skipped");
                        warnings.push(format!("unknown cooking method {method_id}; skipped"));
                    }
                }
            }
        }

        // Pass 3: planetary modifiers, canonical planet order
        let dominant_planets = self.apply_planetary_modifiers(&mut elemental, options);

        // Pass 4: clamp, then derive thermodynamics
        let elemental = elemental.clamp_non_negative();
        let alchemical = alchemical.clamp_non_negative();
        let thermodynamic = ThermodynamicMetrics::derive(&elemental, &alchemical);

        let properties = RecipeComputedProperties {
            recipe_id: ctx.recipe_id,
            elemental,
            alchemical,
            thermodynamic,
            dominant_planets,
            source_ingredient_ids: ctx.ingredients.iter().map(|i| i.id).collect(),
            source_cooking_method_ids: applied_method_ids,
            warnings,
        };

        if let (Some(key), Some(cache)) = (fingerprint, self.cache.as_ref()) {
            cache.store(key, properties.clone());
        }

        debug!(
            recipe_id = %properties.recipe_id,
            dominant = properties.dominant_planets.len(),
            warnings = properties.warnings.len(),
            "Recipe properties computed"
        );
        properties
    }

    /// Pass 1: weighted sum of ingredient vectors
    ///
    /// Weight = scaling(quantity), quantity defaulting to 1.0. An empty
    /// ingredient list yields the neutral profile plus a warning (not an
    /// error); an all-zero weight total falls back to equal weights.
    fn sum_ingredients(
        &self,
        ctx: &RecipeContext,
        options: &ComputeOptions,
        warnings: &mut Vec<String>,
    ) -> (ElementalVector, AlchemicalVector) {
        if ctx.ingredients.is_empty() {
            warn!(recipe_id = %ctx.recipe_id, "Empty ingredient list; neutral profile assumed");
            warnings.push("empty ingredient list; neutral profile assumed".to_string());
            return (ElementalVector::neutral(), AlchemicalVector::neutral());
        }

        let weights: Vec<f64> = ctx
            .ingredients
            .iter()
            .map(|i| options.quantity_scaling.weight(i.quantity.unwrap_or(1.0)))
            .collect();
        let total: f64 = weights.iter().sum();

        let mut elemental = ElementalVector::ZERO;
        let mut alchemical = AlchemicalVector::ZERO;
        if total > 0.0 {
            for (ingredient, weight) in ctx.ingredients.iter().zip(&weights) {
                elemental.add_scaled(&ingredient.elemental, weight / total);
                alchemical.add_scaled(&ingredient.alchemical, weight / total);
            }
        } else {
            warn!(recipe_id = %ctx.recipe_id, "All ingredient weights are zero; using equal weights");
            warnings.push("all ingredient weights zero; equal weights assumed".to_string());
            let equal = 1.0 / ctx.ingredients.len() as f64;
            for ingredient in &ctx.ingredients {
                elemental.add_scaled(&ingredient.elemental, equal);
                alchemical.add_scaled(&ingredient.alchemical, equal);
            }
        }
        (elemental, alchemical)
    }

    /// Pass 3: add each positioned planet's sign-element bias, scaled by its
    /// log-normalized mass weight; returns the dominant planets
    ///
    /// Influence = mass weight × the recipe's pre-modifier affinity for the
    /// sign's element. Dominant planets are the strongest influences,
    /// descending, ties broken by canonical planet order, capped at
    /// [`MAX_DOMINANT_PLANETS`].
    fn apply_planetary_modifiers(
        &self,
        elemental: &mut ElementalVector,
        options: &ComputeOptions,
    ) -> Vec<Planet> {
        let profile = *elemental;
        let mut influences: Vec<(Planet, f64)> = Vec::new();

        for planet in Planet::ALL {
            let Some(sign) = options.planetary_positions.get(&planet) else {
                continue;
            };
            let element = sign.element();
            let bias = planet.normalized_weight() * PLANETARY_MODIFIER_SCALE;
            elemental.add_scaled(&ElementalVector::unit(element), bias);
            influences.push((planet, planet.normalized_weight() * profile.get(element)));
        }

        // Stable sort keeps canonical planet order within equal influences
        influences.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        influences
            .into_iter()
            .filter(|(_, influence)| *influence > 0.0)
            .take(MAX_DOMINANT_PLANETS)
            .map(|(planet, _)| planet)
            .collect()
    }
}

/// Fingerprint of every input that affects the computed output
///
/// Covers ingredient ids and quantities (in order), method ids (in order),
/// the planetary snapshot (canonical planet order), and the option switches
/// that change the numbers. The recipe id is deliberately excluded.
fn input_fingerprint(ctx: &RecipeContext, options: &ComputeOptions) -> String {
    let mut hasher = Sha256::new();
    for ingredient in &ctx.ingredients {
        hasher.update(ingredient.id.as_bytes());
        hasher.update(ingredient.quantity.unwrap_or(1.0).to_le_bytes());
    }
    hasher.update([0xF0]);
    for method_id in &ctx.cooking_method_ids {
        hasher.update(method_id.as_bytes());
    }
    hasher.update([0xF1]);
    for planet in Planet::ALL {
        if let Some(sign) = options.planetary_positions.get(&planet) {
            hasher.update([planet as u8, *sign as u8]);
        }
    }
    hasher.update([
        options.apply_cooking_methods as u8,
        options.quantity_scaling as u8,
    ]);
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// Tests
// ============================================================================
