//! Pipeline option types
//!
//! Every stage takes its options per call; nothing is read from ambient
//! state. All option types are serde-deserializable so an external driver
//! can keep them in declarative config.

use alchm_common::alchemy::AlchemicalVector;
use alchm_common::astrology::PlanetaryPositions;
use alchm_common::elements::ElementalVector;
use serde::{Deserialize, Serialize};

/// Quantity-to-weight scaling for ingredient aggregation
///
/// Each curve yields a non-negative weight from a recipe quantity:
/// - Linear: w(q) = q (proportional, the default)
/// - Logarithmic: w(q) = ln(1 + q) (compresses bulk ingredients)
/// - Sqrt: w(q) = √q (middle ground)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityScaling {
    #[default]
    Linear,
    Logarithmic,
    Sqrt,
}

impl QuantityScaling {
    /// Weight for the given quantity; negative quantities clamp to zero
    pub fn weight(&self, quantity: f64) -> f64 {
        let q = quantity.max(0.0);
        match self {
            QuantityScaling::Linear => q,
            QuantityScaling::Logarithmic => (1.0 + q).ln(),
            QuantityScaling::Sqrt => q.sqrt(),
        }
    }
}

/// Options for the recipe property computer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeOptions {
    /// Planet → zodiac sign snapshot from the ephemeris service; planets
    /// absent here are excluded from the modifier pass
    #[serde(default)]
    pub planetary_positions: PlanetaryPositions,
    /// Apply cooking-method transformations (sequentially, in list order)
    #[serde(default = "default_true")]
    pub apply_cooking_methods: bool,
    /// Quantity-to-weight curve for ingredient aggregation
    #[serde(default)]
    pub quantity_scaling: QuantityScaling,
    /// Store the result in the attached recipe cache, keyed by an input
    /// fingerprint
    #[serde(default)]
    pub cache_results: bool,
}

impl ComputeOptions {
    pub fn new() -> Self {
        Self {
            planetary_positions: PlanetaryPositions::new(),
            apply_cooking_methods: true,
            quantity_scaling: QuantityScaling::Linear,
            cache_results: false,
        }
    }
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn default_true() -> bool {
    true
}

/// Recipe weighting strategy for cuisine aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingStrategy {
    /// 1/n weights
    #[default]
    Equal,
    /// Weight = recipe popularity (1.0 when absent)
    ByPopularity,
    /// Exponential half-life decay from the newest `prepared_at` in the set
    ByRecency,
}

/// Options for the cuisine aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationOptions {
    #[serde(default)]
    pub weighting_strategy: WeightingStrategy,
    /// Compute weighted sample variance (Bessel-corrected)
    #[serde(default = "default_true")]
    pub include_variance: bool,
    /// Maximum number of recipe ids retained for traceability
    #[serde(default = "default_sample_id_limit")]
    pub sample_id_limit: usize,
}

fn default_sample_id_limit() -> usize {
    16
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            weighting_strategy: WeightingStrategy::Equal,
            include_variance: true,
            sample_id_limit: default_sample_id_limit(),
        }
    }
}

/// Options for the signature detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureOptions {
    /// Minimum |deviation| for a dimension to count as a signature
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Score each signature's confidence (otherwise confidence is 0.0)
    #[serde(default = "default_true")]
    pub include_confidence: bool,
}

fn default_threshold() -> f64 {
    1.5
}

impl Default for SignatureOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            include_confidence: true,
        }
    }
}

/// Options for the planetary pattern analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternOptions {
    /// Minimum normalized strength for a pattern to be retained
    #[serde(default = "default_min_strength")]
    pub min_strength: f64,
    /// Attach a descriptive cultural note to each pattern
    #[serde(default)]
    pub include_cultural_notes: bool,
}

fn default_min_strength() -> f64 {
    0.3
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            min_strength: default_min_strength(),
            include_cultural_notes: false,
        }
    }
}

/// Post-adjustment normalization mode for cultural influences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentMode {
    /// Clamp each adjusted component to [0, 1] (the safe default)
    #[default]
    Clamp,
    /// Rescale each adjusted vector back to its pre-adjustment component sum
    Renormalize,
}

/// Declarative per-dimension offsets for known culinary-tradition biases
///
/// Pure data, typically loaded from TOML by the external driver. Applying a
/// non-empty config twice double-adjusts; callers apply at most once per
/// pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CulturalInfluenceConfig {
    #[serde(default)]
    pub elemental_offsets: ElementalVector,
    #[serde(default)]
    pub alchemical_offsets: AlchemicalVector,
    #[serde(default)]
    pub mode: AdjustmentMode,
    /// Free-form provenance note ("coastal tradition favors Water", ...)
    #[serde(default)]
    pub note: Option<String>,
}

impl CulturalInfluenceConfig {
    /// True when every offset is exactly zero (the identity adjustment)
    pub fn is_empty(&self) -> bool {
        self.elemental_offsets == ElementalVector::ZERO
            && self.alchemical_offsets == AlchemicalVector::ZERO
    }
}

// ============================================================================
// Tests
// ============================================================================
