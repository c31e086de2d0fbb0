//! Recipe and cuisine property types
//!
//! Shared data model for the computation pipeline:
//! - `RecipeIngredient` — upstream ingredient row (vectors + quantity)
//! - `RecipeComputedProperties` — one property vector set per recipe
//! - `CuisineRecipe` — aggregation input row with optional weighting metadata
//! - `CuisineAggregateProperties` — per-cuisine aggregate with signatures
//! - `GlobalBaseline` — read-mostly reference mean/variance
//! - `Signature`, `PlanetaryPattern` — analysis outputs
//! - `Dimension` — the eight elemental + alchemical dimensions

use crate::alchemy::{AlchemicalProperty, AlchemicalVector, ThermodynamicMetrics};
use crate::astrology::Planet;
use crate::elements::{Element, ElementalVector};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One of the eight statistical dimensions (four elemental, four alchemical)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Dimension {
    Elemental(Element),
    Alchemical(AlchemicalProperty),
}

impl Dimension {
    /// All dimensions in canonical order (elemental first, then alchemical)
    ///
    /// The derived `Ord` follows this order, which is what deterministic
    /// tie-breaking in the analyzers relies on.
    pub const ALL: [Dimension; 8] = [
        Dimension::Elemental(Element::Fire),
        Dimension::Elemental(Element::Water),
        Dimension::Elemental(Element::Earth),
        Dimension::Elemental(Element::Air),
        Dimension::Alchemical(AlchemicalProperty::Spirit),
        Dimension::Alchemical(AlchemicalProperty::Essence),
        Dimension::Alchemical(AlchemicalProperty::Matter),
        Dimension::Alchemical(AlchemicalProperty::Substance),
    ];

    /// Display name ("Fire" ... "Substance")
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Elemental(e) => e.as_str(),
            Dimension::Alchemical(a) => a.as_str(),
        }
    }

    /// Read this dimension's component out of a vector pair
    pub fn component(&self, elemental: &ElementalVector, alchemical: &AlchemicalVector) -> f64 {
        match self {
            Dimension::Elemental(e) => elemental.get(*e),
            Dimension::Alchemical(a) => alchemical.get(*a),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream ingredient row: property vectors plus quantity
///
/// Supplied per invocation by the external ingredient database; the core
/// never looks ingredients up itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient UUID
    pub id: Uuid,
    /// Human-readable name
    pub name: String,
    /// Elemental property vector
    pub elemental: ElementalVector,
    /// Alchemical property vector
    #[serde(default)]
    pub alchemical: AlchemicalVector,
    /// Quantity in recipe units; missing quantity weighs as 1.0
    #[serde(default)]
    pub quantity: Option<f64>,
}

/// Computed property vectors for a single recipe
///
/// Ephemeral output of the recipe property computer; never persisted by the
/// core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeComputedProperties {
    /// Recipe UUID
    pub recipe_id: Uuid,
    /// Aggregated elemental vector (non-negative)
    pub elemental: ElementalVector,
    /// Aggregated alchemical vector (non-negative)
    pub alchemical: AlchemicalVector,
    /// Derived thermodynamic metrics
    pub thermodynamic: ThermodynamicMetrics,
    /// Planets most influential in this recipe's modifier pass, strongest first
    pub dominant_planets: Vec<Planet>,
    /// Contributing ingredient ids, in input order
    pub source_ingredient_ids: Vec<Uuid>,
    /// Applied cooking method ids, in application order
    pub source_cooking_method_ids: Vec<Uuid>,
    /// Non-fatal data-quality notes (empty ingredient list, skipped methods)
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Aggregation input row: computed properties plus optional weighting metadata
///
/// `popularity` feeds the by-popularity weighting strategy, `prepared_at` the
/// by-recency strategy. Both default to a weight of 1.0 when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineRecipe {
    pub properties: RecipeComputedProperties,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub prepared_at: Option<DateTime<Utc>>,
}

impl From<RecipeComputedProperties> for CuisineRecipe {
    fn from(properties: RecipeComputedProperties) -> Self {
        Self {
            properties,
            popularity: None,
            prepared_at: None,
        }
    }
}

/// Per-cuisine aggregate: weighted means and variances plus analysis results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineAggregateProperties {
    pub cuisine_name: String,
    pub mean_elemental: ElementalVector,
    pub variance_elemental: ElementalVector,
    pub mean_alchemical: AlchemicalVector,
    pub variance_alchemical: AlchemicalVector,
    /// Number of recipes aggregated
    pub recipe_count: usize,
    /// Bounded sample of contributing recipe ids, for traceability
    pub sample_recipe_ids: Vec<Uuid>,
    /// Distinctive dimensions vs. the global baseline (signature detector)
    #[serde(default)]
    pub signatures: Vec<Signature>,
    /// Planet / dimension correlations (pattern analyzer)
    #[serde(default)]
    pub planetary_patterns: Vec<PlanetaryPattern>,
}

impl CuisineAggregateProperties {
    /// Mean value along one dimension
    pub fn mean(&self, dimension: Dimension) -> f64 {
        dimension.component(&self.mean_elemental, &self.mean_alchemical)
    }

    /// Variance along one dimension
    pub fn variance(&self, dimension: Dimension) -> f64 {
        dimension.component(&self.variance_elemental, &self.variance_alchemical)
    }
}

/// Global reference mean/variance per dimension
///
/// Caller-supplied and read-mostly; the core never mutates it. Either the
/// fixed neutral default or the converted aggregate of all cuisines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalBaseline {
    pub mean_elemental: ElementalVector,
    pub variance_elemental: ElementalVector,
    pub mean_alchemical: AlchemicalVector,
    pub variance_alchemical: AlchemicalVector,
}

/// Default baseline variance for the fixed neutral reference
const NEUTRAL_BASELINE_VARIANCE: f64 = 0.02;

impl GlobalBaseline {
    /// Fixed neutral reference: balanced means, uniform small variance
    pub fn neutral() -> Self {
        Self {
            mean_elemental: ElementalVector::neutral(),
            variance_elemental: ElementalVector::ONES.scaled(NEUTRAL_BASELINE_VARIANCE),
            mean_alchemical: AlchemicalVector::neutral(),
            variance_alchemical: {
                let mut v = AlchemicalVector::ZERO;
                for property in AlchemicalProperty::ALL {
                    v.set(property, NEUTRAL_BASELINE_VARIANCE);
                }
                v
            },
        }
    }

    /// Derive a baseline from an all-cuisine aggregate
    ///
    /// Supports the feed-the-aggregator-back construction: run the
    /// aggregator once over every recipe of every cuisine, then convert.
    pub fn from_aggregate(aggregate: &CuisineAggregateProperties) -> Self {
        Self {
            mean_elemental: aggregate.mean_elemental,
            variance_elemental: aggregate.variance_elemental,
            mean_alchemical: aggregate.mean_alchemical,
            variance_alchemical: aggregate.variance_alchemical,
        }
    }

    /// Baseline mean along one dimension
    pub fn mean(&self, dimension: Dimension) -> f64 {
        dimension.component(&self.mean_elemental, &self.mean_alchemical)
    }

    /// Baseline variance along one dimension
    pub fn variance(&self, dimension: Dimension) -> f64 {
        dimension.component(&self.variance_elemental, &self.variance_alchemical)
    }

    /// First dimension holding a non-finite component, if any
    pub fn first_non_finite(&self) -> Option<Dimension> {
        Dimension::ALL.into_iter().find(|d| {
            !self.mean(*d).is_finite() || !self.variance(*d).is_finite()
        })
    }
}

impl Default for GlobalBaseline {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Direction of a signature deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    High,
    Low,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::High => write!(f, "high"),
            Direction::Low => write!(f, "low"),
        }
    }
}

/// A dimension where a cuisine significantly deviates from the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub dimension: Dimension,
    /// Cuisine mean along the dimension
    pub cuisine_value: f64,
    /// Baseline mean along the dimension
    pub baseline_value: f64,
    /// Standardized deviation (signed)
    pub deviation_score: f64,
    /// [0, 1]; 0.0 when confidence scoring is disabled
    pub confidence: f64,
    pub direction: Direction,
}

/// A descriptive planet / dimension correlation
///
/// Correlational only; no causal claim is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryPattern {
    pub planet: Planet,
    /// Normalized deviation magnitude in [0, 1]
    pub strength: f64,
    /// Dimension with the largest absolute deviation
    pub affected_dimension: Dimension,
    #[serde(default)]
    pub cultural_note: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
