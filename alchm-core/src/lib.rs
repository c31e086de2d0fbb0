//! # Alchm Core Engine
//!
//! The computation pipeline for per-recipe property vectors and per-cuisine
//! statistical signatures:
//!
//! 1. **Recipe property computer** ([`compute`]) — ingredient weighting,
//!    ordered cooking-method transformations, planetary modifiers,
//!    thermodynamic derivation. Runs once per recipe.
//! 2. **Cuisine aggregator** ([`aggregate`]) — weighted mean/variance across
//!    a cuisine's recipe vectors.
//! 3. **Signature detector** ([`signature`]) — flags dimensions where a
//!    cuisine deviates significantly from the global baseline.
//! 4. **Planetary pattern analyzer** ([`patterns`]) — correlates dominant
//!    planets with deviations from the cuisine mean.
//! 5. **Cultural influence adjuster** ([`cultural`]) — declarative
//!    per-dimension offsets, applied at most once per pipeline run.
//! 6. **Computation caches** ([`cache`]) — identity-keyed memoization of
//!    cuisine aggregates and recipe computations.
//!
//! All computation is synchronous and pure aside from optional cache writes;
//! independent cuisines may be processed in parallel. The caches are the only
//! shared mutable state. Ambient inputs (global baseline, caches) are passed
//! as explicit parameters, never module-level singletons.

pub mod aggregate;
pub mod cache;
pub mod compute;
pub mod config;
pub mod cultural;
pub mod patterns;
pub mod signature;

pub use aggregate::compute_cuisine_properties;
pub use cache::{CacheMetadata, CuisineCache, RecipeCache};
pub use compute::{RecipeContext, RecipePropertyComputer};
pub use config::{
    AdjustmentMode, AggregationOptions, ComputeOptions, CulturalInfluenceConfig, PatternOptions,
    QuantityScaling, SignatureOptions, WeightingStrategy,
};
pub use cultural::apply_cultural_influences;
pub use patterns::analyze_planetary_patterns;
pub use signature::identify_cuisine_signatures;
