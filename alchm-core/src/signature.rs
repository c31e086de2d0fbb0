//! Cuisine signature detector
//!
//! Compares a cuisine aggregate to the global baseline and flags the
//! dimensions where the cuisine is statistically distinctive.
//!
//! **[ALC-SIG-010]** deviation = (cuisine mean − baseline mean) /
//! √(baseline variance + ε); a signature exists only when |deviation| ≥
//! threshold.
//! **[ALC-SIG-020]** Output ordering is deterministic: |deviation|
//! descending, ties broken by dimension order.

use crate::config::SignatureOptions;
use alchm_common::properties::{
    CuisineAggregateProperties, Dimension, Direction, GlobalBaseline, Signature,
};
use alchm_common::{Error, Result};
use tracing::debug;

/// Variance floor preventing division blow-ups on near-constant baselines
const BASELINE_VARIANCE_EPSILON: f64 = 1e-6;

/// Below this sample count, confidence is capped regardless of deviation
const MIN_SAMPLE_FLOOR: usize = 5;

/// Confidence ceiling applied under the minimum sample floor
const LOW_SAMPLE_CONFIDENCE_CEILING: f64 = 0.4;

/// Detect the dimensions where a cuisine deviates from the baseline
pub fn identify_cuisine_signatures(
    cuisine: &CuisineAggregateProperties,
    baseline: &GlobalBaseline,
    options: &SignatureOptions,
) -> Result<Vec<Signature>> {
    if let Some(dimension) = baseline.first_non_finite() {
        return Err(Error::MissingDimension {
            cuisine: "global-baseline".to_string(),
            dimension,
        });
    }
    if let Some(dimension) = Dimension::ALL
        .into_iter()
        .find(|d| !cuisine.mean(*d).is_finite())
    {
        return Err(Error::MissingDimension {
            cuisine: cuisine.cuisine_name.clone(),
            dimension,
        });
    }

    let mut signatures = Vec::new();
    for dimension in Dimension::ALL {
        let cuisine_value = cuisine.mean(dimension);
        let baseline_value = baseline.mean(dimension);
        let baseline_variance = baseline.variance(dimension);

        let deviation = (cuisine_value - baseline_value)
            / (baseline_variance + BASELINE_VARIANCE_EPSILON).sqrt();
        if deviation.abs() < options.threshold {
            continue;
        }

        let confidence = if options.include_confidence {
            confidence_score(deviation.abs(), cuisine.recipe_count)
        } else {
            0.0
        };

        signatures.push(Signature {
            dimension,
            cuisine_value,
            baseline_value,
            deviation_score: deviation,
            confidence,
            direction: if deviation > 0.0 {
                Direction::High
            } else {
                Direction::Low
            },
        });
    }

    signatures.sort_by(|a, b| {
        b.deviation_score
            .abs()
            .partial_cmp(&a.deviation_score.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.dimension.cmp(&b.dimension))
    });

    debug!(
        cuisine = %cuisine.cuisine_name,
        signature_count = signatures.len(),
        threshold = options.threshold,
        "Signature detection complete"
    );
    Ok(signatures)
}

/// Confidence in a signature, monotonic in deviation magnitude and sample
/// size, bounded [0, 1]
///
/// Product of two saturating exponentials:
/// `(1 − e^(−|z|/2)) × (1 − e^(−n/10))`. Below [`MIN_SAMPLE_FLOOR`] recipes
/// the result is additionally capped at [`LOW_SAMPLE_CONFIDENCE_CEILING`].
fn confidence_score(abs_deviation: f64, recipe_count: usize) -> f64 {
    let deviation_part = 1.0 - (-abs_deviation / 2.0).exp();
    let sample_part = 1.0 - (-(recipe_count as f64) / 10.0).exp();
    let confidence = (deviation_part * sample_part).clamp(0.0, 1.0);
    if recipe_count < MIN_SAMPLE_FLOOR {
        confidence.min(LOW_SAMPLE_CONFIDENCE_CEILING)
    } else {
        confidence
    }
}

// ============================================================================
// Tests
// ============================================================================
