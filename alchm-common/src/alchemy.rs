//! Alchemical property vectors and thermodynamic metric derivation
//!
//! The four alchemical quantities {Spirit, Essence, Matter, Substance} form a
//! secondary qualitative vector alongside the elemental one. The
//! thermodynamic metrics {heat, entropy, reactivity, energy} are scalars
//! derived from pairwise combinations of both vectors.
//!
//! **[ALC-THM-010]** Thermodynamic derivation formulas
//! **[ALC-THM-020]** `energy` is a composite of heat, entropy, and reactivity

use crate::elements::ElementalVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Denominator floor for the thermodynamic quotients
const DENOMINATOR_EPSILON: f64 = 1e-6;

/// The four alchemical quantities
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AlchemicalProperty {
    Spirit,
    Essence,
    Matter,
    Substance,
}

impl AlchemicalProperty {
    /// All properties in canonical order
    pub const ALL: [AlchemicalProperty; 4] = [
        AlchemicalProperty::Spirit,
        AlchemicalProperty::Essence,
        AlchemicalProperty::Matter,
        AlchemicalProperty::Substance,
    ];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            AlchemicalProperty::Spirit => "Spirit",
            AlchemicalProperty::Essence => "Essence",
            AlchemicalProperty::Matter => "Matter",
            AlchemicalProperty::Substance => "Substance",
        }
    }
}

impl fmt::Display for AlchemicalProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alchemical property vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlchemicalVector {
    #[serde(rename = "Spirit", default)]
    pub spirit: f64,
    #[serde(rename = "Essence", default)]
    pub essence: f64,
    #[serde(rename = "Matter", default)]
    pub matter: f64,
    #[serde(rename = "Substance", default)]
    pub substance: f64,
}

impl AlchemicalVector {
    /// All-zero vector
    pub const ZERO: AlchemicalVector = AlchemicalVector {
        spirit: 0.0,
        essence: 0.0,
        matter: 0.0,
        substance: 0.0,
    };

    pub fn new(spirit: f64, essence: f64, matter: f64, substance: f64) -> Self {
        Self {
            spirit,
            essence,
            matter,
            substance,
        }
    }

    /// Balanced neutral profile (0.25 per quantity)
    pub fn neutral() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }

    pub fn get(&self, property: AlchemicalProperty) -> f64 {
        match property {
            AlchemicalProperty::Spirit => self.spirit,
            AlchemicalProperty::Essence => self.essence,
            AlchemicalProperty::Matter => self.matter,
            AlchemicalProperty::Substance => self.substance,
        }
    }

    pub fn set(&mut self, property: AlchemicalProperty, value: f64) {
        match property {
            AlchemicalProperty::Spirit => self.spirit = value,
            AlchemicalProperty::Essence => self.essence = value,
            AlchemicalProperty::Matter => self.matter = value,
            AlchemicalProperty::Substance => self.substance = value,
        }
    }

    /// Component-wise sum with another vector
    pub fn add(&self, other: &AlchemicalVector) -> Self {
        Self::new(
            self.spirit + other.spirit,
            self.essence + other.essence,
            self.matter + other.matter,
            self.substance + other.substance,
        )
    }

    /// Accumulate `other * weight` into this vector
    pub fn add_scaled(&mut self, other: &AlchemicalVector, weight: f64) {
        self.spirit += other.spirit * weight;
        self.essence += other.essence * weight;
        self.matter += other.matter * weight;
        self.substance += other.substance * weight;
    }

    /// Uniformly scaled copy
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.spirit * factor,
            self.essence * factor,
            self.matter * factor,
            self.substance * factor,
        )
    }

    /// Clamp every component to >= 0
    pub fn clamp_non_negative(&self) -> Self {
        Self::new(
            self.spirit.max(0.0),
            self.essence.max(0.0),
            self.matter.max(0.0),
            self.substance.max(0.0),
        )
    }

    /// Clamp every component to the [0, 1] range
    pub fn clamp_unit(&self) -> Self {
        Self::new(
            self.spirit.clamp(0.0, 1.0),
            self.essence.clamp(0.0, 1.0),
            self.matter.clamp(0.0, 1.0),
            self.substance.clamp(0.0, 1.0),
        )
    }

    /// Sum of all components
    pub fn total(&self) -> f64 {
        self.spirit + self.essence + self.matter + self.substance
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.spirit.is_finite()
            && self.essence.is_finite()
            && self.matter.is_finite()
            && self.substance.is_finite()
    }

    /// Iterate (property, value) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (AlchemicalProperty, f64)> + '_ {
        AlchemicalProperty::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// Derived thermodynamic metrics
///
/// Scalars computed from pairwise combinations of the elemental and
/// alchemical vectors. `heat`, `entropy`, and `reactivity` are quotients of
/// squared "active" components over squared "stabilizing" components;
/// `energy` composes the three.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermodynamicMetrics {
    pub heat: f64,
    pub entropy: f64,
    pub reactivity: f64,
    pub energy: f64,
}

impl ThermodynamicMetrics {
    /// Derive all four metrics from an elemental + alchemical vector pair
    ///
    /// **[ALC-THM-010]** Quotient-of-squares forms:
    /// - heat       = (Spirit² + Fire²) / (Substance + Essence + Matter + Water + Air + Earth)²
    /// - entropy    = (Spirit² + Substance² + Fire² + Air²) / (Essence + Matter + Earth + Water)²
    /// - reactivity = (Spirit² + Substance² + Essence² + Fire² + Air² + Water²) / (Matter + Earth)²
    ///
    /// **[ALC-THM-020]** energy = heat − entropy × reactivity
    ///
    /// Denominators are floored at a small epsilon; near-zero stabilizing
    /// mass yields large but finite metrics, never a division error.
    pub fn derive(elemental: &ElementalVector, alchemical: &AlchemicalVector) -> Self {
        let e = elemental;
        let a = alchemical;

        let heat_num = a.spirit.powi(2) + e.fire.powi(2);
        let heat_den = (a.substance + a.essence + a.matter + e.water + e.air + e.earth).powi(2);
        let heat = heat_num / heat_den.max(DENOMINATOR_EPSILON);

        let entropy_num = a.spirit.powi(2) + a.substance.powi(2) + e.fire.powi(2) + e.air.powi(2);
        let entropy_den = (a.essence + a.matter + e.earth + e.water).powi(2);
        let entropy = entropy_num / entropy_den.max(DENOMINATOR_EPSILON);

        let reactivity_num = a.spirit.powi(2)
            + a.substance.powi(2)
            + a.essence.powi(2)
            + e.fire.powi(2)
            + e.air.powi(2)
            + e.water.powi(2);
        let reactivity_den = (a.matter + e.earth).powi(2);
        let reactivity = reactivity_num / reactivity_den.max(DENOMINATOR_EPSILON);

        let energy = heat - entropy * reactivity;

        Self {
            heat,
            entropy,
            reactivity,
            energy,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
