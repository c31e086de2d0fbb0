//! Elemental property vectors
//!
//! The four classical elements {Fire, Water, Earth, Air} describe the
//! qualitative composition of an ingredient, recipe, or cuisine.
//!
//! **[ALC-ELM-010]** Every component is non-negative.
//! **[ALC-ELM-020]** The balanced "neutral" profile is 0.25 per element.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four classical elements
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
}

impl Element {
    /// All elements in canonical order (used for deterministic iteration)
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Earth, Element::Air];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Air => "Air",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elemental property vector
///
/// Serialized with capitalized field names ("Fire", "Water", ...) to match
/// the upstream ingredient database convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementalVector {
    #[serde(rename = "Fire", default)]
    pub fire: f64,
    #[serde(rename = "Water", default)]
    pub water: f64,
    #[serde(rename = "Earth", default)]
    pub earth: f64,
    #[serde(rename = "Air", default)]
    pub air: f64,
}

impl ElementalVector {
    /// All-zero vector
    pub const ZERO: ElementalVector = ElementalVector {
        fire: 0.0,
        water: 0.0,
        earth: 0.0,
        air: 0.0,
    };

    /// All-ones vector (identity for component-wise scaling)
    pub const ONES: ElementalVector = ElementalVector {
        fire: 1.0,
        water: 1.0,
        earth: 1.0,
        air: 1.0,
    };

    pub fn new(fire: f64, water: f64, earth: f64, air: f64) -> Self {
        Self {
            fire,
            water,
            earth,
            air,
        }
    }

    /// Balanced neutral profile (0.25 per element)
    ///
    /// **[ALC-ELM-020]** Used as the fallback for empty ingredient lists.
    pub fn neutral() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }

    /// Unit vector along a single element axis
    pub fn unit(element: Element) -> Self {
        let mut v = Self::ZERO;
        v.set(element, 1.0);
        v
    }

    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Earth => self.earth,
            Element::Air => self.air,
        }
    }

    pub fn set(&mut self, element: Element, value: f64) {
        match element {
            Element::Fire => self.fire = value,
            Element::Water => self.water = value,
            Element::Earth => self.earth = value,
            Element::Air => self.air = value,
        }
    }

    /// Component-wise sum with another vector
    pub fn add(&self, other: &ElementalVector) -> Self {
        Self::new(
            self.fire + other.fire,
            self.water + other.water,
            self.earth + other.earth,
            self.air + other.air,
        )
    }

    /// Accumulate `other * weight` into this vector
    pub fn add_scaled(&mut self, other: &ElementalVector, weight: f64) {
        self.fire += other.fire * weight;
        self.water += other.water * weight;
        self.earth += other.earth * weight;
        self.air += other.air * weight;
    }

    /// Component-wise product (used by cooking method scale factors)
    pub fn multiply(&self, other: &ElementalVector) -> Self {
        Self::new(
            self.fire * other.fire,
            self.water * other.water,
            self.earth * other.earth,
            self.air * other.air,
        )
    }

    /// Uniformly scaled copy
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.fire * factor,
            self.water * factor,
            self.earth * factor,
            self.air * factor,
        )
    }

    /// Clamp every component to >= 0
    ///
    /// **[ALC-ELM-010]** Non-negativity invariant.
    pub fn clamp_non_negative(&self) -> Self {
        Self::new(
            self.fire.max(0.0),
            self.water.max(0.0),
            self.earth.max(0.0),
            self.air.max(0.0),
        )
    }

    /// Clamp every component to the [0, 1] range
    pub fn clamp_unit(&self) -> Self {
        Self::new(
            self.fire.clamp(0.0, 1.0),
            self.water.clamp(0.0, 1.0),
            self.earth.clamp(0.0, 1.0),
            self.air.clamp(0.0, 1.0),
        )
    }

    /// Sum of all components
    pub fn total(&self) -> f64 {
        self.fire + self.water + self.earth + self.air
    }

    /// Element with the largest component (ties break in canonical order)
    pub fn dominant(&self) -> Element {
        let mut best = Element::Fire;
        let mut best_value = self.fire;
        for element in Element::ALL {
            let value = self.get(element);
            if value > best_value {
                best = element;
                best_value = value;
            }
        }
        best
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.fire.is_finite() && self.water.is_finite() && self.earth.is_finite() && self.air.is_finite()
    }

    /// Iterate (element, value) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        Element::ALL.into_iter().map(move |e| (e, self.get(e)))
    }
}

// ============================================================================
// Tests
// ============================================================================
