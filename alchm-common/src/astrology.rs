//! Planetary and zodiac reference data
//!
//! **[ALC-AST-010]** Planetary mass weights — NASA fact-sheet masses,
//! log₁₀-normalized to [0, 1] (Pluto → 0.0, Sun → 1.0) so the gas giants do
//! not dominate score multiplications.
//! **[ALC-AST-020]** Zodiac triplicities — each sign maps to one element.

use crate::elements::Element;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Planetary bodies recognized by the modifier pass
///
/// Earth carries a mass constant as the relative-mass reference but is not a
/// scoring planet in upstream position snapshots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    /// All planets in canonical order (used for deterministic iteration)
    pub const ALL: [Planet; 11] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    /// Raw mass in kilograms (NASA planetary fact sheets)
    pub fn mass_kg(&self) -> f64 {
        match self {
            Planet::Sun => 1.989e30,
            Planet::Moon => 7.342e22,
            Planet::Mercury => 3.285e23,
            Planet::Venus => 4.867e24,
            Planet::Earth => 5.972e24,
            Planet::Mars => 6.390e23,
            Planet::Jupiter => 1.898e27,
            Planet::Saturn => 5.683e26,
            Planet::Uranus => 8.681e25,
            Planet::Neptune => 1.024e26,
            Planet::Pluto => 1.309e22,
        }
    }

    /// Mass relative to Earth (Earth = 1.0)
    pub fn mass_relative(&self) -> f64 {
        self.mass_kg() / Planet::Earth.mass_kg()
    }

    /// Log-normalized mass weight in [0, 1]
    ///
    /// **[ALC-AST-010]** (log₁₀(relative) − log₁₀(Pluto)) / (log₁₀(Sun) − log₁₀(Pluto))
    pub fn normalized_weight(&self) -> f64 {
        static WEIGHTS: Lazy<HashMap<Planet, f64>> = Lazy::new(|| {
            let log_min = Planet::Pluto.mass_relative().log10();
            let log_max = Planet::Sun.mass_relative().log10();
            let log_range = log_max - log_min;
            Planet::ALL
                .into_iter()
                .map(|p| (p, (p.mass_relative().log10() - log_min) / log_range))
                .collect()
        });
        WEIGHTS[self]
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zodiac signs
///
/// Serialized lowercase per the upstream ephemeris service convention
/// ("aries", "taurus", ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// All signs in ecliptic order
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Elemental triplicity of this sign
    ///
    /// **[ALC-AST-020]** Fire: Aries/Leo/Sagittarius, Earth:
    /// Taurus/Virgo/Capricorn, Air: Gemini/Libra/Aquarius, Water:
    /// Cancer/Scorpio/Pisces.
    pub fn element(&self) -> Element {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => Element::Fire,
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => Element::Earth,
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => Element::Air,
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => Element::Water,
        }
    }
}

/// Planetary position snapshot: planet → zodiac sign
///
/// Supplied per invocation by the external ephemeris service. Planets absent
/// from the snapshot are excluded from the modifier pass.
pub type PlanetaryPositions = HashMap<Planet, ZodiacSign>;

// ============================================================================
// Tests
// ============================================================================
