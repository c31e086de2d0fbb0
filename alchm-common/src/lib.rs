//! # Alchm Common Library
//!
//! Shared code for the alchm computational core:
//! - Elemental and alchemical property vectors
//! - Thermodynamic metric derivation
//! - Planetary and zodiac reference data
//! - Cooking method transformation definitions
//! - Recipe / cuisine aggregate / signature / pattern types
//! - Error types

pub mod alchemy;
pub mod astrology;
pub mod cooking;
pub mod elements;
pub mod error;
pub mod properties;

pub use error::{Error, Result};
