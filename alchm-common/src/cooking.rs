//! Cooking method transformation definitions
//!
//! A cooking method is a vector transformation applied to a recipe's
//! in-progress property vectors: a component-wise elemental scale, then an
//! elemental shift, then an additive alchemical shift. Method definitions
//! come from an external registry keyed by method id; the core only applies
//! them.

use crate::alchemy::AlchemicalVector;
use crate::elements::ElementalVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A single cooking method transformation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingMethod {
    /// Method UUID (registry key)
    pub id: Uuid,
    /// Human-readable name ("roasting", "fermenting", ...)
    pub name: String,
    /// Component-wise elemental multipliers (1.0 = no change)
    #[serde(default = "scale_identity")]
    pub elemental_scale: ElementalVector,
    /// Additive elemental offsets applied after scaling
    #[serde(default)]
    pub elemental_shift: ElementalVector,
    /// Additive alchemical offsets
    #[serde(default)]
    pub alchemical_shift: AlchemicalVector,
}

fn scale_identity() -> ElementalVector {
    ElementalVector::ONES
}

impl CookingMethod {
    /// Identity transformation with the given id and name
    pub fn identity(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            elemental_scale: ElementalVector::ONES,
            elemental_shift: ElementalVector::ZERO,
            alchemical_shift: AlchemicalVector::ZERO,
        }
    }

    /// Apply this transformation in place: scale, then shift
    pub fn apply(&self, elemental: &mut ElementalVector, alchemical: &mut AlchemicalVector) {
        *elemental = elemental.multiply(&self.elemental_scale).add(&self.elemental_shift);
        *alchemical = alchemical.add(&self.alchemical_shift);
    }
}

/// Id-keyed cooking method lookup, supplied by the external method registry
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    methods: HashMap<Uuid, CookingMethod>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, method: CookingMethod) {
        self.methods.insert(method.id, method);
    }

    pub fn get(&self, id: &Uuid) -> Option<&CookingMethod> {
        self.methods.get(id)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl FromIterator<CookingMethod> for MethodRegistry {
    fn from_iter<I: IntoIterator<Item = CookingMethod>>(iter: I) -> Self {
        let mut registry = Self::new();
        for method in iter {
            registry.insert(method);
        }
        registry
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_leaves_vectors_unchanged() {
        let method = CookingMethod::identity(Uuid::new_v4(), "resting");
        let mut elemental = ElementalVector::new(0.3, 0.3, 0.2, 0.2);
        let mut alchemical = AlchemicalVector::neutral();
        let before = (elemental, alchemical);
        method.apply(&mut elemental, &mut alchemical);
        assert_eq!((elemental, alchemical), before);
    }

    #[test]
    fn test_apply_scales_then_shifts() {
        let method = CookingMethod {
            id: Uuid::new_v4(),
            name: "roasting".into(),
            elemental_scale: ElementalVector::new(2.0, 0.5, 1.0, 1.0),
            elemental_shift: ElementalVector::new(0.1, 0.0, 0.0, 0.0),
            alchemical_shift: AlchemicalVector::new(0.05, 0.0, 0.0, 0.0),
        };
        let mut elemental = ElementalVector::new(0.2, 0.4, 0.2, 0.2);
        let mut alchemical = AlchemicalVector::ZERO;
        method.apply(&mut elemental, &mut alchemical);

        assert!((elemental.fire - 0.5).abs() < 1e-12, "0.2*2 + 0.1");
        assert!((elemental.water - 0.2).abs() < 1e-12, "0.4*0.5");
        assert!((alchemical.spirit - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_registry_lookup() {
        let method = CookingMethod::identity(Uuid::new_v4(), "steaming");
        let id = method.id;
        let registry: MethodRegistry = [method].into_iter().collect();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&id).is_some());
        assert!(registry.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_method_deserializes_with_defaults() {
        let json = format!(
            "{{\"id\": \"{}\", \"name\": \"poaching\"}}",
            Uuid::new_v4()
        );
        let method: CookingMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(method.elemental_scale, ElementalVector::ONES);
        assert_eq!(method.alchemical_shift, AlchemicalVector::ZERO);
    }
}
