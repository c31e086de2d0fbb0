//! Computation caches
//!
//! Two identity-keyed memoization stores:
//! - [`CuisineCache`] — per-cuisine aggregates, keyed by cuisine name,
//!   validated against the caller's current dependency recipe-id set.
//! - [`RecipeCache`] — per-recipe computations, keyed by an input
//!   fingerprint.
//!
//! **[ALC-CCH-010]** A cuisine entry is returned only when its stored
//! dependency set equals the caller's current set exactly; any mismatch is a
//! miss, never a stale return. There is no TTL and no partial update.
//!
//! Usage is batch-oriented, so one coarse `RwLock` per cache suffices;
//! cuisine keys are disjoint, and a poisoned lock degrades to the inner
//! value rather than panicking.

use alchm_common::properties::{CuisineAggregateProperties, RecipeComputedProperties};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Per-entry bookkeeping recorded at `set` time
#[derive(Debug, Clone, PartialEq)]
pub struct CacheMetadata {
    /// When the cached aggregate was computed
    pub computed_at: DateTime<Utc>,
}

impl Default for CacheMetadata {
    fn default() -> Self {
        Self {
            computed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
struct CuisineEntry {
    value: CuisineAggregateProperties,
    metadata: CacheMetadata,
    dependency_recipe_ids: HashSet<Uuid>,
}

/// Identity-keyed cache of per-cuisine aggregate results
#[derive(Debug, Default)]
pub struct CuisineCache {
    entries: RwLock<HashMap<String, CuisineEntry>>,
}

impl CuisineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached aggregate for `cuisine`, or a miss
    ///
    /// A hit requires set-equality between the stored dependency recipe ids
    /// and `dependency_recipe_ids`; anything else (absent entry, grown,
    /// shrunk, or substituted set) is a miss requiring full recomputation.
    pub fn get(
        &self,
        cuisine: &str,
        dependency_recipe_ids: &HashSet<Uuid>,
    ) -> Option<CuisineAggregateProperties> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(cuisine)?;
        if entry.dependency_recipe_ids == *dependency_recipe_ids {
            debug!(cuisine, "Cuisine cache hit");
            Some(entry.value.clone())
        } else {
            debug!(
                cuisine,
                stored = entry.dependency_recipe_ids.len(),
                current = dependency_recipe_ids.len(),
                "Cuisine cache miss: dependency set changed"
            );
            None
        }
    }

    /// Metadata for a cached cuisine, regardless of dependency validity
    pub fn metadata(&self, cuisine: &str) -> Option<CacheMetadata> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(cuisine).map(|e| e.metadata.clone())
    }

    /// Store (or replace) a cuisine's aggregate
    pub fn set(
        &self,
        cuisine: impl Into<String>,
        value: CuisineAggregateProperties,
        metadata: CacheMetadata,
        dependency_recipe_ids: HashSet<Uuid>,
    ) {
        let cuisine = cuisine.into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        debug!(cuisine = %cuisine, dependencies = dependency_recipe_ids.len(), "Cuisine cached");
        entries.insert(
            cuisine,
            CuisineEntry {
                value,
                metadata,
                dependency_recipe_ids,
            },
        );
    }

    /// Drop one cuisine's entry; returns whether an entry existed
    pub fn invalidate(&self, cuisine: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(cuisine).is_some()
    }

    /// Drop every entry
    pub fn clear_all(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fingerprint-keyed cache of per-recipe computations
///
/// Keys are SHA-256 hex fingerprints of every input affecting the output
/// (see the recipe property computer); identical inputs across different
/// recipe ids share one entry.
#[derive(Debug, Default)]
pub struct RecipeCache {
    entries: RwLock<HashMap<String, RecipeComputedProperties>>,
}

impl RecipeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fingerprint: &str) -> Option<RecipeComputedProperties> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(fingerprint).cloned()
    }

    pub fn store(&self, fingerprint: String, value: RecipeComputedProperties) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(fingerprint, value);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alchm_common::alchemy::AlchemicalVector;
    use alchm_common::elements::ElementalVector;

    fn aggregate(name: &str) -> CuisineAggregateProperties {
        CuisineAggregateProperties {
            cuisine_name: name.into(),
            mean_elemental: ElementalVector::new(0.4, 0.2, 0.2, 0.2),
            variance_elemental: ElementalVector::ZERO,
            mean_alchemical: AlchemicalVector::neutral(),
            variance_alchemical: AlchemicalVector::ZERO,
            recipe_count: 2,
            sample_recipe_ids: vec![],
            signatures: vec![],
            planetary_patterns: vec![],
        }
    }

    #[test]
    fn test_get_with_matching_deps_returns_value_unchanged() {
        let cache = CuisineCache::new();
        let deps: HashSet<Uuid> = [Uuid::new_v4(), Uuid::new_v4()].into();
        let value = aggregate("thai");
        cache.set("thai", value.clone(), CacheMetadata::default(), deps.clone());

        assert_eq!(cache.get("thai", &deps), Some(value));
    }

    #[test]
    fn test_different_dep_set_is_a_miss() {
        let cache = CuisineCache::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let stored: HashSet<Uuid> = [a, b].into();
        cache.set("thai", aggregate("thai"), CacheMetadata::default(), stored);

        let grown: HashSet<Uuid> = [a, b, Uuid::new_v4()].into();
        let shrunk: HashSet<Uuid> = [a].into();
        let substituted: HashSet<Uuid> = [a, Uuid::new_v4()].into();
        assert!(cache.get("thai", &grown).is_none());
        assert!(cache.get("thai", &shrunk).is_none());
        assert!(cache.get("thai", &substituted).is_none());
        assert!(cache.get("unknown", &HashSet::new()).is_none());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = CuisineCache::new();
        cache.set("thai", aggregate("thai"), CacheMetadata::default(), HashSet::new());
        cache.set("oaxacan", aggregate("oaxacan"), CacheMetadata::default(), HashSet::new());
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate("thai"));
        assert!(!cache.invalidate("thai"), "second invalidate finds nothing");
        assert_eq!(cache.len(), 1);

        cache.clear_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_replaces_existing_entry() {
        let cache = CuisineCache::new();
        let deps: HashSet<Uuid> = [Uuid::new_v4()].into();
        cache.set("thai", aggregate("thai"), CacheMetadata::default(), deps.clone());

        let mut updated = aggregate("thai");
        updated.recipe_count = 99;
        cache.set("thai", updated.clone(), CacheMetadata::default(), deps.clone());

        assert_eq!(cache.get("thai", &deps).unwrap().recipe_count, 99);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_metadata_is_recorded() {
        let cache = CuisineCache::new();
        let metadata = CacheMetadata::default();
        cache.set("thai", aggregate("thai"), metadata.clone(), HashSet::new());
        assert_eq!(cache.metadata("thai"), Some(metadata));
        assert!(cache.metadata("unknown").is_none());
    }

    #[test]
    fn test_concurrent_access_from_multiple_threads() {
        use std::sync::Arc;

        let cache = Arc::new(CuisineCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    // Disjoint keys per thread, as in a real cuisine batch.
                    let name = format!("cuisine-{i}");
                    let deps: HashSet<Uuid> = [Uuid::new_v4()].into();
                    cache.set(name.clone(), aggregate(&name), CacheMetadata::default(), deps.clone());
                    assert!(cache.get(&name, &deps).is_some());
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
    }
}
