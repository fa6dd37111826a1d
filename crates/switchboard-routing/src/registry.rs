//! Model registry snapshots.
//!
//! A [`ModelRegistry`] is an immutable, validated snapshot of every invocable
//! model. The [`RegistryHandle`] publishes new snapshots atomically; readers
//! pin one snapshot per routing call and never take a lock.
use arc_swap::ArcSwap;
use std::collections::BTreeMap;
use std::collections::btree_map::Values;
use std::sync::Arc;
use switchboard_core::{Error, ModelKey, ModelMetadata, Result};
use tracing::info;

/// Immutable snapshot of model metadata keyed by `(provider, model)`.
///
/// Iteration order follows [`ModelKey`] ordering, so everything derived from
/// a snapshot is deterministic.
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    /// Validated entries (never mutated after construction)
    models: BTreeMap<ModelKey, ModelMetadata>,
}

impl ModelRegistry {
    /// Builds a snapshot from metadata records.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if any record is invalid or if two
    /// records share the same `(provider, model)` key.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ModelMetadata>,
    {
        let mut models = BTreeMap::new();
        for entry in entries {
            entry.validate()?;
            let key = entry.key();
            if models.contains_key(&key) {
                return Err(Error::Configuration(format!(
                    "duplicate model entry '{key}'"
                )));
            }
            models.insert(key, entry);
        }
        Ok(Self { models })
    }

    /// Creates an empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a model by key.
    pub fn get(&self, key: &ModelKey) -> Option<&ModelMetadata> {
        self.models.get(key)
    }

    /// Looks up a model by provider and model name.
    pub fn find(&self, provider: &str, model: &str) -> Option<&ModelMetadata> {
        self.models.get(&ModelKey::new(provider, model))
    }

    /// Whether the snapshot contains the key.
    pub fn contains(&self, key: &ModelKey) -> bool {
        self.models.contains_key(key)
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> Values<'_, ModelKey, ModelMetadata> {
        self.models.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Distinct provider names in sorted order.
    pub fn providers(&self) -> Vec<&str> {
        let mut providers: Vec<&str> = self.models.keys().map(|key| key.provider.as_str()).collect();
        providers.dedup();
        providers
    }
}

impl<'registry> IntoIterator for &'registry ModelRegistry {
    type Item = &'registry ModelMetadata;
    type IntoIter = Values<'registry, ModelKey, ModelMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Shared, atomically swappable pointer to the current registry snapshot.
#[derive(Debug)]
pub struct RegistryHandle {
    current: ArcSwap<ModelRegistry>,
}

impl RegistryHandle {
    /// Creates a handle publishing the given snapshot.
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
        }
    }

    /// Returns the current snapshot.
    ///
    /// The returned `Arc` stays valid after later publishes.
    pub fn snapshot(&self) -> Arc<ModelRegistry> {
        self.current.load_full()
    }

    /// Atomically replaces the current snapshot.
    pub fn publish(&self, registry: ModelRegistry) {
        let size = registry.len();
        self.current.store(Arc::new(registry));
        info!(models = size, "Published model registry snapshot");
    }

    /// Validates records into a new snapshot and publishes it.
    ///
    /// The current snapshot is left untouched when validation fails.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] for invalid or duplicate records.
    pub fn refresh<I>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = ModelMetadata>,
    {
        let registry = ModelRegistry::new(entries)?;
        self.publish(registry);
        Ok(())
    }
}

impl Default for RegistryHandle {
    fn default() -> Self {
        Self::new(ModelRegistry::empty())
    }
}
