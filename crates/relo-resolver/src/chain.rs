use std::fmt;
use std::sync::Arc;

use relo_store::ArtifactStore;
use relo_types::{Artifact, ArtifactName};
use tracing::warn;

use crate::traits::Resolver;

/// An ordered, immutable snapshot of artifact stores.
///
/// Stores are held most-recently-added first, so the newest registrant wins
/// when several stores hold the same name (stack discipline). A chain is a
/// value object: it is never mutated after construction — [`with_store`]
/// and [`without_store`] build new chains, which is what makes a snapshot
/// safe to probe concurrently while its successor is being built.
///
/// Store identity is reference identity (`Arc::ptr_eq`); two distinct
/// stores with equal contents are still distinct chain entries.
///
/// [`with_store`]: StoreChain::with_store
/// [`without_store`]: StoreChain::without_store
#[derive(Clone)]
pub struct StoreChain {
    stores: Vec<Arc<dyn ArtifactStore>>,
}

impl StoreChain {
    /// The empty chain: every resolve misses.
    pub fn empty() -> Self {
        Self { stores: Vec::new() }
    }

    /// Build a chain from stores already in priority order (index 0
    /// highest).
    pub fn from_stores(stores: Vec<Arc<dyn ArtifactStore>>) -> Self {
        Self { stores }
    }

    /// A new chain with `store` at highest priority and this chain's stores
    /// shifted down one place.
    pub fn with_store(&self, store: Arc<dyn ArtifactStore>) -> Self {
        let mut stores = Vec::with_capacity(self.stores.len() + 1);
        stores.push(store);
        stores.extend(self.stores.iter().cloned());
        Self { stores }
    }

    /// A new chain without `store`, preserving the relative order of the
    /// remaining stores. Returns `None` if the store is not in this chain.
    pub fn without_store(&self, store: &Arc<dyn ArtifactStore>) -> Option<Self> {
        if !self.contains_store(store) {
            return None;
        }
        let stores = self
            .stores
            .iter()
            .filter(|s| !Arc::ptr_eq(s, store))
            .cloned()
            .collect();
        Some(Self { stores })
    }

    /// Whether `store` (by reference identity) is in this chain.
    pub fn contains_store(&self, store: &Arc<dyn ArtifactStore>) -> bool {
        self.stores.iter().any(|s| Arc::ptr_eq(s, store))
    }

    /// The stores in priority order.
    pub fn stores(&self) -> &[Arc<dyn ArtifactStore>] {
        &self.stores
    }

    /// Number of stores in the chain.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Returns `true` for the empty chain.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl Resolver for StoreChain {
    /// Probe stores in priority order and return the first hit.
    ///
    /// A store that errors is logged and treated as absent for this probe:
    /// backend faults stay local to the store and never become resolver
    /// failures.
    fn resolve(&self, name: &ArtifactName) -> Option<Artifact> {
        for store in &self.stores {
            match store.read(name) {
                Ok(Some(artifact)) => return Some(artifact),
                Ok(None) => {}
                Err(e) => {
                    warn!(store = %store, %name, error = %e, "store read failed; treating as absent");
                }
            }
        }
        None
    }
}

impl fmt::Debug for StoreChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stores: Vec<String> = self.stores.iter().map(|s| s.to_string()).collect();
        f.debug_struct("StoreChain").field("stores", &stores).finish()
    }
}
