use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use relo_store::{ArtifactStore, ChangeNotifiable};
use relo_types::{Artifact, ArtifactName};
use tracing::debug;

use crate::chain::StoreChain;
use crate::traits::Resolver;

/// Resolver whose store chain can be replaced underneath in-flight lookups.
///
/// The resolver alternates between two states: stable (serving the current
/// chain) and rebuilding (an add/remove/notification trigger constructing
/// the next chain). Every trigger builds a brand-new [`StoreChain`] from
/// the full registration list and publishes it with one atomic pointer
/// swap, so a concurrent [`resolve`](Resolver::resolve) observes either the
/// pre-rebuild or the post-rebuild chain in its entirety — never a mix.
///
/// Rebuilds are serialized by the mutex over the registration list, and the
/// publish happens inside that critical section, so publish order matches
/// trigger order. Resolves never take the mutex: they load the published
/// snapshot once and probe it lock-free.
///
/// An optional parent fallback is consulted *before* the chain, mirroring
/// the intended use: reloadable artifacts shadow a stable baseline rather
/// than replacing it outright.
pub struct ReloadingResolver {
    parent: Option<Arc<dyn Resolver>>,
    /// Registration list in priority order (index 0 highest). The only
    /// mutable shared state; touched only inside the rebuild section.
    stores: Mutex<Vec<Arc<dyn ArtifactStore>>>,
    /// The published chain: read-many, write-rare.
    chain: ArcSwap<StoreChain>,
}

impl ReloadingResolver {
    /// A resolver with no parent fallback: every lookup goes to the chain.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A resolver that consults `parent` before its own chain.
    pub fn with_parent(parent: Arc<dyn Resolver>) -> Self {
        Self::build(Some(parent))
    }

    fn build(parent: Option<Arc<dyn Resolver>>) -> Self {
        Self {
            parent,
            stores: Mutex::new(Vec::new()),
            chain: ArcSwap::from_pointee(StoreChain::empty()),
        }
    }

    /// Register a store at highest priority and publish the new chain.
    ///
    /// Adding the identical store reference (`Arc::ptr_eq`) twice is a
    /// no-op: a duplicate entry could only re-answer every probe with the
    /// same bytes at double the cost.
    pub fn add_store(&self, store: Arc<dyn ArtifactStore>) {
        let mut stores = self.stores.lock().expect("lock poisoned");
        if stores.iter().any(|s| Arc::ptr_eq(s, &store)) {
            debug!(store = %store, "duplicate registration ignored");
            return;
        }
        debug!(store = %store, priority = 0, "store added");
        stores.insert(0, store);
        self.publish(&stores);
    }

    /// Unregister a store and publish the new chain. Returns `false` if the
    /// store was never added, leaving resolution order unchanged.
    pub fn remove_store(&self, store: &Arc<dyn ArtifactStore>) -> bool {
        let mut stores = self.stores.lock().expect("lock poisoned");
        let Some(index) = stores.iter().position(|s| Arc::ptr_eq(s, store)) else {
            return false;
        };
        stores.remove(index);
        debug!(store = %store, "store removed");
        self.publish(&stores);
        true
    }

    /// The current chain snapshot. The snapshot stays valid (and probes the
    /// stores it was built from) even if a rebuild publishes a successor.
    pub fn current_chain(&self) -> Arc<StoreChain> {
        self.chain.load_full()
    }

    /// Number of registered stores.
    pub fn store_count(&self) -> usize {
        self.stores.lock().expect("lock poisoned").len()
    }

    /// Rebuild from the full registration list and atomically publish.
    /// Callers must hold the `stores` lock, which serializes publishes in
    /// trigger order.
    fn publish(&self, stores: &[Arc<dyn ArtifactStore>]) {
        let next = StoreChain::from_stores(stores.to_vec());
        self.chain.store(Arc::new(next));
    }
}

impl Default for ReloadingResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for ReloadingResolver {
    fn resolve(&self, name: &ArtifactName) -> Option<Artifact> {
        // Parent first: the hot layer shadows a baseline, it does not
        // replace it.
        if let Some(parent) = &self.parent {
            if let Some(artifact) = parent.resolve(name) {
                return Some(artifact);
            }
        }
        self.chain.load().resolve(name)
    }
}

impl ChangeNotifiable for ReloadingResolver {
    /// Re-derive the chain from the current registration list.
    ///
    /// Idempotent and cheap: with no intervening add/remove the published
    /// chain has identical stores in identical order, so resolution results
    /// are unchanged.
    fn on_change(&self) {
        let stores = self.stores.lock().expect("lock poisoned");
        debug!(stores = stores.len(), "change notification; republishing chain");
        self.publish(&stores);
    }
}

impl std::fmt::Debug for ReloadingResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadingResolver")
            .field("has_parent", &self.parent.is_some())
            .field("chain", &self.chain.load())
            .finish()
    }
}
