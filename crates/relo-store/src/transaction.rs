use std::fmt;
use std::sync::Arc;

use relo_types::{Artifact, ArtifactName};
use tracing::debug;

use crate::error::StoreResult;
use crate::traits::{ArtifactStore, ChangeNotifiable};

/// Delegating wrapper that brackets a coherent batch of writes.
///
/// Every read/write/remove passes through to the wrapped store unchanged.
/// The transactional boundary exists so that a batch producer (typically a
/// compiler run emitting many artifacts) can signal "a coherent set of
/// changes is about to begin / has just completed". Chain refresh must only
/// happen at that boundary, never mid-transaction, so the wrapper fires its
/// registered [`ChangeNotifiable`] listener from
/// [`on_stop`](TransactionalStore::on_stop).
///
/// The wrapper's `Display` equals the wrapped store's, keeping wrapping
/// transparent to introspection.
pub struct TransactionalStore<S> {
    inner: S,
    listener: Option<Arc<dyn ChangeNotifiable>>,
}

impl<S: ArtifactStore> TransactionalStore<S> {
    /// Wrap a store without a listener. Transactions still bracket writes;
    /// nothing is notified on stop.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            listener: None,
        }
    }

    /// Wrap a store and fire `listener` each time a transaction completes.
    pub fn with_listener(inner: S, listener: Arc<dyn ChangeNotifiable>) -> Self {
        Self {
            inner,
            listener: Some(listener),
        }
    }

    /// Signal that a coherent batch of writes is about to begin.
    pub fn on_start(&self) {
        debug!(store = %self.inner, "transaction start");
    }

    /// Signal that the batch has completed. Fires the registered listener,
    /// if any; this is the refresh trigger point.
    pub fn on_stop(&self) {
        debug!(store = %self.inner, "transaction stop");
        if let Some(listener) = &self.listener {
            listener.on_change();
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ArtifactStore> ArtifactStore for TransactionalStore<S> {
    fn read(&self, name: &ArtifactName) -> StoreResult<Option<Artifact>> {
        self.inner.read(name)
    }

    fn write(&self, name: &ArtifactName, artifact: &Artifact) -> StoreResult<()> {
        self.inner.write(name, artifact)
    }

    fn remove(&self, name: &ArtifactName) -> StoreResult<bool> {
        self.inner.remove(name)
    }

    // Forward the defaulted operations too, so backend overrides (e.g. the
    // disk store's metadata probe) are preserved through the wrapper.

    fn contains(&self, name: &ArtifactName) -> StoreResult<bool> {
        self.inner.contains(name)
    }

    fn read_batch(&self, names: &[ArtifactName]) -> StoreResult<Vec<Option<Artifact>>> {
        self.inner.read_batch(names)
    }

    fn write_batch(&self, entries: &[(ArtifactName, Artifact)]) -> StoreResult<()> {
        self.inner.write_batch(entries)
    }
}

impl<S: ArtifactStore> fmt::Display for TransactionalStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<S: ArtifactStore + fmt::Debug> fmt::Debug for TransactionalStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionalStore")
            .field("inner", &self.inner)
            .finish()
    }
}
