use std::fmt;

use relo_types::{Artifact, ArtifactName};

use crate::error::StoreResult;

/// Keyed storage for compiled artifacts.
///
/// All implementations must satisfy these invariants:
/// - `read` after `write` with the same name and no intervening remove or
///   overwrite returns exactly the bytes last written.
/// - `read` of an unknown or removed name returns `Ok(None)`, never an
///   error.
/// - `write` overwrites any prior value and must not be silently dropped.
/// - `remove` of an unknown name is `Ok(false)`, not an error.
/// - The store never interprets artifact contents.
///
/// `Display` is the store's diagnostic representation; wrappers that
/// delegate storage must delegate `Display` too, so wrapping stays
/// transparent to introspection.
pub trait ArtifactStore: fmt::Display + Send + Sync {
    /// Read the artifact last written under `name`.
    ///
    /// Returns `Ok(None)` if the name was never written or was removed.
    fn read(&self, name: &ArtifactName) -> StoreResult<Option<Artifact>>;

    /// Store `artifact` under `name`, overwriting any prior value.
    fn write(&self, name: &ArtifactName, artifact: &Artifact) -> StoreResult<()>;

    /// Delete the entry for `name`. Returns `true` if it was present.
    fn remove(&self, name: &ArtifactName) -> StoreResult<bool>;

    /// Check whether `name` currently has a value.
    ///
    /// Default implementation reads the artifact and discards it. Backends
    /// may override with a cheaper probe.
    fn contains(&self, name: &ArtifactName) -> StoreResult<bool> {
        Ok(self.read(name)?.is_some())
    }

    /// Read multiple artifacts in a batch.
    ///
    /// Default implementation calls `read()` for each name. Backends may
    /// override for better performance (e.g., fewer I/O round-trips).
    fn read_batch(&self, names: &[ArtifactName]) -> StoreResult<Vec<Option<Artifact>>> {
        names.iter().map(|name| self.read(name)).collect()
    }

    /// Write multiple artifacts in a batch.
    ///
    /// Default implementation calls `write()` for each pair. Backends may
    /// override for better performance (e.g., single sync).
    fn write_batch(&self, entries: &[(ArtifactName, Artifact)]) -> StoreResult<()> {
        entries
            .iter()
            .try_for_each(|(name, artifact)| self.write(name, artifact))
    }
}

// Shared stores are the common case: the same backing store is typically
// registered with a resolver and handed to a compiler adapter at once.
impl<S: ArtifactStore + ?Sized> ArtifactStore for std::sync::Arc<S> {
    fn read(&self, name: &ArtifactName) -> StoreResult<Option<Artifact>> {
        (**self).read(name)
    }

    fn write(&self, name: &ArtifactName, artifact: &Artifact) -> StoreResult<()> {
        (**self).write(name, artifact)
    }

    fn remove(&self, name: &ArtifactName) -> StoreResult<bool> {
        (**self).remove(name)
    }

    fn contains(&self, name: &ArtifactName) -> StoreResult<bool> {
        (**self).contains(name)
    }

    fn read_batch(&self, names: &[ArtifactName]) -> StoreResult<Vec<Option<Artifact>>> {
        (**self).read_batch(names)
    }

    fn write_batch(&self, entries: &[(ArtifactName, Artifact)]) -> StoreResult<()> {
        (**self).write_batch(entries)
    }
}

/// Payload-free "backing content may have changed" signal.
///
/// An external change detector (or a [`TransactionalStore`] closing a
/// batch) calls [`on_change`](ChangeNotifiable::on_change) when it judges
/// that stored content likely changed. Implementations must be idempotent
/// and cheap to call repeatedly: a notification with nothing actually
/// changed must leave observable behavior unaffected.
///
/// The signal carries no description of *what* changed; receivers re-derive
/// from current truth.
///
/// [`TransactionalStore`]: crate::TransactionalStore
pub trait ChangeNotifiable: Send + Sync {
    /// Re-derive any state computed from backing content.
    fn on_change(&self);
}
