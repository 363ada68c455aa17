use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use relo_types::{Artifact, ArtifactName};
use tracing::debug;

use crate::error::StoreResult;
use crate::traits::ArtifactStore;

/// In-memory, HashMap-based artifact store.
///
/// Intended for tests, embedding, and compiler runs whose output never
/// needs to outlive the process. All artifacts are held in memory behind a
/// `RwLock` for safe concurrent access; reads hand out cheap payload
/// clones.
pub struct MemoryStore {
    artifacts: RwLock<HashMap<ArtifactName, Artifact>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            artifacts: RwLock::new(HashMap::new()),
        }
    }

    /// Number of artifacts currently stored.
    pub fn len(&self) -> usize {
        self.artifacts.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.artifacts.read().expect("lock poisoned").is_empty()
    }

    /// Total payload bytes across all stored artifacts.
    pub fn total_bytes(&self) -> u64 {
        self.artifacts
            .read()
            .expect("lock poisoned")
            .values()
            .map(|artifact| artifact.len() as u64)
            .sum()
    }

    /// Remove all artifacts from the store.
    pub fn clear(&self) {
        self.artifacts.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all artifact names in the store.
    pub fn names(&self) -> Vec<ArtifactName> {
        let map = self.artifacts.read().expect("lock poisoned");
        let mut names: Vec<ArtifactName> = map.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStore for MemoryStore {
    fn read(&self, name: &ArtifactName) -> StoreResult<Option<Artifact>> {
        let map = self.artifacts.read().expect("lock poisoned");
        Ok(map.get(name).cloned())
    }

    fn write(&self, name: &ArtifactName, artifact: &Artifact) -> StoreResult<()> {
        let mut map = self.artifacts.write().expect("lock poisoned");
        // Overwrite semantics: a rewrite under the same name replaces the
        // prior value.
        map.insert(name.clone(), artifact.clone());
        debug!(%name, len = artifact.len(), "memory write");
        Ok(())
    }

    fn remove(&self, name: &ArtifactName) -> StoreResult<bool> {
        let mut map = self.artifacts.write().expect("lock poisoned");
        Ok(map.remove(name).is_some())
    }

    fn contains(&self, name: &ArtifactName) -> StoreResult<bool> {
        let map = self.artifacts.read().expect("lock poisoned");
        Ok(map.contains_key(name))
    }
}

impl fmt::Display for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryStore")
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.len();
        f.debug_struct("MemoryStore")
            .field("artifact_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ArtifactName {
        ArtifactName::new(s).unwrap()
    }

    // -----------------------------------------------------------------------
    // Core read/write/remove
    // -----------------------------------------------------------------------

    #[test]
    fn write_then_read_roundtrips() {
        let store = MemoryStore::new();
        let artifact = Artifact::new(vec![0xCA, 0xFE]);
        store.write(&name("app/Simple"), &artifact).unwrap();

        let read_back = store.read(&name("app/Simple")).unwrap().expect("present");
        assert_eq!(read_back, artifact);
    }

    #[test]
    fn read_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.read(&name("never/Written")).unwrap().is_none());
    }

    #[test]
    fn rewrite_replaces_prior_value() {
        let store = MemoryStore::new();
        let key = name("app/Simple");
        store.write(&key, &Artifact::new(vec![0x01])).unwrap();
        store.write(&key, &Artifact::new(vec![0x02, 0x03])).unwrap();

        let read_back = store.read(&key).unwrap().unwrap();
        assert_eq!(read_back.as_bytes(), &[0x02, 0x03]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_present_then_absent() {
        let store = MemoryStore::new();
        let key = name("app/Simple");
        store.write(&key, &Artifact::new(vec![0x01])).unwrap();

        assert!(store.remove(&key).unwrap()); // was present
        assert!(store.read(&key).unwrap().is_none()); // now gone
        assert!(!store.remove(&key).unwrap()); // second remove = false
    }

    #[test]
    fn remove_never_written_is_false_not_error() {
        let store = MemoryStore::new();
        assert!(!store.remove(&name("never/Written")).unwrap());
    }

    #[test]
    fn dot_and_slash_spellings_share_an_entry() {
        let store = MemoryStore::new();
        store
            .write(&name("app.Simple"), &Artifact::new(vec![0x07]))
            .unwrap();
        let read_back = store.read(&name("app/Simple")).unwrap().unwrap();
        assert_eq!(read_back.as_bytes(), &[0x07]);
    }

    // -----------------------------------------------------------------------
    // Contains / batch defaults
    // -----------------------------------------------------------------------

    #[test]
    fn contains_tracks_presence() {
        let store = MemoryStore::new();
        let key = name("app/Simple");
        assert!(!store.contains(&key).unwrap());
        store.write(&key, &Artifact::new(vec![0x01])).unwrap();
        assert!(store.contains(&key).unwrap());
    }

    #[test]
    fn write_batch_and_read_batch() {
        let store = MemoryStore::new();
        let entries = vec![
            (name("a/One"), Artifact::new(vec![1])),
            (name("a/Two"), Artifact::new(vec![2])),
            (name("a/Three"), Artifact::new(vec![3])),
        ];
        store.write_batch(&entries).unwrap();
        assert_eq!(store.len(), 3);

        let names: Vec<ArtifactName> =
            vec![name("a/One"), name("a/Missing"), name("a/Three")];
        let results = store.read_batch(&names).unwrap();
        assert_eq!(results[0].as_ref().unwrap().as_bytes(), &[1]);
        assert!(results[1].is_none());
        assert_eq!(results[2].as_ref().unwrap().as_bytes(), &[3]);
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_is_empty_total_bytes() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.write(&name("a/A"), &Artifact::new(vec![0; 5])).unwrap();
        store.write(&name("a/B"), &Artifact::new(vec![0; 9])).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_bytes(), 14);
    }

    #[test]
    fn clear_removes_all() {
        let store = MemoryStore::new();
        store.write(&name("a/A"), &Artifact::new(vec![1])).unwrap();
        store.write(&name("a/B"), &Artifact::new(vec![2])).unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn names_is_sorted() {
        let store = MemoryStore::new();
        for n in ["c/C", "a/A", "b/B"] {
            store.write(&name(n), &Artifact::new(vec![0])).unwrap();
        }
        let names = store.names();
        assert_eq!(
            names,
            vec![name("a/A"), name("b/B"), name("c/C")]
        );
    }

    // -----------------------------------------------------------------------
    // Concurrent access
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryStore::new());
        let key = name("shared/Artifact");
        store.write(&key, &Artifact::new(vec![0x42; 64])).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let key = key.clone();
                thread::spawn(move || {
                    let artifact = store.read(&key).unwrap().expect("present");
                    assert_eq!(artifact.len(), 64);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    #[test]
    fn display_and_debug() {
        let store = MemoryStore::new();
        assert_eq!(store.to_string(), "MemoryStore");
        let debug = format!("{store:?}");
        assert!(debug.contains("artifact_count"));
    }
}
