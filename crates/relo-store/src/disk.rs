use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use relo_types::{Artifact, ArtifactName};
use tracing::debug;

use crate::error::StoreResult;
use crate::traits::ArtifactStore;

/// Default file suffix for artifacts written to disk.
pub const DEFAULT_SUFFIX: &str = "bin";

/// On-disk artifact store: one file per artifact under a root directory.
///
/// The name-to-path translation is fixed and deterministic: each name
/// segment becomes a path component under the root, and `.<suffix>` is
/// appended to the final component. `app/Simple` with the default suffix
/// lands at `<root>/app/Simple.bin`.
///
/// Artifact names are validated at construction ([`ArtifactName`]), so a
/// name can never translate to a path outside the root.
pub struct DiskStore {
    root: PathBuf,
    suffix: String,
}

impl DiskStore {
    /// Create a store rooted at `root`, using [`DEFAULT_SUFFIX`].
    ///
    /// The root directory is created lazily on first write; a store over a
    /// directory that does not exist yet reads every name as absent.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_suffix(root, DEFAULT_SUFFIX)
    }

    /// Create a store rooted at `root` with a custom file suffix, for
    /// embedders whose toolchain expects a conventional extension.
    pub fn with_suffix(root: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
        }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Translate an artifact name to its on-disk path.
    pub fn path_for(&self, name: &ArtifactName) -> PathBuf {
        let mut path = self.root.clone();
        for segment in name.segments() {
            path.push(segment);
        }
        // Segments cannot contain dots, so this appends rather than
        // replacing part of the final component.
        path.set_extension(&self.suffix);
        path
    }
}

impl ArtifactStore for DiskStore {
    fn read(&self, name: &ArtifactName) -> StoreResult<Option<Artifact>> {
        match fs::read(self.path_for(name)) {
            Ok(bytes) => Ok(Some(Artifact::new(bytes))),
            // A missing file is a normal miss, not a fault.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &ArtifactName, artifact: &Artifact) -> StoreResult<()> {
        let path = self.path_for(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, artifact.as_bytes())?;
        debug!(%name, path = %path.display(), len = artifact.len(), "disk write");
        Ok(())
    }

    fn remove(&self, name: &ArtifactName) -> StoreResult<bool> {
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, name: &ArtifactName) -> StoreResult<bool> {
        match fs::metadata(self.path_for(name)) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl fmt::Display for DiskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiskStore({})", self.root.display())
    }
}

impl fmt::Debug for DiskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiskStore")
            .field("root", &self.root)
            .field("suffix", &self.suffix)
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
    // Path translation
    // -----------------------------------------------------------------------

    #[test]
    fn path_translation_is_deterministic() {
        let store = DiskStore::new("/tmp/artifacts");
        let path = store.path_for(&name("app/beans/Simple"));
        assert_eq!(path, PathBuf::from("/tmp/artifacts/app/beans/Simple.bin"));
    }

    #[test]
    fn dotted_names_translate_like_slashed_ones() {
        let store = DiskStore::new("/tmp/artifacts");
        assert_eq!(
            store.path_for(&name("app.beans.Simple")),
            store.path_for(&name("app/beans/Simple"))
        );
    }

    #[test]
    fn custom_suffix_is_appended() {
        let store = DiskStore::with_suffix("/tmp/artifacts", "class");
        let path = store.path_for(&name("app/Simple"));
        assert_eq!(path, PathBuf::from("/tmp/artifacts/app/Simple.class"));
    }

    // -----------------------------------------------------------------------
    // Read / write / remove against a real directory
    // -----------------------------------------------------------------------

    #[test]
    fn write_then_read_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let artifact = Artifact::new(vec![0xDE, 0xAD, 0xBE, 0xEF]);

        store.write(&name("app/deep/Nested"), &artifact).unwrap();
        let read_back = store.read(&name("app/deep/Nested")).unwrap().unwrap();
        assert_eq!(read_back, artifact);

        // Intermediate directories were created.
        assert!(dir.path().join("app/deep").is_dir());
    }

    #[test]
    fn read_missing_is_none_even_without_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path().join("never-created"));
        assert!(store.read(&name("app/Simple")).unwrap().is_none());
    }

    #[test]
    fn rewrite_replaces_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let key = name("app/Simple");

        store.write(&key, &Artifact::new(vec![0x01])).unwrap();
        store.write(&key, &Artifact::new(vec![0x02, 0x03])).unwrap();

        let read_back = store.read(&key).unwrap().unwrap();
        assert_eq!(read_back.as_bytes(), &[0x02, 0x03]);
    }

    #[test]
    fn remove_deletes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let key = name("app/Simple");

        store.write(&key, &Artifact::new(vec![0x01])).unwrap();
        assert!(store.remove(&key).unwrap());
        assert!(!dir.path().join("app/Simple.bin").exists());
        assert!(store.read(&key).unwrap().is_none());
    }

    #[test]
    fn remove_missing_is_false_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        assert!(!store.remove(&name("never/Written")).unwrap());
    }

    #[test]
    fn contains_probes_without_reading() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let key = name("app/Simple");

        assert!(!store.contains(&key).unwrap());
        store.write(&key, &Artifact::new(vec![0x01])).unwrap();
        assert!(store.contains(&key).unwrap());
    }

    #[test]
    fn empty_artifact_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        let key = name("app/Empty");

        store.write(&key, &Artifact::new(Vec::new())).unwrap();
        let read_back = store.read(&key).unwrap().unwrap();
        assert!(read_back.is_empty());
    }

    // -----------------------------------------------------------------------
    // Fault propagation
    // -----------------------------------------------------------------------

    #[cfg(unix)]
    #[test]
    fn non_missing_io_fault_propagates_on_read() {
        // A directory where the artifact file should be is an I/O fault,
        // not a miss.
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path());
        fs::create_dir_all(dir.path().join("app/Simple.bin")).unwrap();

        let result = store.read(&name("app/Simple"));
        assert!(result.is_err());
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    #[test]
    fn display_names_the_root() {
        let store = DiskStore::new("/var/cache/relo");
        assert_eq!(store.to_string(), "DiskStore(/var/cache/relo)");
    }
}
