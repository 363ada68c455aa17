use std::collections::HashMap;

use relo_types::{Artifact, ArtifactName};

use crate::traits::Resolver;

/// A baseline resolver backed by a prebuilt lookup table.
///
/// This is the simplest parent-fallback implementation: populate it at
/// startup with the artifacts the stable baseline owns, then hand it to
/// [`ReloadingResolver::with_parent`]. It never changes after that —
/// mutation happens before it is shared, which is why `insert` takes
/// `&mut self`.
///
/// [`ReloadingResolver::with_parent`]: crate::ReloadingResolver::with_parent
#[derive(Debug, Default)]
pub struct TableResolver {
    artifacts: HashMap<ArtifactName, Artifact>,
}

impl TableResolver {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a baseline artifact, replacing any prior entry for the name.
    pub fn insert(&mut self, name: ArtifactName, artifact: Artifact) {
        self.artifacts.insert(name, artifact);
    }

    /// Number of baseline artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns `true` if the table holds no artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl FromIterator<(ArtifactName, Artifact)> for TableResolver {
    fn from_iter<I: IntoIterator<Item = (ArtifactName, Artifact)>>(iter: I) -> Self {
        Self {
            artifacts: iter.into_iter().collect(),
        }
    }
}

impl Resolver for TableResolver {
    fn resolve(&self, name: &ArtifactName) -> Option<Artifact> {
        self.artifacts.get(name).cloned()
    }
}
