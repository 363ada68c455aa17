use relo_types::{Artifact, ArtifactName};

/// The artifact lookup seam.
///
/// Implementations map a symbolic name to the newest artifact bytes visible
/// at call time. A miss is `None`, never an error: callers interpret it as
/// "artifact unavailable", which is a normal, expected outcome.
///
/// The parent fallback mechanism of a [`ReloadingResolver`] is any
/// `Resolver` — a static lookup table, a plugin registry, or whatever
/// baseline the target environment provides. The hot layer only ever asks
/// it "do you own this name".
///
/// [`ReloadingResolver`]: crate::ReloadingResolver
pub trait Resolver: Send + Sync {
    /// Resolve a name to artifact bytes, or `None` if unavailable.
    fn resolve(&self, name: &ArtifactName) -> Option<Artifact>;
}
