use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// An opaque compiled artifact: the byte output of one compilation unit.
///
/// The hot-reload layer never interprets artifact contents — it moves them
/// between stores and hands them to callers verbatim. Payloads are backed by
/// [`Bytes`], so clones taken by stores, chain snapshots, and concurrent
/// readers share the same allocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    data: Bytes,
}

impl Artifact {
    /// Create an artifact from compiled bytes.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// The artifact's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for a zero-length payload.
    ///
    /// Empty artifacts are legal: a compiler may legitimately emit nothing
    /// for a unit (e.g. an interface with no code).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the artifact, returning its payload.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl From<Vec<u8>> for Artifact {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for Artifact {
    fn from(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }
}
