//! Artifact name validation and canonicalization.
//!
//! Valid artifact names:
//! - Must be non-empty
//! - Must not contain whitespace, `:`, `*`, `?`, `\`
//! - Segments between separators must be non-empty (which also rules out
//!   leading/trailing separators and `..` traversal)
//!
//! Both `/` and `.` separate segments, mirroring the class-name versus
//! resource-path duality of the compilers this layer serves: `app.Simple`
//! and `app/Simple` name the same artifact. The canonical form uses `/`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TypeError};

/// Characters that are forbidden anywhere in an artifact name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', ':', '*', '?', '\\'];

/// A validated, case-sensitive symbolic artifact name.
///
/// Names are canonicalized at construction: dot separators become slashes,
/// so two spellings of the same artifact compare and hash equal.
///
/// # Examples
///
/// ```
/// use relo_types::ArtifactName;
///
/// let a = ArtifactName::new("app/Simple").unwrap();
/// let b = ArtifactName::new("app.Simple").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "app/Simple");
/// assert!(ArtifactName::new("").is_err());
/// assert!(ArtifactName::new("app//Simple").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Validate and canonicalize an artifact name.
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(TypeError::InvalidName {
                name: name.to_string(),
                reason: "name must not be empty".into(),
            });
        }

        for ch in FORBIDDEN_CHARS {
            if name.contains(*ch) {
                return Err(TypeError::InvalidName {
                    name: name.to_string(),
                    reason: format!("contains forbidden character: {ch:?}"),
                });
            }
        }

        let canonical: Vec<&str> = name.split(['/', '.']).collect();
        if canonical.iter().any(|seg| seg.is_empty()) {
            return Err(TypeError::InvalidName {
                name: name.to_string(),
                reason: "segments between separators must be non-empty".into(),
            });
        }

        Ok(Self(canonical.join("/")))
    }

    /// The canonical (slash-separated) form of the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the name's path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ArtifactName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ArtifactName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<ArtifactName> for String {
    fn from(name: ArtifactName) -> Self {
        name.0
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
