//! Foundation types for Relo.
//!
//! This crate provides the identity and payload types used throughout the
//! Relo hot-reload layer. Every other Relo crate depends on `relo-types`.
//!
//! # Key Types
//!
//! - [`ArtifactName`] — Validated, case-sensitive symbolic name of a
//!   compiled artifact
//! - [`Artifact`] — Opaque compiled bytes, cheap to clone
//! - [`TypeError`] — Validation failures for the above

pub mod artifact;
pub mod error;
pub mod name;

pub use artifact::Artifact;
pub use error::TypeError;
pub use name::ArtifactName;
