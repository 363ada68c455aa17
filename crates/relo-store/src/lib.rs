//! Artifact storage backends for Relo.
//!
//! This crate implements keyed byte-blob storage for compiled artifacts.
//! Compiler adapters write artifacts here; the resolver layer reads them
//! back by symbolic name. The store never interprets artifact contents.
//!
//! # Storage Backends
//!
//! All backends implement the [`ArtifactStore`] trait:
//!
//! - [`MemoryStore`] — `HashMap`-based store for tests, embedding, and
//!   short-lived compiler runs
//! - [`DiskStore`] — one file per artifact under a root directory
//! - [`TransactionalStore`] — delegating wrapper that brackets a batch of
//!   writes between [`on_start`](TransactionalStore::on_start) and
//!   [`on_stop`](TransactionalStore::on_stop)
//!
//! # Design Rules
//!
//! 1. A read after a write with the same name returns exactly the bytes
//!    last written.
//! 2. Absence is a normal outcome: reads of unknown or removed names return
//!    `Ok(None)`, removes of unknown names return `Ok(false)`.
//! 3. Writes overwrite silently; there is no implicit versioning.
//! 4. I/O faults are surfaced to the direct caller, except that a missing
//!    file on disk read degrades to absence.
//! 5. Concurrent readers are always safe; writers exclude each other.

pub mod disk;
pub mod error;
pub mod memory;
pub mod traits;
pub mod transaction;

// Re-export primary types at crate root for ergonomic imports.
pub use disk::DiskStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::{ArtifactStore, ChangeNotifiable};
pub use transaction::TransactionalStore;
