//! Hot-swappable artifact resolution for Relo.
//!
//! This crate composes the storage backends of `relo-store` into a single
//! lookup surface that can be rebuilt underneath a running program:
//!
//! - [`StoreChain`] — an ordered, immutable snapshot of artifact stores;
//!   resolves a name by probing stores in priority order (last-added wins)
//! - [`ReloadingResolver`] — owns the current chain behind an atomic
//!   pointer; add/remove/notification triggers build a brand-new chain and
//!   publish it with a single swap, never interrupting in-flight lookups
//! - [`Resolver`] — the lookup seam, also implemented by whatever baseline
//!   (non-reloadable) mechanism the embedder provides as a parent fallback
//! - [`TableResolver`] — a prebuilt-map baseline for embedding and tests
//!
//! # Design Rules
//!
//! 1. A chain is never mutated after construction; "adding" a store
//!    produces a new chain value.
//! 2. Every resolve observes one whole chain snapshot, never a mix of two.
//! 3. Rebuilds are serialized; publish order matches trigger order.
//! 4. No lock is held while probing stores.
//! 5. A miss is `None` everywhere, never an error; a faulting store reads
//!    as absent until healthy again.

pub mod chain;
pub mod reloading;
pub mod table;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use chain::StoreChain;
pub use reloading::ReloadingResolver;
pub use table::TableResolver;
pub use traits::Resolver;
