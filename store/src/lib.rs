//! # multiverse-store
//!
//! Durable graph of explored boards, one SQLite row per board.
//!
//! Each row records whether the board has been expanded, its children (one
//! per ruleset, positional by ruleset id) and a bounded set of parents.
//! Identifiers are stored as opaque blobs; the only arithmetic the store
//! does on them is sizing the fixed-width child and parent entries.
//!
//! ## Quick start
//!
//! ```
//! use multiverse::BoardId;
//! use multiverse_store::GraphStore;
//!
//! let store = GraphStore::open_in_memory().unwrap();
//! let seed = BoardId::single_cell();
//!
//! assert!(store.insert(&seed, true).unwrap());
//! assert!(!store.insert(&seed, true).unwrap()); // already present
//! assert!(store.is_root(&seed).unwrap());
//! assert!(!store.is_expanded(&seed).unwrap());
//! assert_eq!(store.unexpanded_boards().unwrap(), vec![seed]);
//! ```

pub mod entries;
pub mod error;
pub mod schema;
pub mod store;

// Re-exports for convenience.
pub use entries::MAX_PARENTS;
pub use error::StoreError;
pub use store::{BoardNode, GraphStore, ParentOutcome, StoreOptions};

#[cfg(test)]
mod tests;
