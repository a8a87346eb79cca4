//! Multiverse: the reachable space of a family of cellular automata.
//!
//! Starting from one live cell, every board is advanced under each of the
//! 330 four-threshold rules, re-canonicalized and recorded. This crate holds
//! the pure pieces of that pipeline; persistence and the expansion loop live
//! in `multiverse-store` and `multiverse-explorer`.
//!
//! # Pipeline
//!
//! ```text
//! BoardId --decode--> Board --pad--> step(rule) --trim_fully--> encode --> BoardId
//!                                    x 330 rules
//! ```
//!
//! # Symmetry
//!
//! Every board in the system has full 8-fold dihedral symmetry. The seed is
//! trivially symmetric and the update depends on neighbour counts alone, so
//! it commutes with every symmetry of the square. A board is therefore fully
//! described by its fundamental domain, and [`BoardId`] stores only that.
//!
//! | Type | Role |
//! |------|------|
//! | [`Board`] | Odd-sided square of binary cells |
//! | [`BoardId`] | Canonical identifier, the store key |
//! | [`Ruleset`] | `(u, b0, b1, o)` neighbour thresholds |
//! | [`RulesetCatalog`] | The 330 rules, densely numbered |
//! | [`Successors`] | A board prepared for expansion under every rule |
//!
//! # Example
//!
//! ```
//! use multiverse::{Board, BoardId, RulesetCatalog, Successors};
//!
//! let catalog = RulesetCatalog::compute();
//! let seed = BoardId::single_cell();
//! let board = seed.to_board().unwrap();
//!
//! let children: Vec<BoardId> = Successors::new(&board).children(&catalog).collect();
//! assert_eq!(children.len(), 330);
//! assert_eq!(children[0].to_hex(), "60"); // 0/1-1/2: the ring around the cell
//! assert!(children[148].is_zero());       // Life: the lone cell dies
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod board;
pub mod catalog;
pub mod evolution;
pub mod id;
pub mod layout;
pub mod ruleset;

pub use board::{Board, ALIVE, DEAD};
pub use catalog::{CatalogIter, RulesetCatalog, RULESET_COUNT};
pub use evolution::{can_trim, evolve, pad, step, trim, trim_fully, NeighborCounts, Successors};
pub use id::{decode, encode, encode_or_zero, BoardId, BoardIdParseError};
pub use ruleset::{Ruleset, RulesetError, MAX_NEIGHBORS};

/// Prelude module for convenient imports.
///
/// ```
/// use multiverse::prelude::*;
/// ```
pub mod prelude {
    pub use crate::board::Board;
    pub use crate::catalog::RulesetCatalog;
    pub use crate::evolution::Successors;
    pub use crate::id::{decode, encode, BoardId};
    pub use crate::layout::{byte_width, child_width, parent_width};
    pub use crate::ruleset::Ruleset;
}
