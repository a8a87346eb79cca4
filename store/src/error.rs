use multiverse::BoardId;
use thiserror::Error;

/// Errors that can occur during graph store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error originating from the underlying SQLite database.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An existing database file has a `boards` table of the wrong shape.
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// The board is not in the store.
    #[error("Board not found: {0}")]
    NotFound(BoardId),

    /// `set_evolutions` needs exactly one child per ruleset.
    #[error("Expected {expected} children, got {got}")]
    ChildCount { expected: usize, got: usize },

    /// The identifier's length does not match its outermost live ring, so
    /// it cannot be sized or stored in a fixed-width entry.
    #[error("Board {0} is not a canonical identifier")]
    NonCanonical(BoardId),

    /// A child does not fit the fixed entry width of its parent.
    #[error("Child {child} does not fit the {width}-byte entries of {parent}")]
    ChildTooWide {
        parent: BoardId,
        child: BoardId,
        width: usize,
    },

    /// No board this narrow can produce the child in one generation.
    #[error("Parent {parent} is narrower than the {min_width} bytes any parent of {child} has")]
    ParentTooNarrow {
        child: BoardId,
        parent: BoardId,
        min_width: usize,
    },
}
