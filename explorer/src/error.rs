use multiverse::BoardId;
use multiverse_store::StoreError;
use thiserror::Error;

/// Errors from expanding boards.
#[derive(Debug, Error)]
pub enum ExploreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored key is not the minimal encoding of a trimmed board, so its
    /// side length is unknown.
    #[error("Board {0} is not a canonical identifier")]
    NonCanonical(BoardId),

    /// A seed must have at least one live cell.
    #[error("Seed {0} has no live cells")]
    DeadSeed(BoardId),
}
