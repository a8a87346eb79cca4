//! Canonical board identifiers.
//!
//! A symmetric board is fully described by its fundamental domain, the
//! triangular wedge between the centre, the centre column and the main
//! diagonal. The codec packs that wedge most-significant-bit first, ring by
//! ring from the centre outward, into the shortest byte string that holds it.
//!
//! # Example
//!
//! ```
//! use multiverse::id::{decode, encode, BoardId};
//! use multiverse::Board;
//!
//! let plus = Board::from_rows(&[[0, 1, 0], [1, 1, 1], [0, 1, 0]]);
//! let id = encode(&plus);
//! assert_eq!(id.to_hex(), "a0");
//! assert_eq!(id.side(), Some(3));
//! assert_eq!(decode(&id, 3), plus);
//!
//! assert_eq!(encode(&Board::single_cell()), BoardId::single_cell());
//! ```

mod board_id;
mod codec;

pub use board_id::{BoardId, BoardIdParseError};
pub use codec::{decode, domain_cells, encode, encode_or_zero};

#[cfg(test)]
mod tests;
