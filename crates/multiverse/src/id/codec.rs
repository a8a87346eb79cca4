//! Board <-> identifier conversion over the fundamental domain.

use alloc::vec;

use super::BoardId;
use crate::board::{Board, ALIVE};
use crate::layout::{byte_width, half, BYTE_BITS};

/// Fundamental-domain cells of a board of side `side`, in stream order.
///
/// Ring `i` is the row `i` steps above the centre; within it the walk runs
/// from the diagonal to the centre column. Coordinates are `(row, col)`.
///
/// ```
/// use multiverse::id::domain_cells;
///
/// let cells: Vec<_> = domain_cells(5).collect();
/// assert_eq!(cells, vec![(2, 2), (1, 1), (1, 2), (0, 0), (0, 1), (0, 2)]);
/// ```
pub fn domain_cells(side: usize) -> impl Iterator<Item = (usize, usize)> {
    let c = half(side);
    (0..=c).flat_map(move |ring| (0..=ring).rev().map(move |off| (c - ring, c - off)))
}

/// Encodes a symmetric board into its canonical identifier.
///
/// Only the fundamental domain is read; whatever an asymmetric board holds
/// outside it is discarded.
#[must_use]
pub fn encode(board: &Board) -> BoardId {
    let side = board.side();
    let mut bytes = vec![0u8; byte_width(side)];
    for (bit, (row, col)) in domain_cells(side).enumerate() {
        if board.is_alive(row, col) {
            bytes[bit / BYTE_BITS] |= 0x80 >> (bit % BYTE_BITS);
        }
    }
    BoardId::from_vec(bytes)
}

/// Encodes an evolution outcome, mapping "no board" to [`BoardId::zero`].
#[must_use]
pub fn encode_or_zero(board: Option<&Board>) -> BoardId {
    board.map_or_else(BoardId::zero, encode)
}

/// Rebuilds the full board of side `side` from an identifier.
///
/// Every set bit is written to all eight images of its cell.
///
/// # Panics
///
/// Panics if `side` is even or if the identifier's length is not the byte
/// width of `side`. Either is a caller bug.
#[must_use]
pub fn decode(id: &BoardId, side: usize) -> Board {
    assert_eq!(
        id.len(),
        byte_width(side),
        "identifier {id} cannot describe a {side}x{side} board"
    );
    let bytes = id.as_bytes();
    let mut board = Board::dead(side);
    for (bit, (row, col)) in domain_cells(side).enumerate() {
        if bytes[bit / BYTE_BITS] & (0x80 >> (bit % BYTE_BITS)) != 0 {
            board.set_orbit(row, col, ALIVE);
        }
    }
    board
}
