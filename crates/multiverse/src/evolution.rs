//! One generation of growth: pad, step under a rule, trim back.
//!
//! The expansion of a board under a ruleset is
//! `trim_fully(step(pad(board), rule))`, encoded with the dead outcome mapped
//! to the zero identifier. [`Successors`] performs the pad and the neighbour
//! count once and reuses them for every rule in a catalog.
//!
//! Neighbourhoods are clipped at the border; the grid does not wrap.

use alloc::vec;
use alloc::vec::Vec;

use crate::board::{Board, DEAD};
use crate::catalog::RulesetCatalog;
use crate::id::{encode_or_zero, BoardId};
use crate::ruleset::Ruleset;

/// Surrounds the board with one ring of dead cells.
#[must_use]
pub fn pad(board: &Board) -> Board {
    let side = board.side();
    Board::from_fn(side + 2, |row, col| {
        if row == 0 || col == 0 || row > side || col > side {
            DEAD
        } else {
            board.get(row - 1, col - 1)
        }
    })
}

/// Advances every cell of `board` by one generation under `rule`.
#[must_use]
pub fn step(board: &Board, rule: Ruleset) -> Board {
    NeighborCounts::of(board).apply(board, rule)
}

/// True when the board is larger than 1x1 and its outer ring is all dead.
#[must_use]
pub fn can_trim(board: &Board) -> bool {
    let side = board.side();
    if side <= 1 {
        return false;
    }
    let last = side - 1;
    (0..side).all(|i| {
        !board.is_alive(0, i)
            && !board.is_alive(last, i)
            && !board.is_alive(i, 0)
            && !board.is_alive(i, last)
    })
}

/// Drops the outer ring. A board with nothing left inside it becomes `None`.
#[must_use]
pub fn trim(board: &Board) -> Option<Board> {
    let side = board.side();
    if side <= 2 {
        return None;
    }
    Some(Board::from_fn(side - 2, |row, col| board.get(row + 1, col + 1)))
}

/// Trims while the outer ring is dead.
///
/// The result is either `None` or a board whose outer ring holds a live
/// cell, or a 1x1 board.
#[must_use]
pub fn trim_fully(board: Board) -> Option<Board> {
    let mut current = board;
    while can_trim(&current) {
        current = trim(&current)?;
    }
    Some(current)
}

/// The canonical identifier of `board` after one generation under `rule`.
///
/// ```
/// use multiverse::evolution::evolve;
/// use multiverse::{Board, BoardId, Ruleset};
///
/// // An isolated cell dies under Life and nothing is born.
/// let child = evolve(&Board::single_cell(), Ruleset::LIFE);
/// assert_eq!(child, BoardId::zero());
/// ```
#[must_use]
pub fn evolve(board: &Board, rule: Ruleset) -> BoardId {
    Successors::new(board).child(rule)
}

/// Live-neighbour count of every cell of a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborCounts {
    side: usize,
    counts: Vec<u8>,
}

impl NeighborCounts {
    /// Counts the live neighbours of every cell, clipped at the border.
    #[must_use]
    pub fn of(board: &Board) -> Self {
        let side = board.side();
        let mut counts = vec![0u8; side * side];
        let last = side - 1;
        for row in 0..side {
            for col in 0..side {
                if !board.is_alive(row, col) {
                    continue;
                }
                for r in row.saturating_sub(1)..=(row + 1).min(last) {
                    for c in col.saturating_sub(1)..=(col + 1).min(last) {
                        if (r, c) != (row, col) {
                            counts[r * side + c] += 1;
                        }
                    }
                }
            }
        }
        Self { side, counts }
    }

    #[inline]
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.counts[row * self.side + col]
    }

    /// Next generation of `board` under `rule`.
    ///
    /// # Panics
    ///
    /// Panics if `board` is not the board these counts were taken from
    /// (checked by side only).
    #[must_use]
    pub fn apply(&self, board: &Board, rule: Ruleset) -> Board {
        assert_eq!(board.side(), self.side, "neighbour counts belong to another board");
        let table = rule.transitions();
        Board::from_fn(self.side, |row, col| {
            table[usize::from(board.get(row, col)) * 9 + usize::from(self.get(row, col))]
        })
    }
}

/// A board prepared for expansion: padded once, neighbours counted once.
#[derive(Clone, Debug)]
pub struct Successors {
    padded: Board,
    counts: NeighborCounts,
}

impl Successors {
    #[must_use]
    pub fn new(board: &Board) -> Self {
        let padded = pad(board);
        let counts = NeighborCounts::of(&padded);
        Self { padded, counts }
    }

    /// The input board with its extra dead ring.
    #[must_use]
    pub fn padded(&self) -> &Board {
        &self.padded
    }

    /// The trimmed next generation under one rule, `None` if nothing is left.
    #[must_use]
    pub fn board(&self, rule: Ruleset) -> Option<Board> {
        trim_fully(self.counts.apply(&self.padded, rule))
    }

    /// The canonical identifier of the next generation under one rule.
    #[must_use]
    pub fn child(&self, rule: Ruleset) -> BoardId {
        encode_or_zero(self.board(rule).as_ref())
    }

    /// One child per ruleset, in catalog order.
    pub fn children<'a>(
        &'a self,
        catalog: &'a RulesetCatalog,
    ) -> impl ExactSizeIterator<Item = BoardId> + 'a {
        catalog.iter().map(move |(_, rule)| self.child(rule))
    }
}
