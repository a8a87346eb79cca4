//! Square, odd-sided boards of binary cells.
//!
//! Every board handled by the explorer carries full 8-fold dihedral
//! symmetry. [`Board`] itself does not enforce that; [`Board::is_symmetric`]
//! checks it, and the codec only reads the fundamental domain.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Dead cell state.
pub const DEAD: u8 = 0;

/// Live cell state.
pub const ALIVE: u8 = 1;

/// A square grid of cells stored row-major, one byte per cell.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    side: usize,
    cells: Vec<u8>,
}

impl Board {
    /// All-dead board of the given side.
    ///
    /// # Panics
    ///
    /// Panics if `side` is zero or even.
    #[must_use]
    pub fn dead(side: usize) -> Self {
        assert!(side % 2 == 1, "board side must be odd, got {side}");
        Self {
            side,
            cells: vec![DEAD; side * side],
        }
    }

    /// The 1x1 board holding a single live cell.
    #[must_use]
    pub fn single_cell() -> Self {
        Self {
            side: 1,
            cells: vec![ALIVE],
        }
    }

    #[must_use]
    pub fn from_fn<F>(side: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> u8,
    {
        let mut board = Self::dead(side);
        for row in 0..side {
            for col in 0..side {
                board.cells[row * side + col] = u8::from(f(row, col) != DEAD);
            }
        }
        board
    }

    /// Builds a board from rows; any non-zero entry is a live cell.
    ///
    /// # Panics
    ///
    /// Panics unless the rows form an odd-sided square.
    ///
    /// # Example
    ///
    /// ```
    /// use multiverse::Board;
    ///
    /// let plus = Board::from_rows(&[[0, 1, 0], [1, 1, 1], [0, 1, 0]]);
    /// assert_eq!(plus.side(), 3);
    /// assert_eq!(plus.live_count(), 5);
    /// assert!(plus.is_symmetric());
    /// ```
    #[must_use]
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let side = rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.as_ref().len(), side, "row {i} breaks the square");
        }
        Self::from_fn(side, |r, c| rows[r].as_ref()[c])
    }

    #[inline]
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Distance from the centre to the border (`k` for side `2k + 1`).
    #[inline]
    #[must_use]
    pub fn half(&self) -> usize {
        self.side / 2
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.side + col]
    }

    #[inline]
    #[must_use]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != DEAD
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.side + col] = u8::from(value != DEAD);
    }

    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != DEAD).count()
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.cells.iter().all(|&c| c == DEAD)
    }

    /// Sets `(row, col)` and its seven images under the dihedral group.
    pub fn set_orbit(&mut self, row: usize, col: usize, value: u8) {
        let last = self.side - 1;
        for (r, c) in [(row, col), (col, row)] {
            for rr in [r, last - r] {
                for cc in [c, last - c] {
                    self.set(rr, cc, value);
                }
            }
        }
    }

    /// True when the board is invariant under both mirrors and the
    /// main-diagonal transpose (which together generate all 8 symmetries).
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        let last = self.side - 1;
        (0..self.side).all(|r| {
            (0..self.side).all(|c| {
                let v = self.get(r, c);
                v == self.get(r, last - c) && v == self.get(last - r, c) && v == self.get(c, r)
            })
        })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board({}x{})", self.side, self.side)?;
        fmt::Display::fmt(self, f)
    }
}

/// One text line per row, `o` for live and `.` for dead cells.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.side) {
            for &cell in row {
                f.write_str(if cell == DEAD { "." } else { "o" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
