//! Size arithmetic for the fundamental-domain encoding.
//!
//! A board of side `2k + 1` has `(k + 1)(k + 2) / 2` cells in its
//! fundamental domain. The domain is walked ring by ring from the centre
//! outward, so ring `i` owns the stream positions
//! `[i(i + 1) / 2, (i + 1)(i + 2) / 2)`.
//!
//! ```text
//! side   k   bits   bytes
//!    1   0      1       1
//!    3   1      3       1
//!    5   2      6       1
//!    7   3     10       2
//!    9   4     15       2
//!   11   5     21       3
//! ```
//!
//! Byte width is not injective: several sides share one width. The
//! inverse search [`side_from_width`] returns the smallest side of a width.
//!
//! # Example
//!
//! ```
//! use multiverse::layout::{byte_width, child_width, parent_width, side_from_width};
//!
//! assert_eq!(byte_width(7), 2);
//! assert_eq!(side_from_width(2), Some(7));
//! assert_eq!(child_width(7), 2);   // children are at most 9x9
//! assert_eq!(parent_width(7), Some(1));
//! assert_eq!(parent_width(1), None);
//! ```

/// Bits per identifier byte.
pub const BYTE_BITS: usize = 8;

/// Half-width `k` of a board of side `2k + 1`.
///
/// # Panics
///
/// Panics if `side` is even.
#[inline]
#[must_use]
pub const fn half(side: usize) -> usize {
    assert!(side % 2 == 1, "board side must be odd");
    side / 2
}

/// Number of cells in the first `rings` rings: `rings(rings + 1) / 2`.
#[inline]
#[must_use]
pub const fn triangle(rings: usize) -> usize {
    rings * (rings + 1) / 2
}

/// Fundamental-domain cell count of a board of side `2k + 1`.
#[inline]
#[must_use]
pub const fn domain_bits(side: usize) -> usize {
    triangle(half(side) + 1)
}

/// Minimal byte length of the identifier of a board of the given side.
#[inline]
#[must_use]
pub const fn byte_width(side: usize) -> usize {
    domain_bits(side).div_ceil(BYTE_BITS)
}

/// Smallest side whose identifier is exactly `width` bytes long.
///
/// Returns `None` for widths no side produces (0, 8, 11, ...).
#[must_use]
pub fn side_from_width(width: usize) -> Option<usize> {
    let mut k = 0usize;
    loop {
        let w = triangle(k + 1).div_ceil(BYTE_BITS);
        if w == width {
            return Some(2 * k + 1);
        }
        if w > width {
            return None;
        }
        k += 1;
    }
}

/// Byte width of every stored child of a board of side `2k + 1`.
///
/// Children are computed on the padded `2k + 3` board, so the width is
/// `ceil((k + 2)(k + 3) / 2 / 8)`.
#[inline]
#[must_use]
pub const fn child_width(side: usize) -> usize {
    byte_width(side + 2)
}

/// Narrowest possible parent of a board of side `2k + 1`:
/// `ceil(k(k + 1) / 2 / 8)`.
///
/// A side-1 board has no lower bound on its parents and yields `None`.
#[inline]
#[must_use]
pub const fn parent_width(side: usize) -> Option<usize> {
    let k = half(side);
    if k == 0 {
        None
    } else {
        Some(triangle(k).div_ceil(BYTE_BITS))
    }
}

/// Ring index owning stream position `bit`.
#[must_use]
pub fn ring_of_bit(bit: usize) -> usize {
    // Largest i with triangle(i) <= bit.
    let mut i = 0usize;
    while triangle(i + 1) <= bit {
        i += 1;
    }
    i
}
