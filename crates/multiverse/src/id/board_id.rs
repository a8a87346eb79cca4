//! Opaque, value-typed board identifier.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::board::Board;
use crate::layout::{byte_width, ring_of_bit, BYTE_BITS};

/// The canonical identifier of a symmetric board.
///
/// Identifiers order by byte length first, then by content, so a sorted
/// collection lists smaller boards before larger ones.
///
/// The byte length doubles as a size tag, but only loosely: sides 1, 3 and
/// 5 all fit in one byte. [`BoardId::side`] resolves the exact side from
/// the outermost ring holding a live cell, which a fully trimmed board
/// always has.
///
/// # Example
///
/// ```
/// use multiverse::id::BoardId;
///
/// let ring = BoardId::from_hex("60").unwrap();
/// assert_eq!(ring.side(), Some(3));
/// assert_eq!(BoardId::single_cell().side(), Some(1));
/// assert!(BoardId::zero().is_zero());
/// assert_eq!(BoardId::zero().side(), None);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BoardId {
    bytes: Vec<u8>,
}

/// Error when parsing a [`BoardId`] from a hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIdParseError {
    /// The string has no digits.
    Empty,
    /// The string has an odd number of hex digits.
    OddLength(usize),
    /// A character is not a hex digit.
    InvalidDigit {
        /// The offending character.
        character: char,
        /// Character position in the input.
        position: usize,
    },
}

impl fmt::Display for BoardIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty board identifier"),
            Self::OddLength(len) => write!(f, "odd number of hex digits ({len})"),
            Self::InvalidDigit {
                character,
                position,
            } => write!(f, "invalid hex digit '{character}' at position {position}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardIdParseError {}

impl BoardId {
    /// The sentinel for the board with no live cells and no extent.
    #[must_use]
    pub fn zero() -> Self {
        Self { bytes: vec![0] }
    }

    /// Identifier of the 1x1 board with one live cell, the usual seed.
    #[must_use]
    pub fn single_cell() -> Self {
        Self { bytes: vec![0x80] }
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    #[must_use]
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Recovers the identifier stored in a zero-padded fixed-width entry.
    ///
    /// Padding an identifier with zero bytes is the same as encoding the
    /// board surrounded by dead rings, so the real identifier ends with the
    /// byte holding the last set bit's ring. An entry with no set bit is
    /// the zero board.
    ///
    /// Returns `None` when the last set bit belongs to a ring whose
    /// identifier is wider than the entry, which no padded identifier does.
    ///
    /// # Example
    ///
    /// ```
    /// use multiverse::id::BoardId;
    ///
    /// assert_eq!(BoardId::from_padded(&[0x60, 0, 0]).unwrap().to_hex(), "60");
    /// // A 7x7 board whose last byte is legitimately zero survives.
    /// assert_eq!(BoardId::from_padded(&[0x02, 0, 0]).unwrap().to_hex(), "0200");
    /// assert!(BoardId::from_padded(&[0, 0]).unwrap().is_zero());
    /// // Bit 7 lies in the 7x7 ring, which needs two bytes.
    /// assert_eq!(BoardId::from_padded(&[0x01]), None);
    /// ```
    #[must_use]
    pub fn from_padded(entry: &[u8]) -> Option<Self> {
        match last_set_bit(entry) {
            None => Some(Self::zero()),
            Some(bit) => {
                let side = 2 * ring_of_bit(bit) + 1;
                entry.get(..byte_width(side)).map(Self::from_bytes)
            }
        }
    }

    /// Parses a lowercase or uppercase hex string.
    pub fn from_hex(s: &str) -> Result<Self, BoardIdParseError> {
        if s.is_empty() {
            return Err(BoardIdParseError::Empty);
        }
        if s.len() % 2 != 0 {
            return Err(BoardIdParseError::OddLength(s.len()));
        }
        let mut bytes = Vec::with_capacity(s.len() / 2);
        let mut hi = 0u8;
        for (position, character) in s.chars().enumerate() {
            let digit = character
                .to_digit(16)
                .ok_or(BoardIdParseError::InvalidDigit {
                    character,
                    position,
                })? as u8;
            if position % 2 == 0 {
                hi = digit << 4;
            } else {
                bytes.push(hi | digit);
            }
        }
        Ok(Self { bytes })
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.bytes
            .iter()
            .map(|b| alloc::format!("{b:02x}"))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True for the single-zero-byte sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bytes == [0]
    }

    /// Side length of the board this identifier encodes.
    ///
    /// `None` for the zero board and for byte strings that are not the
    /// minimal encoding of a trimmed board (extra trailing bytes, or a
    /// length that disagrees with the outermost live ring).
    #[must_use]
    pub fn side(&self) -> Option<usize> {
        let bit = last_set_bit(&self.bytes)?;
        let side = 2 * ring_of_bit(bit) + 1;
        (byte_width(side) == self.bytes.len()).then_some(side)
    }

    /// True when this is the sentinel or the minimal encoding of a trimmed board.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.is_zero() || self.side().is_some()
    }

    /// Decodes into a board at its own side; `None` for the zero board or a
    /// non-canonical identifier.
    #[must_use]
    pub fn to_board(&self) -> Option<Board> {
        self.side().map(|side| super::decode(self, side))
    }

    /// Copies the bytes into a zero-padded entry of `width` bytes.
    ///
    /// Returns `None` if the identifier is wider than `width`.
    #[must_use]
    pub fn padded(&self, width: usize) -> Option<Vec<u8>> {
        if self.bytes.len() > width {
            return None;
        }
        let mut entry = self.bytes.clone();
        entry.resize(width, 0);
        Some(entry)
    }
}

/// Stream position of the last set bit, MSB-first within each byte.
fn last_set_bit(bytes: &[u8]) -> Option<usize> {
    let (idx, &byte) = bytes.iter().enumerate().rev().find(|(_, &b)| b != 0)?;
    Some(idx * BYTE_BITS + (BYTE_BITS - 1 - byte.trailing_zeros() as usize))
}

impl Ord for BoardId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes
            .len()
            .cmp(&other.bytes.len())
            .then_with(|| self.bytes.cmp(&other.bytes))
    }
}

impl PartialOrd for BoardId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardId({})", self.to_hex())
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for BoardId {
    type Err = BoardIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<&[u8]> for BoardId {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for BoardId {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<BoardId> for Vec<u8> {
    fn from(id: BoardId) -> Self {
        id.bytes
    }
}

impl AsRef<[u8]> for BoardId {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
