//! Four-threshold neighbour-count rules.
//!
//! A [`Ruleset`] `(u, b0, b1, o)` with `0 <= u < b0 <= b1 < o <= 9` maps a
//! cell's live-neighbour count `n` to its next state:
//!
//! | neighbours | next state |
//! |------------|------------|
//! | `n <= u` | dead (underpopulation) |
//! | `n >= o` | dead (overpopulation) |
//! | `b0 <= n <= b1` | alive |
//! | otherwise | unchanged |
//!
//! `o = 9` never fires, since a cell has at most 8 neighbours.

use core::fmt;
use core::str::FromStr;

use crate::board::{ALIVE, DEAD};

/// Most live neighbours a cell can have.
pub const MAX_NEIGHBORS: u8 = 8;

/// Upper bound for the overpopulation threshold.
pub const THRESHOLD_LIMIT: u8 = MAX_NEIGHBORS + 1;

/// Entries in a transition table: `2` states x `0..=8` neighbour counts.
pub const TRANSITIONS: usize = 2 * (MAX_NEIGHBORS as usize + 1);

/// One member of the rule family.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Ruleset {
    underpop: u8,
    birth_low: u8,
    birth_high: u8,
    overpop: u8,
}

/// Errors from ruleset construction and catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesetError {
    /// The thresholds violate `u < b0 <= b1 < o <= 9`.
    InvalidRuleset {
        /// Underpopulation threshold.
        underpop: u8,
        /// Lower birth bound.
        birth_low: u8,
        /// Upper birth bound.
        birth_high: u8,
        /// Overpopulation threshold.
        overpop: u8,
    },
    /// The id is outside the catalog.
    InvalidRulesetId {
        /// The rejected id.
        id: usize,
        /// Catalog size.
        count: usize,
    },
    /// A textual ruleset could not be parsed.
    Parse,
}

impl fmt::Display for RulesetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRuleset {
                underpop,
                birth_low,
                birth_high,
                overpop,
            } => write!(
                f,
                "invalid ruleset ({underpop}, {birth_low}, {birth_high}, {overpop}): \
                 need u < b0 <= b1 < o <= 9"
            ),
            Self::InvalidRulesetId { id, count } => {
                write!(f, "ruleset id {id} out of range 0..{count}")
            }
            Self::Parse => write!(f, "expected four thresholds such as \"1,3,3,4\""),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RulesetError {}

impl Ruleset {
    /// Birth on 3, survival on 2 or 3: the Game of Life.
    pub const LIFE: Self = Self {
        underpop: 1,
        birth_low: 3,
        birth_high: 3,
        overpop: 4,
    };

    /// Checks the family constraint `u < b0 <= b1 < o <= 9`.
    #[inline]
    #[must_use]
    pub const fn is_valid(underpop: u8, birth_low: u8, birth_high: u8, overpop: u8) -> bool {
        underpop < birth_low
            && birth_low <= birth_high
            && birth_high < overpop
            && overpop <= THRESHOLD_LIMIT
    }

    /// Builds a ruleset, rejecting thresholds outside the family.
    ///
    /// # Example
    ///
    /// ```
    /// use multiverse::Ruleset;
    ///
    /// assert_eq!(Ruleset::new(1, 3, 3, 4), Ok(Ruleset::LIFE));
    /// assert!(Ruleset::new(3, 3, 4, 5).is_err());
    /// assert!(Ruleset::new(0, 1, 8, 10).is_err());
    /// ```
    pub const fn new(
        underpop: u8,
        birth_low: u8,
        birth_high: u8,
        overpop: u8,
    ) -> Result<Self, RulesetError> {
        if Self::is_valid(underpop, birth_low, birth_high, overpop) {
            Ok(Self {
                underpop,
                birth_low,
                birth_high,
                overpop,
            })
        } else {
            Err(RulesetError::InvalidRuleset {
                underpop,
                birth_low,
                birth_high,
                overpop,
            })
        }
    }

    #[inline]
    #[must_use]
    pub const fn underpop(self) -> u8 {
        self.underpop
    }

    #[inline]
    #[must_use]
    pub const fn birth_low(self) -> u8 {
        self.birth_low
    }

    #[inline]
    #[must_use]
    pub const fn birth_high(self) -> u8 {
        self.birth_high
    }

    #[inline]
    #[must_use]
    pub const fn overpop(self) -> u8 {
        self.overpop
    }

    /// The thresholds as `(u, b0, b1, o)`.
    #[inline]
    #[must_use]
    pub const fn as_tuple(self) -> (u8, u8, u8, u8) {
        (self.underpop, self.birth_low, self.birth_high, self.overpop)
    }

    /// Next state of a cell in state `current` with `neighbors` live neighbours.
    #[inline]
    #[must_use]
    pub const fn next_state(self, current: u8, neighbors: u8) -> u8 {
        if neighbors <= self.underpop || neighbors >= self.overpop {
            DEAD
        } else if neighbors >= self.birth_low && neighbors <= self.birth_high {
            ALIVE
        } else {
            current
        }
    }

    /// Precomputed next states indexed by `current * 9 + neighbors`.
    ///
    /// ```
    /// use multiverse::Ruleset;
    ///
    /// let t = Ruleset::LIFE.transitions();
    /// assert_eq!(t[3], 1);      // dead cell, 3 neighbours: born
    /// assert_eq!(t[9 + 2], 1);  // live cell, 2 neighbours: survives
    /// assert_eq!(t[2], 0);      // dead cell, 2 neighbours: stays dead
    /// assert_eq!(t[9 + 4], 0);  // live cell, 4 neighbours: dies
    /// ```
    #[must_use]
    pub const fn transitions(self) -> [u8; TRANSITIONS] {
        let mut table = [DEAD; TRANSITIONS];
        let mut i = 0;
        while i < TRANSITIONS {
            let current = (i / 9) as u8;
            let neighbors = (i % 9) as u8;
            table[i] = self.next_state(current, neighbors);
            i += 1;
        }
        table
    }
}

/// Renders as `u/b0-b1/o`, e.g. `1/3-3/4`.
impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}-{}/{}",
            self.underpop, self.birth_low, self.birth_high, self.overpop
        )
    }
}

/// Parses four thresholds separated by `,`, `/` or `-`.
impl FromStr for Ruleset {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [0u8; 4];
        let mut parts = s.split([',', '/', '-']).map(str::trim);
        for slot in &mut values {
            *slot = parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or(RulesetError::Parse)?;
        }
        if parts.next().is_some() {
            return Err(RulesetError::Parse);
        }
        let [u, b0, b1, o] = values;
        Self::new(u, b0, b1, o)
    }
}
