//! Ruleset catalog: every member of the rule family, densely numbered.
//!
//! Rules are enumerated with `u` outermost, then `b0`, `b1` and `o`, each
//! ascending. The enumeration yields [`RULESET_COUNT`] rules, and a rule's
//! position is its id.
//!
//! # Examples
//!
//! ```
//! use multiverse::{Ruleset, RulesetCatalog};
//!
//! let catalog = RulesetCatalog::compute();
//! assert_eq!(catalog.len(), 330);
//! assert_eq!(catalog.get(148), Ok(Ruleset::LIFE));
//! assert_eq!(catalog.id_of(Ruleset::LIFE), Ok(148));
//! ```

use alloc::vec::Vec;

use crate::ruleset::{Ruleset, RulesetError, MAX_NEIGHBORS, THRESHOLD_LIMIT};

/// Number of rulesets in the family.
pub const RULESET_COUNT: usize = 330;

/// Indexed collection of all rulesets in canonical order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulesetCatalog {
    rules: Vec<Ruleset>,
}

impl RulesetCatalog {
    /// Enumerate the family.
    #[must_use]
    pub fn compute() -> Self {
        let mut rules = Vec::with_capacity(RULESET_COUNT);
        for u in 0..MAX_NEIGHBORS {
            for b0 in u + 1..=MAX_NEIGHBORS {
                for b1 in b0..=MAX_NEIGHBORS {
                    for o in b1 + 1..=THRESHOLD_LIMIT {
                        if let Ok(rule) = Ruleset::new(u, b0, b1, o) {
                            rules.push(rule);
                        }
                    }
                }
            }
        }
        debug_assert_eq!(rules.len(), RULESET_COUNT);
        Self { rules }
    }

    /// Number of rulesets (always [`RULESET_COUNT`]).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Ruleset with the given id.
    ///
    /// # Errors
    ///
    /// [`RulesetError::InvalidRulesetId`] if `id >= len()`.
    #[inline]
    pub fn get(&self, id: usize) -> Result<Ruleset, RulesetError> {
        self.rules
            .get(id)
            .copied()
            .ok_or(RulesetError::InvalidRulesetId {
                id,
                count: self.rules.len(),
            })
    }

    /// Reverse lookup: the id of a ruleset.
    ///
    /// Every valid [`Ruleset`] is in the catalog, so this only fails for a
    /// catalog built some other way.
    pub fn id_of(&self, rule: Ruleset) -> Result<usize, RulesetError> {
        // Sorted by construction: the enumeration order is the derived Ord.
        self.rules.binary_search(&rule).map_err(|_| {
            let (underpop, birth_low, birth_high, overpop) = rule.as_tuple();
            RulesetError::InvalidRuleset {
                underpop,
                birth_low,
                birth_high,
                overpop,
            }
        })
    }

    /// The rulesets in id order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Ruleset] {
        &self.rules
    }

    /// Iterate over `(id, ruleset)` pairs.
    pub fn iter(&self) -> CatalogIter<'_> {
        CatalogIter {
            catalog: self,
            idx: 0,
        }
    }
}

impl Default for RulesetCatalog {
    fn default() -> Self {
        Self::compute()
    }
}

/// Iterator over catalog entries.
pub struct CatalogIter<'a> {
    catalog: &'a RulesetCatalog,
    idx: usize,
}

impl Iterator for CatalogIter<'_> {
    type Item = (usize, Ruleset);

    fn next(&mut self) -> Option<Self::Item> {
        let rule = *self.catalog.rules.get(self.idx)?;
        let id = self.idx;
        self.idx += 1;
        Some((id, rule))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.catalog.rules.len() - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CatalogIter<'_> {}

impl<'a> IntoIterator for &'a RulesetCatalog {
    type Item = (usize, Ruleset);
    type IntoIter = CatalogIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
