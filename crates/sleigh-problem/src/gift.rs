//! Gifts and the name-keyed gift catalog.

use std::ops::Index;

use sleigh_core::Coordinate;

use crate::{ProblemError, ProblemResult};

#[cfg(feature = "fx-hash")]
type NameIndex = rustc_hash::FxHashMap<String, usize>;
#[cfg(not(feature = "fx-hash"))]
type NameIndex = std::collections::HashMap<String, usize>;

// ── Gift ──────────────────────────────────────────────────────────────────────

/// One deliverable gift.  Never mutated after the catalog is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gift {
    /// Unique identifier (the recipient's name in problem files).
    pub name:        String,
    /// Points awarded when the gift is delivered.
    pub score:       u64,
    /// Mass added to the sleigh while the gift is loaded.
    pub weight:      u64,
    /// Where the gift must be dropped off.
    pub destination: Coordinate,
}

impl Gift {
    pub fn new(name: impl Into<String>, score: u64, weight: u64, destination: Coordinate) -> Self {
        Self { name: name.into(), score, weight, destination }
    }
}

// ── GiftCatalog ───────────────────────────────────────────────────────────────

/// All gifts of a problem, in input order, with O(1) lookup by name.
#[derive(Clone, Debug, Default)]
pub struct GiftCatalog {
    gifts: Vec<Gift>,
    index: NameIndex,
}

impl GiftCatalog {
    /// Build a catalog, rejecting duplicate names.
    pub fn new(gifts: Vec<Gift>) -> ProblemResult<Self> {
        let mut index = NameIndex::default();
        index.reserve(gifts.len());
        for (i, gift) in gifts.iter().enumerate() {
            if index.insert(gift.name.clone(), i).is_some() {
                return Err(ProblemError::DuplicateGift(gift.name.clone()));
            }
        }
        Ok(Self { gifts, index })
    }

    pub fn get(&self, name: &str) -> Option<&Gift> {
        self.index.get(name).map(|&i| &self.gifts[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }

    /// Gifts in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Gift> {
        self.gifts.iter()
    }

    /// Gift names in input order: the initial `available` list of a state.
    pub fn names(&self) -> Vec<String> {
        self.gifts.iter().map(|g| g.name.clone()).collect()
    }

    pub fn as_slice(&self) -> &[Gift] {
        &self.gifts
    }

    /// Sum of all gift scores: the best achievable episode score.
    pub fn total_score(&self) -> u64 {
        self.gifts.iter().map(|g| g.score).sum()
    }
}

impl Index<&str> for GiftCatalog {
    type Output = Gift;

    /// # Panics
    /// Panics if `name` is not in the catalog.
    fn index(&self, name: &str) -> &Gift {
        &self.gifts[self.index[name]]
    }
}

impl<'a> IntoIterator for &'a GiftCatalog {
    type Item = &'a Gift;
    type IntoIter = std::slice::Iter<'a, Gift>;

    fn into_iter(self) -> Self::IntoIter {
        self.gifts.iter()
    }
}
