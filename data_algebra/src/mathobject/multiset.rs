/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::iter;
use std::sync::Arc;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use super::Collection;
use super::MathObject;
use super::Set;
use super::all_absolute;
use super::flags::Flags;
use super::flags::Property;
use super::structural_hash;
use crate::error::AlgebraError;
use crate::error::Result;

/// The largest multiplicity a multiset holds. Counts stay
/// representable as `i64`, which is how they are read back.
pub const MAX_MULTIPLICITY: u64 = i64::MAX as u64;

/// An immutable mapping from distinct math objects to positive
/// multiplicities.
///
/// A stored multiplicity is never zero: operations whose arithmetic
/// drives an element to zero drop it. Nor does it exceed
/// [`MAX_MULTIPLICITY`]: arithmetic that would go past it fails with
/// [`AlgebraError::MultiplicityOverflow`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<(MathObject, i64)>", into = "Vec<(MathObject, u64)>")]
pub struct Multiset {
    inner: Arc<MultisetInner>,
}

struct MultisetInner {
    counts: BTreeMap<MathObject, u64>,
    cardinality: u128,
    hash: u64,
    flags: Flags,
}

impl Multiset {
    /// Build from explicit `(element, multiplicity)` pairs. Repeated
    /// elements have their multiplicities summed; a sum past
    /// [`MAX_MULTIPLICITY`] is an error.
    ///
    /// ```
    /// use data_algebra::AlgebraError;
    /// use data_algebra::MathObject;
    /// use data_algebra::Multiset;
    ///
    /// let ms = Multiset::from_counts([("a", 2), ("b", 3)]).unwrap();
    /// assert_eq!(ms.multiplicity(&MathObject::from("b")), 3);
    /// assert_eq!(ms.cardinality(), 5);
    ///
    /// assert!(matches!(
    ///     Multiset::from_counts([("a", 0)]),
    ///     Err(AlgebraError::InvalidMultiplicity { multiplicity: 0, .. })
    /// ));
    /// ```
    pub fn from_counts<I, T>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, i64)>,
        T: Into<MathObject>,
    {
        let mut map = BTreeMap::new();
        for (element, multiplicity) in counts {
            let element = element.into();
            let n = u64::try_from(multiplicity)
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AlgebraError::InvalidMultiplicity {
                    element: element.to_string(),
                    multiplicity,
                })?;
            tally(&mut map, element, n)?;
        }
        Ok(Self::from_map(map))
    }

    /// Tally a sequence of elements.
    pub fn from_elements<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MathObject>,
    {
        let mut map = BTreeMap::new();
        for element in elements {
            *map.entry(element.into()).or_insert(0) += 1;
        }
        Self::from_map(map)
    }

    pub fn empty() -> Self {
        Self::from_map(BTreeMap::new())
    }

    /// Counts must already be within [`MAX_MULTIPLICITY`]; build them
    /// with [`tally`]. Zero counts are dropped.
    pub(crate) fn from_map(mut counts: BTreeMap<MathObject, u64>) -> Self {
        counts.retain(|_, n| *n > 0);
        debug_assert!(counts.values().all(|n| *n <= MAX_MULTIPLICITY));
        // At most 2^64 counts below 2^63 each.
        let cardinality = counts.values().map(|&n| u128::from(n)).sum();
        let hash = structural_hash(3, |h| {
            counts.len().hash(h);
            for (element, n) in &counts {
                element.hash(h);
                n.hash(h);
            }
        });
        Self {
            inner: Arc::new(MultisetInner {
                counts,
                cardinality,
                hash,
                flags: Flags::default(),
            }),
        }
    }

    /// Multiplicity of `element`; zero if absent.
    pub fn multiplicity(&self, element: &MathObject) -> u64 {
        self.inner.counts.get(element).copied().unwrap_or(0)
    }

    pub fn contains(&self, element: &MathObject) -> bool {
        self.inner.counts.contains_key(element)
    }

    /// Sum of all multiplicities.
    pub fn cardinality(&self) -> u128 {
        self.inner.cardinality
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.inner.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.counts.is_empty()
    }

    /// Each element, repeated by its multiplicity, in order. Each call
    /// starts afresh.
    pub fn iter(&self) -> impl Iterator<Item = &MathObject> + '_ {
        self.inner
            .counts
            .iter()
            .flat_map(|(element, &n)| {
                iter::repeat(element).take(usize::try_from(n).unwrap_or(usize::MAX))
            })
    }

    /// Distinct elements with their multiplicities, in order.
    pub fn counts(&self) -> impl Iterator<Item = (&MathObject, u64)> + Clone + '_ {
        self.inner.counts.iter().map(|(element, &n)| (element, n))
    }

    pub(crate) fn count_map(&self) -> &BTreeMap<MathObject, u64> {
        &self.inner.counts
    }

    pub(crate) fn relations(&self) -> impl Iterator<Item = &Set> + '_ {
        self.inner.counts.keys().filter_map(MathObject::as_set)
    }

    /// All elements are couplets. True for the empty multiset.
    pub fn is_multirelation(&self) -> bool {
        self.inner.counts.keys().all(MathObject::is_couplet)
    }

    /// The rights of the couplets with left `left`, each keeping the
    /// multiplicity of its couplet.
    pub(crate) fn rights_at(&self, left: &MathObject) -> Multiset {
        let counts = self
            .counts()
            .filter_map(|(element, n)| element.as_couplet().map(|c| (c, n)))
            .filter(|(c, _)| c.left() == left)
            .map(|(c, n)| (c.right().clone(), n))
            .collect();
        Multiset::from_map(counts)
    }

    /// All elements are relations. True for the empty multiset.
    pub fn is_multiclan(&self) -> bool {
        self.inner.flags.get_or_init(Property::Multiclan, || {
            self.inner
                .counts
                .keys()
                .all(|e| e.as_set().is_some_and(Set::is_relation))
        })
    }

    pub fn is_functional(&self) -> bool {
        self.inner.flags.get_or_init(Property::LeftFunctional, || {
            self.is_multiclan() && self.relations().all(Set::is_functional)
        })
    }

    pub fn is_right_functional(&self) -> bool {
        self.inner.flags.get_or_init(Property::RightFunctional, || {
            self.is_multiclan() && self.relations().all(Set::is_right_functional)
        })
    }

    pub fn is_regular(&self) -> bool {
        self.inner.flags.get_or_init(Property::LeftRegular, || {
            self.is_functional() && self.relations().map(Set::lefts).all_equal()
        })
    }

    /// Right-functional relations that all share one right set.
    pub fn is_right_regular(&self) -> bool {
        self.inner.flags.get_or_init(Property::RightRegular, || {
            self.is_right_functional() && self.relations().map(Set::rights).all_equal()
        })
    }

    pub fn is_absolute(&self) -> bool {
        self.inner.flags.get_or_init(Property::Absolute, || {
            all_absolute(self.inner.counts.keys())
        })
    }
}

/// Add `n` occurrences of `element` to `counts`.
pub(crate) fn tally(
    counts: &mut BTreeMap<MathObject, u64>,
    element: MathObject,
    n: u64,
) -> Result<()> {
    let current = counts.get(&element).copied().unwrap_or(0);
    match current.checked_add(n).filter(|total| *total <= MAX_MULTIPLICITY) {
        Some(total) => {
            counts.insert(element, total);
            Ok(())
        }
        None => Err(overflow(&element)),
    }
}

pub(crate) fn overflow(element: &MathObject) -> AlgebraError {
    tracing::debug!(%element, "multiplicity overflow");
    AlgebraError::MultiplicityOverflow {
        element: element.to_string(),
    }
}

impl Default for Multiset {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Multiset {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.hash == other.inner.hash
                && self.inner.cardinality == other.inner.cardinality
                && self.inner.counts == other.inner.counts)
    }
}

impl Eq for Multiset {}

impl PartialOrd for Multiset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Multiset {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        self.inner.counts.cmp(&other.inner.counts)
    }
}

impl Hash for Multiset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.hash);
    }
}

impl Collection for Multiset {
    fn occurrences(&self, element: &MathObject) -> u64 {
        self.multiplicity(element)
    }

    fn entries(&self) -> impl Iterator<Item = (&MathObject, u64)> + '_ {
        self.counts()
    }

    fn distinct_len(&self) -> usize {
        self.len()
    }
}

impl TryFrom<Vec<(MathObject, i64)>> for Multiset {
    type Error = AlgebraError;

    fn try_from(counts: Vec<(MathObject, i64)>) -> Result<Self> {
        Multiset::from_counts(counts)
    }
}

impl From<Multiset> for Vec<(MathObject, u64)> {
    fn from(multiset: Multiset) -> Self {
        multiset
            .counts()
            .map(|(element, n)| (element.clone(), n))
            .collect()
    }
}

impl fmt::Display for Multiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.counts()
                .format_with(", ", |(element, n), f| f(&format_args!("{}:{}", element, n)))
        )
    }
}

impl fmt::Debug for Multiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
