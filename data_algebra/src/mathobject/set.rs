/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use super::Collection;
use super::Couplet;
use super::MathObject;
use super::all_absolute;
use super::flags::Flags;
use super::flags::Property;
use super::structural_hash;

/// An immutable collection of distinct math objects.
///
/// Elements are kept in their natural order, so iteration and
/// printing are deterministic. Cloning is cheap: clones share
/// storage, including the property cache.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "Vec<MathObject>", into = "Vec<MathObject>")]
pub struct Set {
    inner: Arc<SetInner>,
}

struct SetInner {
    elements: BTreeSet<MathObject>,
    hash: u64,
    flags: Flags,
}

impl Set {
    /// Build a set; duplicates collapse.
    pub fn new<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MathObject>,
    {
        Self::from_elements(elements.into_iter().map(Into::into).collect())
    }

    pub fn empty() -> Self {
        Self::from_elements(BTreeSet::new())
    }

    pub(crate) fn from_elements(elements: BTreeSet<MathObject>) -> Self {
        let hash = structural_hash(2, |h| {
            elements.len().hash(h);
            for element in &elements {
                element.hash(h);
            }
        });
        Self {
            inner: Arc::new(SetInner {
                elements,
                hash,
                flags: Flags::default(),
            }),
        }
    }

    pub fn contains(&self, element: &MathObject) -> bool {
        self.inner.elements.contains(element)
    }

    pub fn len(&self) -> usize {
        self.inner.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.elements.is_empty()
    }

    /// Number of elements.
    pub fn cardinality(&self) -> usize {
        self.len()
    }

    /// Iterate in order. Each call starts afresh.
    pub fn iter(&self) -> btree_set::Iter<'_, MathObject> {
        self.inner.elements.iter()
    }

    pub(crate) fn elements(&self) -> &BTreeSet<MathObject> {
        &self.inner.elements
    }

    pub(crate) fn couplets(&self) -> impl Iterator<Item = &Couplet> + '_ {
        self.iter().filter_map(MathObject::as_couplet)
    }

    pub(crate) fn relations(&self) -> impl Iterator<Item = &Set> + '_ {
        self.iter().filter_map(MathObject::as_set)
    }

    pub(crate) fn lefts(&self) -> Set {
        self.couplets().map(|c| c.left().clone()).collect()
    }

    pub(crate) fn rights(&self) -> Set {
        self.couplets().map(|c| c.right().clone()).collect()
    }

    pub(crate) fn rights_at(&self, left: &MathObject) -> Set {
        self.couplets()
            .filter(|c| c.left() == left)
            .map(|c| c.right().clone())
            .collect()
    }

    pub(crate) fn union_all(sets: impl IntoIterator<Item = Set>) -> Set {
        sets.into_iter()
            .flat_map(|s| s.inner.elements.clone())
            .collect()
    }

    /// All elements are couplets. True for the empty set.
    pub fn is_relation(&self) -> bool {
        self.inner.flags.get_or_init(Property::Relation, || {
            self.iter().all(MathObject::is_couplet)
        })
    }

    /// All elements are relations. True for the empty set.
    pub fn is_clan(&self) -> bool {
        self.inner.flags.get_or_init(Property::Clan, || {
            self.iter()
                .all(|e| e.as_set().is_some_and(Set::is_relation))
        })
    }

    /// A relation in which no two couplets share a left, or a clan of
    /// such relations.
    pub fn is_functional(&self) -> bool {
        self.inner.flags.get_or_init(Property::LeftFunctional, || {
            if self.is_relation() {
                self.couplets().map(Couplet::left).all_unique()
            } else if self.is_clan() {
                self.relations().all(Set::is_functional)
            } else {
                false
            }
        })
    }

    /// A relation in which no two couplets share a right, or a clan of
    /// such relations.
    pub fn is_right_functional(&self) -> bool {
        self.inner.flags.get_or_init(Property::RightFunctional, || {
            if self.is_relation() {
                self.couplets().map(Couplet::right).all_unique()
            } else if self.is_clan() {
                self.relations().all(Set::is_right_functional)
            } else {
                false
            }
        })
    }

    pub fn is_bijection(&self) -> bool {
        self.is_relation() && self.is_functional() && self.is_right_functional()
    }

    /// A clan whose relations are all functional and share one left
    /// set. True for the empty clan.
    pub fn is_regular(&self) -> bool {
        self.inner.flags.get_or_init(Property::LeftRegular, || {
            self.is_clan()
                && self.relations().all(Set::is_functional)
                && self.relations().map(Set::lefts).all_equal()
        })
    }

    /// A clan whose relations are all right-functional and share one
    /// right set.
    pub fn is_right_regular(&self) -> bool {
        self.inner.flags.get_or_init(Property::RightRegular, || {
            self.is_clan()
                && self.relations().all(Set::is_right_functional)
                && self.relations().map(Set::rights).all_equal()
        })
    }

    /// Every couplet is reflexive (`x->x`); for a clan, every relation
    /// is reflexive.
    pub fn is_reflexive(&self) -> bool {
        self.inner.flags.get_or_init(Property::Reflexive, || {
            if self.is_relation() {
                self.couplets().all(Couplet::is_reflexive)
            } else if self.is_clan() {
                self.relations().all(Set::is_reflexive)
            } else {
                false
            }
        })
    }

    pub fn is_symmetric(&self) -> bool {
        self.inner.flags.get_or_init(Property::Symmetric, || {
            if self.is_relation() {
                self.couplets()
                    .all(|c| self.contains(&MathObject::Couplet(c.transpose())))
            } else if self.is_clan() {
                self.relations().all(Set::is_symmetric)
            } else {
                false
            }
        })
    }

    pub fn is_transitive(&self) -> bool {
        self.inner.flags.get_or_init(Property::Transitive, || {
            if self.is_relation() {
                self.couplets()
                    .cartesian_product(self.couplets().collect::<Vec<_>>())
                    .filter(|(c1, c2)| c1.left() == c2.right())
                    .all(|(c1, c2)| {
                        self.contains(&MathObject::Couplet(Couplet::new(
                            c2.left().clone(),
                            c1.right().clone(),
                        )))
                    })
            } else if self.is_clan() {
                self.relations().all(Set::is_transitive)
            } else {
                false
            }
        })
    }

    pub fn is_equivalence_relation(&self) -> bool {
        self.is_relation() && self.is_reflexive() && self.is_symmetric() && self.is_transitive()
    }

    /// Built directly from atoms: a set of atoms, a relation of
    /// couplets of atoms, or a clan of such relations.
    pub fn is_absolute(&self) -> bool {
        self.inner
            .flags
            .get_or_init(Property::Absolute, || all_absolute(self.iter()))
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.hash == other.inner.hash
                && self.inner.elements == other.inner.elements)
    }
}

impl Eq for Set {}

impl PartialOrd for Set {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Set {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        self.inner.elements.cmp(&other.inner.elements)
    }
}

impl Hash for Set {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.hash);
    }
}

impl Collection for Set {
    fn occurrences(&self, element: &MathObject) -> u64 {
        u64::from(self.contains(element))
    }

    fn entries(&self) -> impl Iterator<Item = (&MathObject, u64)> + '_ {
        self.iter().map(|element| (element, 1))
    }

    fn distinct_len(&self) -> usize {
        self.len()
    }
}

impl<T: Into<MathObject>> FromIterator<T> for Set {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Set::new(iter)
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a MathObject;
    type IntoIter = btree_set::Iter<'a, MathObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<MathObject>> for Set {
    fn from(elements: Vec<MathObject>) -> Self {
        Set::new(elements)
    }
}

impl From<Set> for Vec<MathObject> {
    fn from(set: Set) -> Self {
        set.iter().cloned().collect()
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
