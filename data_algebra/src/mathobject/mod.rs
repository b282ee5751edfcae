/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The values of the data algebra.
//!
//! A [`MathObject`] is one of four things:
//!
//! - an [`Atom`], wrapping a scalar [`Value`];
//! - a [`Couplet`], an ordered pair `left->right`;
//! - a [`Set`] of distinct math objects;
//! - a [`Multiset`], mapping distinct math objects to positive
//!   multiplicities.
//!
//! Sets and multisets are further classified by their contents: a set
//! of couplets is a *relation*, a set of relations is a *clan*, a
//! multiset of relations is a *multiclan*. These classifications, and
//! the other structural properties below, are derived lazily from the
//! contents and cached on the container (see [`Set::is_relation`]
//! and friends). Every value is immutable; equality, ordering and
//! hashing are structural.
//!
//! ```
//! use data_algebra::set;
//! use data_algebra::Couplet;
//! use data_algebra::MathObject;
//!
//! let rel = MathObject::from(set![Couplet::new("a", 1), Couplet::new("b", 2)]);
//! assert!(rel.is_relation());
//! assert!(rel.is_functional());
//! assert_eq!(rel.apply("b").unwrap(), MathObject::from(2));
//! assert_eq!(rel.to_string(), "{('a'->1), ('b'->2)}");
//! ```

mod atom;
mod couplet;
pub(crate) mod flags;
mod multiset;
mod set;

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

pub use atom::Atom;
pub use atom::Value;
pub use couplet::Couplet;
use enum_as_inner::EnumAsInner;
pub use multiset::MAX_MULTIPLICITY;
pub use multiset::Multiset;
pub(crate) use multiset::overflow;
pub(crate) use multiset::tally;
use serde::Deserialize;
use serde::Serialize;
pub use set::Set;

use crate::error::AlgebraError;
use crate::error::Result;

/// A data-algebra value.
#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumAsInner,
    Serialize,
    Deserialize
)]
pub enum MathObject {
    Atom(Atom),
    Couplet(Couplet),
    Set(Set),
    Multiset(Multiset),
}

/// The classification of a [`MathObject`], as reported in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Atom,
    Couplet,
    Set,
    Relation,
    Function,
    Clan,
    Multiset,
    Multiclan,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Atom => "atom",
            Kind::Couplet => "couplet",
            Kind::Set => "set",
            Kind::Relation => "relation",
            Kind::Function => "function",
            Kind::Clan => "clan",
            Kind::Multiset => "multiset",
            Kind::Multiclan => "multiclan",
        };
        f.write_str(name)
    }
}

impl MathObject {
    /// The most specific classification of this value. The empty set
    /// is reported as a plain set, the empty multiset as a plain
    /// multiset.
    pub fn kind(&self) -> Kind {
        match self {
            MathObject::Atom(_) => Kind::Atom,
            MathObject::Couplet(_) => Kind::Couplet,
            MathObject::Set(s) if s.is_empty() => Kind::Set,
            MathObject::Set(s) if s.is_relation() && s.is_functional() => Kind::Function,
            MathObject::Set(s) if s.is_relation() => Kind::Relation,
            MathObject::Set(s) if s.is_clan() => Kind::Clan,
            MathObject::Set(_) => Kind::Set,
            MathObject::Multiset(m) if !m.is_empty() && m.is_multiclan() => Kind::Multiclan,
            MathObject::Multiset(_) => Kind::Multiset,
        }
    }

    pub fn is_relation(&self) -> bool {
        self.as_set().is_some_and(Set::is_relation)
    }

    pub fn is_clan(&self) -> bool {
        self.as_set().is_some_and(Set::is_clan)
    }

    pub fn is_multiclan(&self) -> bool {
        self.as_multiset().is_some_and(Multiset::is_multiclan)
    }

    /// Left-functional: a relation with no two couplets sharing a
    /// left, or a clan or multiclan of such relations.
    pub fn is_functional(&self) -> bool {
        match self {
            MathObject::Set(s) => s.is_functional(),
            MathObject::Multiset(m) => m.is_functional(),
            _ => false,
        }
    }

    pub fn is_right_functional(&self) -> bool {
        match self {
            MathObject::Set(s) => s.is_right_functional(),
            MathObject::Multiset(m) => m.is_right_functional(),
            _ => false,
        }
    }

    pub fn is_bijection(&self) -> bool {
        self.as_set().is_some_and(Set::is_bijection)
    }

    /// Left-regular: a clan or multiclan whose relations are all
    /// functional with one common left set.
    pub fn is_regular(&self) -> bool {
        match self {
            MathObject::Set(s) => s.is_regular(),
            MathObject::Multiset(m) => m.is_regular(),
            _ => false,
        }
    }

    /// Right-regular: a clan or multiclan whose relations are all
    /// right-functional with one common right set.
    pub fn is_right_regular(&self) -> bool {
        match self {
            MathObject::Set(s) => s.is_right_regular(),
            MathObject::Multiset(m) => m.is_right_regular(),
            _ => false,
        }
    }

    pub fn is_reflexive(&self) -> bool {
        match self {
            MathObject::Couplet(c) => c.is_reflexive(),
            MathObject::Set(s) => s.is_reflexive(),
            _ => false,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        self.as_set().is_some_and(Set::is_symmetric)
    }

    pub fn is_transitive(&self) -> bool {
        self.as_set().is_some_and(Set::is_transitive)
    }

    pub fn is_equivalence_relation(&self) -> bool {
        self.as_set().is_some_and(Set::is_equivalence_relation)
    }

    /// Built directly from atoms at this value's own level.
    pub fn is_absolute(&self) -> bool {
        match self {
            MathObject::Atom(_) => true,
            MathObject::Couplet(c) => c.is_absolute(),
            MathObject::Set(s) => s.is_absolute(),
            MathObject::Multiset(m) => m.is_absolute(),
        }
    }

    /// The left set of a relation, clan or multiclan.
    pub fn left_set(&self) -> Result<Set> {
        match self {
            MathObject::Set(s) if s.is_relation() => Ok(s.lefts()),
            MathObject::Set(s) if s.is_clan() => Ok(Set::union_all(s.relations().map(Set::lefts))),
            MathObject::Multiset(m) if m.is_multiclan() => {
                Ok(Set::union_all(m.relations().map(Set::lefts)))
            }
            other => type_mismatch("left_set", Kind::Relation, other),
        }
    }

    /// The right set of a relation, clan or multiclan.
    pub fn right_set(&self) -> Result<Set> {
        match self {
            MathObject::Set(s) if s.is_relation() => Ok(s.rights()),
            MathObject::Set(s) if s.is_clan() => Ok(Set::union_all(s.relations().map(Set::rights))),
            MathObject::Multiset(m) if m.is_multiclan() => {
                Ok(Set::union_all(m.relations().map(Set::rights)))
            }
            other => type_mismatch("right_set", Kind::Relation, other),
        }
    }

    /// Apply a function to `left`.
    ///
    /// Fails with [`AlgebraError::NotDefined`] if `left` is not in the
    /// function's left set, and with [`AlgebraError::TypeMismatch`] if
    /// this value is not a function.
    pub fn apply(&self, left: impl Into<MathObject>) -> Result<MathObject> {
        let left = left.into();
        match self {
            MathObject::Set(s) if s.is_relation() && s.is_functional() => s
                .couplets()
                .find(|c| c.left() == &left)
                .map(|c| c.right().clone())
                .ok_or_else(|| AlgebraError::NotDefined {
                    left: left.to_string(),
                }),
            other => type_mismatch("apply", Kind::Function, other),
        }
    }

    /// All rights paired with `left`: the set of them in a relation or
    /// in any relation of a clan, and the multiset of them in a
    /// multiset of couplets, where each right keeps the multiplicity of
    /// its couplet. Empty if there are none.
    pub fn get(&self, left: impl Into<MathObject>) -> Result<MathObject> {
        let left = left.into();
        match self {
            MathObject::Set(s) if s.is_relation() => Ok(s.rights_at(&left).into()),
            MathObject::Set(s) if s.is_clan() => {
                Ok(Set::union_all(s.relations().map(|r| r.rights_at(&left))).into())
            }
            MathObject::Multiset(m) if m.is_multirelation() => Ok(m.rights_at(&left).into()),
            other => type_mismatch("get", Kind::Relation, other),
        }
    }
}

pub(crate) fn type_mismatch<T>(
    op: &'static str,
    expected: Kind,
    found: &MathObject,
) -> Result<T> {
    let found = found.kind();
    tracing::debug!(op, %expected, %found, "type mismatch");
    Err(AlgebraError::TypeMismatch {
        op,
        expected,
        found,
    })
}

/// Hash the parts of a container into a single memoized value.
pub(crate) fn structural_hash(tag: u8, write: impl FnOnce(&mut DefaultHasher)) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    write(&mut hasher);
    hasher.finish()
}

/// True if all elements are atoms, or all are couplets of atoms, or
/// all are relations made of such couplets.
pub(crate) fn all_absolute<'a, I>(mut elements: I) -> bool
where
    I: Iterator<Item = &'a MathObject> + Clone,
{
    elements.clone().all(MathObject::is_atom)
        || elements
            .clone()
            .all(|e| e.as_couplet().is_some_and(Couplet::is_absolute))
        || elements.all(|e| e.as_set().is_some_and(|r| r.is_relation() && r.is_absolute()))
}

/// Uniform multiplicity view over sets and multisets. A set is a
/// multiset whose multiplicities are all one.
pub trait Collection {
    /// How many times `element` occurs (zero if absent).
    fn occurrences(&self, element: &MathObject) -> u64;

    /// Distinct elements with their multiplicities, in order.
    fn entries(&self) -> impl Iterator<Item = (&MathObject, u64)> + '_;

    /// Number of distinct elements.
    fn distinct_len(&self) -> usize;

    /// Sub-collection test: every element occurs in `other` at least
    /// as often as in `self`.
    fn is_subcollection_of(&self, other: &Self) -> bool {
        self.distinct_len() <= other.distinct_len()
            && self
                .entries()
                .all(|(element, n)| n <= other.occurrences(element))
    }
}

impl fmt::Display for MathObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathObject::Atom(a) => fmt::Display::fmt(a, f),
            MathObject::Couplet(c) => fmt::Display::fmt(c, f),
            MathObject::Set(s) => fmt::Display::fmt(s, f),
            MathObject::Multiset(m) => fmt::Display::fmt(m, f),
        }
    }
}

impl fmt::Debug for MathObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<Atom> for MathObject {
    fn from(atom: Atom) -> Self {
        MathObject::Atom(atom)
    }
}

impl From<Couplet> for MathObject {
    fn from(couplet: Couplet) -> Self {
        MathObject::Couplet(couplet)
    }
}

impl From<Set> for MathObject {
    fn from(set: Set) -> Self {
        MathObject::Set(set)
    }
}

impl From<Multiset> for MathObject {
    fn from(multiset: Multiset) -> Self {
        MathObject::Multiset(multiset)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for MathObject {
                fn from(value: $ty) -> Self {
                    MathObject::Atom(Atom::new(value))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, u32, i64, f64, &str, String, Value);

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::set;

    fn rel(pairs: &[(&str, i32)]) -> Set {
        pairs.iter().map(|&(l, r)| Couplet::new(l, r)).collect()
    }

    #[test]
    fn test_kind() {
        assert_eq!(MathObject::from(1).kind(), Kind::Atom);
        assert_eq!(MathObject::from(Couplet::new(1, 2)).kind(), Kind::Couplet);
        assert_eq!(MathObject::from(Set::empty()).kind(), Kind::Set);
        assert_eq!(MathObject::from(set![1, 2]).kind(), Kind::Set);
        assert_eq!(
            MathObject::from(rel(&[("a", 1), ("b", 2)])).kind(),
            Kind::Function
        );
        assert_eq!(
            MathObject::from(rel(&[("a", 1), ("a", 2)])).kind(),
            Kind::Relation
        );
        assert_eq!(
            MathObject::from(set![rel(&[("a", 1)])]).kind(),
            Kind::Clan
        );
        assert_eq!(
            MathObject::from(Multiset::from_elements([rel(&[("a", 1)])])).kind(),
            Kind::Multiclan
        );
    }

    #[test]
    fn test_structural_equality_and_hash() {
        let a = MathObject::from(set![Couplet::new("a", set![1, 2]), Couplet::new("b", 3)]);
        let b = MathObject::from(set![Couplet::new("b", 3), Couplet::new("a", set![2, 1])]);
        assert_eq!(a, b);

        let mut counts = HashMap::new();
        *counts.entry(a).or_insert(0) += 1;
        *counts.entry(b).or_insert(0) += 1;
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_apply() {
        let f = MathObject::from(rel(&[("a", 1), ("b", 2)]));
        assert_eq!(f.apply("a").unwrap(), MathObject::from(1));
        assert_eq!(
            f.apply("z"),
            Err(AlgebraError::NotDefined {
                left: "'z'".to_string()
            })
        );

        let not_a_function = MathObject::from(rel(&[("a", 1), ("a", 2)]));
        assert!(matches!(
            not_a_function.apply("a"),
            Err(AlgebraError::TypeMismatch {
                op: "apply",
                expected: Kind::Function,
                found: Kind::Relation,
            })
        ));
    }

    #[test]
    fn test_get() {
        let r = MathObject::from(rel(&[("a", 1), ("a", 2), ("b", 3)]));
        assert_eq!(r.get("a").unwrap(), MathObject::from(set![1, 2]));
        assert_eq!(r.get("z").unwrap(), MathObject::from(Set::empty()));

        let clan = MathObject::from(set![rel(&[("a", 1)]), rel(&[("a", 5), ("c", 0)])]);
        assert_eq!(clan.get("a").unwrap(), MathObject::from(set![1, 5]));

        assert!(MathObject::from(3).get("a").is_err());
        assert!(MathObject::from(Multiset::from_elements([1])).get("a").is_err());
    }

    #[test]
    fn test_get_on_multiset_of_couplets() {
        let ms = MathObject::from(
            Multiset::from_counts([
                (Couplet::new("a", 1), 2),
                (Couplet::new("a", 2), 1),
                (Couplet::new("b", 1), 4),
            ])
            .unwrap(),
        );
        assert_eq!(
            ms.get("a").unwrap(),
            MathObject::from(Multiset::from_counts([(1, 2), (2, 1)]).unwrap())
        );
        assert_eq!(ms.get("z").unwrap(), MathObject::from(Multiset::empty()));
    }

    #[test]
    fn test_left_and_right_sets() {
        let clan = MathObject::from(set![rel(&[("a", 1)]), rel(&[("b", 2), ("c", 2)])]);
        assert_eq!(clan.left_set().unwrap(), set!["a", "b", "c"]);
        assert_eq!(clan.right_set().unwrap(), set![1, 2]);
        assert!(MathObject::from(set![1]).left_set().is_err());
    }

    #[test]
    fn test_property_queries_on_non_containers() {
        let atom = MathObject::from("x");
        assert!(!atom.is_relation());
        assert!(!atom.is_clan());
        assert!(!atom.is_functional());
        assert!(atom.is_absolute());
        assert!(MathObject::from(Couplet::new(1, 1)).is_reflexive());
    }

    #[test]
    fn test_collection_subsets() {
        let small = set![1, 2];
        let big = set![1, 2, 3];
        assert!(small.is_subcollection_of(&big));
        assert!(!big.is_subcollection_of(&small));

        let ms = Multiset::from_elements(["a", "a", "b"]);
        let more = Multiset::from_elements(["a", "a", "a", "b"]);
        assert!(ms.is_subcollection_of(&more));
        assert!(!more.is_subcollection_of(&ms));
    }
}
