/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The algebra of multisets.
//!
//! Union and intersection act pointwise on multiplicities as `max` and
//! `min`; [`add`] sums them, failing past
//! [`MAX_MULTIPLICITY`](crate::MAX_MULTIPLICITY); [`minus`] subtracts
//! them, dropping any element whose multiplicity reaches zero.

use std::collections::BTreeMap;

use itertools::EitherOrBoth;
use itertools::merge_join_by;

use super::expect_multiset;
use super::operands;
use crate::error::Result;
use crate::lattice::BoundedJoinSemilattice;
use crate::lattice::MeetSemilattice;
use crate::mathobject::Collection;
use crate::mathobject::Kind;
use crate::mathobject::MAX_MULTIPLICITY;
use crate::mathobject::MathObject;
use crate::mathobject::Multiset;
use crate::mathobject::Set;
use crate::mathobject::tally;
use crate::mathobject::type_mismatch;
use crate::undef::Operand;
use crate::undef::undef;

impl Multiset {
    /// Walk both count maps in order, combining the multiplicities of
    /// each element (zero where absent).
    fn zip_counts(&self, other: &Multiset, f: impl Fn(u64, u64) -> u64) -> Multiset {
        let counts: BTreeMap<MathObject, u64> =
            merge_join_by(self.count_map(), other.count_map(), |(a, _), (b, _)| a.cmp(b))
                .map(|entry| match entry {
                    EitherOrBoth::Both((e, &m), (_, &n)) => (e.clone(), f(m, n)),
                    EitherOrBoth::Left((e, &m)) => (e.clone(), f(m, 0)),
                    EitherOrBoth::Right((e, &n)) => (e.clone(), f(0, n)),
                })
                .collect();
        Multiset::from_map(counts)
    }

    pub fn union(&self, other: &Multiset) -> Multiset {
        self.zip_counts(other, u64::max)
    }

    pub fn intersect(&self, other: &Multiset) -> Multiset {
        self.zip_counts(other, u64::min)
    }

    pub fn add(&self, other: &Multiset) -> Result<Multiset> {
        let mut counts = self.count_map().clone();
        for (element, n) in other.counts() {
            tally(&mut counts, element.clone(), n)?;
        }
        Ok(Multiset::from_map(counts))
    }

    /// [`Multiset::add`], stopping each multiplicity at
    /// [`MAX_MULTIPLICITY`].
    pub fn saturating_add(&self, other: &Multiset) -> Multiset {
        self.zip_counts(other, |m, n| m.saturating_add(n).min(MAX_MULTIPLICITY))
    }

    pub fn minus(&self, other: &Multiset) -> Multiset {
        self.zip_counts(other, u64::saturating_sub)
    }

    pub fn is_subset_of(&self, other: &Multiset) -> bool {
        self.is_subcollection_of(other)
    }
}

/// Pointwise maximum of multiplicities.
pub fn union(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_multiset("union", a)?, expect_multiset("union", b)?);
    Ok(a.union(&b).into())
}

/// Pointwise minimum of multiplicities.
pub fn intersect(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (
        expect_multiset("intersect", a)?,
        expect_multiset("intersect", b)?,
    );
    Ok(a.intersect(&b).into())
}

/// Sum of multiplicities.
pub fn add(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_multiset("add", a)?, expect_multiset("add", b)?);
    Ok(a.add(&b)?.into())
}

/// Difference of multiplicities, floored at zero.
pub fn minus(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_multiset("minus", a)?, expect_multiset("minus", b)?);
    Ok(a.minus(&b).into())
}

/// `a` if `a` is a submultiset of `b`, else undefined.
pub fn substrict(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (
        expect_multiset("substrict", a)?,
        expect_multiset("substrict", b)?,
    );
    if a.is_subset_of(&b) {
        Ok(a.into())
    } else {
        undef("substrict")
    }
}

/// `a` if `b` is a submultiset of `a`, else undefined.
pub fn superstrict(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (
        expect_multiset("superstrict", a)?,
        expect_multiset("superstrict", b)?,
    );
    if b.is_subset_of(&a) {
        Ok(a.into())
    } else {
        undef("superstrict")
    }
}

pub fn is_subset_of(a: impl Operand, b: impl Operand) -> Result<bool> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (
        expect_multiset("is_subset_of", a)?,
        expect_multiset("is_subset_of", b)?,
    );
    Ok(a.is_subset_of(&b))
}

pub fn is_superset_of(a: impl Operand, b: impl Operand) -> Result<bool> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (
        expect_multiset("is_superset_of", a)?,
        expect_multiset("is_superset_of", b)?,
    );
    Ok(b.is_subset_of(&a))
}

/// The set of distinct elements.
pub fn demultify(multiset: impl Operand) -> Result<MathObject> {
    let multiset = expect_multiset("demultify", multiset)?;
    Ok(multiset
        .counts()
        .map(|(element, _)| element.clone())
        .collect::<Set>()
        .into())
}

fn member_multisets(op: &'static str, set: &Set) -> Result<Vec<Multiset>> {
    set.iter()
        .map(|element| match element {
            MathObject::Multiset(m) => Ok(m.clone()),
            other => type_mismatch(op, Kind::Multiset, other),
        })
        .collect()
}

/// Union of all the multisets in a set of multisets.
pub fn big_union(multisets: impl Operand) -> Result<MathObject> {
    let multisets = super::expect_set("big_union", multisets)?;
    let members = member_multisets("big_union", &multisets)?;
    Ok(Multiset::join_all_from_bottom(members).into())
}

/// Intersection of all the multisets in a set of multisets. Empty for
/// an empty argument.
pub fn big_intersect(multisets: impl Operand) -> Result<MathObject> {
    let multisets = super::expect_set("big_intersect", multisets)?;
    let members = member_multisets("big_intersect", &multisets)?;
    Ok(Multiset::meet_all(members).unwrap_or_default().into())
}

pub fn is_member(obj: &MathObject) -> bool {
    obj.is_multiset()
}

pub fn is_absolute_member(obj: &MathObject) -> bool {
    obj.as_multiset()
        .is_some_and(|m| m.counts().all(|(e, _)| e.is_atom()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::set;
    use crate::strategy::gen_multiset;
    use crate::undef::Definedness;
    use crate::undef::Undef;

    fn counts(pairs: &[(&str, i64)]) -> Multiset {
        Multiset::from_counts(pairs.iter().copied()).unwrap()
    }

    fn mo(m: Multiset) -> MathObject {
        MathObject::from(m)
    }

    #[test]
    fn test_worked_example() {
        let ms_1 = counts(&[("a", 2), ("b", 3)]);
        let ms_2 = Multiset::from_elements(["b", "b", "c"]);
        assert_eq!(
            union(&ms_1, &ms_2).unwrap(),
            mo(counts(&[("a", 2), ("b", 3), ("c", 1)]))
        );
        assert_eq!(intersect(&ms_1, &ms_2).unwrap(), mo(counts(&[("b", 2)])));
        assert_eq!(
            add(&ms_1, &ms_2).unwrap(),
            mo(counts(&[("a", 2), ("b", 5), ("c", 1)]))
        );
        assert_eq!(
            minus(&ms_1, &ms_2).unwrap(),
            mo(counts(&[("a", 2), ("b", 1)]))
        );
    }

    #[test]
    fn test_minus_floors_at_zero() {
        let a = counts(&[("a", 2)]);
        let b = counts(&[("a", 3)]);
        let diff = minus(&a, &b).unwrap();
        assert_eq!(diff, mo(Multiset::empty()));
        assert_eq!(diff.as_multiset().map(Multiset::cardinality), Some(0));
    }

    #[test]
    fn test_add_overflows_past_cap() {
        let top = counts(&[("a", i64::MAX)]);
        assert_eq!(
            add(&top, &top),
            Err(crate::AlgebraError::MultiplicityOverflow {
                element: "'a'".to_string(),
            })
        );
        assert_eq!(add(&top, Multiset::empty()).unwrap(), mo(top.clone()));
        assert_eq!(top.saturating_add(&top), top);
    }

    #[test]
    fn test_strictions() {
        let small = counts(&[("a", 1)]);
        let big = counts(&[("a", 2), ("b", 1)]);
        assert_eq!(substrict(&small, &big).unwrap(), mo(small.clone()));
        assert!(substrict(&big, &small).is_undef());
        assert_eq!(superstrict(&big, &small).unwrap(), mo(big.clone()));
        // Same support, larger multiplicity.
        assert!(substrict(counts(&[("a", 3)]), &big).is_undef());
        assert_eq!(is_subset_of(&small, &big), Ok(true));
        assert_eq!(is_superset_of(&small, &big), Ok(false));
    }

    #[test]
    fn test_undef_and_type_errors() {
        assert!(add(Undef, Multiset::empty()).is_undef());
        assert!(matches!(
            add(set![1], Multiset::empty()),
            Err(crate::AlgebraError::TypeMismatch {
                expected: Kind::Multiset,
                ..
            })
        ));
    }

    #[test]
    fn test_demultify() {
        let ms = counts(&[("a", 4), ("b", 1)]);
        assert_eq!(demultify(&ms).unwrap(), MathObject::from(set!["a", "b"]));
    }

    #[test]
    fn test_big_operations() {
        let family = set![counts(&[("a", 2)]), counts(&[("a", 1), ("b", 1)])];
        assert_eq!(
            big_union(&family).unwrap(),
            mo(counts(&[("a", 2), ("b", 1)]))
        );
        assert_eq!(big_intersect(&family).unwrap(), mo(counts(&[("a", 1)])));
        assert_eq!(big_intersect(Set::empty()).unwrap(), mo(Multiset::empty()));
    }

    #[test]
    fn test_membership() {
        assert!(is_member(&mo(Multiset::empty())));
        assert!(is_absolute_member(&mo(counts(&[("a", 1)]))));
        assert!(!is_member(&MathObject::from(set![1])));
    }

    proptest! {
        #[test]
        fn union_is_max_and_intersect_is_min(a in gen_multiset(5), b in gen_multiset(5)) {
            let u = a.union(&b);
            let i = a.intersect(&b);
            for (element, _) in a.counts().chain(b.counts()) {
                let (m, n) = (a.multiplicity(element), b.multiplicity(element));
                prop_assert_eq!(u.multiplicity(element), m.max(n));
                prop_assert_eq!(i.multiplicity(element), m.min(n));
            }
        }

        #[test]
        fn add_then_minus_restores(a in gen_multiset(5), b in gen_multiset(5)) {
            prop_assert_eq!(a.add(&b).unwrap().minus(&b), a.clone());
            prop_assert!(a.intersect(&b).is_subset_of(&a));
            prop_assert!(a.is_subset_of(&a.union(&b)));
        }
    }
}
