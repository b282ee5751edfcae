/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The algebra of sets.
//!
//! ```
//! use data_algebra::set;
//! use data_algebra::sets;
//! use data_algebra::Definedness;
//! use data_algebra::MathObject;
//!
//! let a = set![1, 2];
//! let b = set![2, 3];
//! assert_eq!(sets::union(&a, &b).unwrap(), MathObject::from(set![1, 2, 3]));
//! assert_eq!(sets::intersect(&a, &b).unwrap(), MathObject::from(set![2]));
//! assert!(sets::substrict(&a, &b).is_undef());
//! ```

use std::collections::BTreeMap;

use super::expect_set;
use super::operands;
use crate::error::Result;
use crate::lattice::BoundedJoinSemilattice;
use crate::lattice::MeetSemilattice;
use crate::mathobject::Collection;
use crate::mathobject::Kind;
use crate::mathobject::MathObject;
use crate::mathobject::Multiset;
use crate::mathobject::Set;
use crate::mathobject::type_mismatch;
use crate::undef::Operand;
use crate::undef::undef;

impl Set {
    pub fn union(&self, other: &Set) -> Set {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Set::from_elements(self.elements().union(other.elements()).cloned().collect())
    }

    pub fn intersect(&self, other: &Set) -> Set {
        Set::from_elements(
            self.elements()
                .intersection(other.elements())
                .cloned()
                .collect(),
        )
    }

    pub fn minus(&self, other: &Set) -> Set {
        Set::from_elements(self.elements().difference(other.elements()).cloned().collect())
    }

    pub fn symmetric_difference(&self, other: &Set) -> Set {
        Set::from_elements(
            self.elements()
                .symmetric_difference(other.elements())
                .cloned()
                .collect(),
        )
    }

    pub fn is_subset_of(&self, other: &Set) -> bool {
        self.is_subcollection_of(other)
    }
}

/// `a ∪ b`.
pub fn union(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_set("union", a)?, expect_set("union", b)?);
    Ok(a.union(&b).into())
}

/// `a ∩ b`.
pub fn intersect(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_set("intersect", a)?, expect_set("intersect", b)?);
    Ok(a.intersect(&b).into())
}

/// `a ∖ b`.
pub fn minus(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_set("minus", a)?, expect_set("minus", b)?);
    Ok(a.minus(&b).into())
}

/// Elements in exactly one of `a` and `b`.
pub fn symmetric_difference(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (
        expect_set("symmetric_difference", a)?,
        expect_set("symmetric_difference", b)?,
    );
    Ok(a.symmetric_difference(&b).into())
}

/// `a` if `a ⊆ b`, else undefined.
pub fn substrict(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_set("substrict", a)?, expect_set("substrict", b)?);
    if a.is_subset_of(&b) {
        Ok(a.into())
    } else {
        undef("substrict")
    }
}

/// `a` if `a ⊇ b`, else undefined.
pub fn superstrict(a: impl Operand, b: impl Operand) -> Result<MathObject> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_set("superstrict", a)?, expect_set("superstrict", b)?);
    if b.is_subset_of(&a) {
        Ok(a.into())
    } else {
        undef("superstrict")
    }
}

pub fn is_subset_of(a: impl Operand, b: impl Operand) -> Result<bool> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (expect_set("is_subset_of", a)?, expect_set("is_subset_of", b)?);
    Ok(a.is_subset_of(&b))
}

pub fn is_superset_of(a: impl Operand, b: impl Operand) -> Result<bool> {
    let (a, b) = operands(a, b)?;
    let (a, b) = (
        expect_set("is_superset_of", a)?,
        expect_set("is_superset_of", b)?,
    );
    Ok(b.is_subset_of(&a))
}

fn member_sets(op: &'static str, set: &Set) -> Result<Vec<Set>> {
    set.iter()
        .map(|element| match element {
            MathObject::Set(s) => Ok(s.clone()),
            other => type_mismatch(op, Kind::Set, other),
        })
        .collect()
}

/// Union of all the sets in a set of sets. Empty for an empty
/// argument.
pub fn big_union(sets: impl Operand) -> Result<MathObject> {
    let sets = expect_set("big_union", sets)?;
    let members = member_sets("big_union", &sets)?;
    Ok(Set::join_all_from_bottom(members).into())
}

/// Intersection of all the sets in a set of sets. Empty for an empty
/// argument.
pub fn big_intersect(sets: impl Operand) -> Result<MathObject> {
    let sets = expect_set("big_intersect", sets)?;
    let members = member_sets("big_intersect", &sets)?;
    Ok(Set::meet_all(members).unwrap_or_default().into())
}

/// The only element of a one-element set, else undefined.
pub fn single(set: impl Operand) -> Result<MathObject> {
    let set = expect_set("single", set)?;
    let mut elements = set.iter();
    match (elements.next(), elements.next()) {
        (Some(element), None) => Ok(element.clone()),
        _ => undef("single"),
    }
}

/// An element of a non-empty set, else undefined. The element chosen
/// is the least in the set's order.
pub fn some(set: impl Operand) -> Result<MathObject> {
    let set = expect_set("some", set)?;
    match set.iter().next() {
        Some(element) => Ok(element.clone()),
        None => undef("some"),
    }
}

/// All subsets.
pub fn power_set(set: impl Operand) -> Result<MathObject> {
    let set = expect_set("power_set", set)?;
    let mut subsets = vec![Set::empty()];
    for element in set.iter() {
        let with: Vec<Set> = subsets
            .iter()
            .map(|s| s.union(&Set::new([element.clone()])))
            .collect();
        subsets.extend(with);
    }
    Ok(Set::new(subsets).into())
}

/// Wrap every element in a singleton set.
pub fn power_up(set: impl Operand) -> Result<MathObject> {
    let set = expect_set("power_up", set)?;
    Ok(set
        .iter()
        .map(|element| Set::new([element.clone()]))
        .collect::<Set>()
        .into())
}

/// The elements satisfying `predicate`.
pub fn restrict<F>(set: impl Operand, predicate: F) -> Result<MathObject>
where
    F: Fn(&MathObject) -> bool,
{
    let set = expect_set("restrict", set)?;
    Ok(set
        .iter()
        .filter(|element| predicate(element))
        .cloned()
        .collect::<Set>()
        .into())
}

/// The multiset with the same elements, each with multiplicity one.
pub fn multify(set: impl Operand) -> Result<MathObject> {
    let set = expect_set("multify", set)?;
    let counts: BTreeMap<MathObject, u64> = set.iter().map(|e| (e.clone(), 1)).collect();
    Ok(Multiset::from_map(counts).into())
}

pub fn is_member(obj: &MathObject) -> bool {
    obj.is_set()
}

pub fn is_absolute_member(obj: &MathObject) -> bool {
    obj.as_set()
        .is_some_and(|s| s.iter().all(MathObject::is_atom))
}
