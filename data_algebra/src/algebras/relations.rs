/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The algebra of relations: sets of couplets.
//!
//! ```
//! use data_algebra::relations;
//! use data_algebra::MathObject;
//!
//! let ages = relations::from_dict([("alice", 31), ("bob", 27)]);
//! let renames = relations::from_dict([("name_a", "alice")]);
//! let renamed = relations::rename(&ages, &renames).unwrap();
//! assert_eq!(
//!     renamed,
//!     MathObject::from(relations::from_dict([("name_a", 31), ("bob", 27)]))
//! );
//! ```

use super::couplets;
use super::expect_couplet;
use super::expect_relation;
use super::operands;
use crate::error::Result;
use crate::extension::binary_extend;
use crate::extension::unary_extend;
use crate::mathobject::Couplet;
use crate::mathobject::MathObject;
use crate::mathobject::Set;
use crate::undef::Operand;
use crate::undef::undef;

/// Swap the components of every couplet.
pub fn transpose(rel: impl Operand) -> Result<MathObject> {
    let rel = expect_relation("transpose", rel)?;
    Ok(transpose_relation(&rel)?.into())
}

pub(crate) fn transpose_relation(rel: &Set) -> Result<Set> {
    unary_extend(rel, |c| couplets::transpose(c))
}

/// `r1 ∘ r2`: every defined couplet composition `c1 ∘ c2` with `c1`
/// from `r1` and `c2` from `r2`.
pub fn compose(r1: impl Operand, r2: impl Operand) -> Result<MathObject> {
    let (r1, r2) = operands(r1, r2)?;
    let (r1, r2) = (expect_relation("compose", r1)?, expect_relation("compose", r2)?);
    Ok(compose_relations(&r1, &r2)?.into())
}

pub(crate) fn compose_relations(r1: &Set, r2: &Set) -> Result<Set> {
    binary_extend(r1, r2, |c1, c2| couplets::compose(c1, c2))
}

/// `r1 ∪ r2` if that union is left-functional, else undefined.
pub fn functional_union(r1: impl Operand, r2: impl Operand) -> Result<MathObject> {
    let (r1, r2) = operands(r1, r2)?;
    let (r1, r2) = (
        expect_relation("functional_union", r1)?,
        expect_relation("functional_union", r2)?,
    );
    let union = r1.union(&r2);
    if union.is_functional() {
        Ok(union.into())
    } else {
        undef("functional_union")
    }
}

/// `r1 ∪ r2` if that union is right-functional, else undefined.
pub fn right_functional_union(r1: impl Operand, r2: impl Operand) -> Result<MathObject> {
    let (r1, r2) = operands(r1, r2)?;
    let (r1, r2) = (
        expect_relation("right_functional_union", r1)?,
        expect_relation("right_functional_union", r2)?,
    );
    let union = r1.union(&r2);
    if union.is_right_functional() {
        Ok(union.into())
    } else {
        undef("right_functional_union")
    }
}

/// Add one couplet to a relation. Undefined if the couplet's left is
/// already mapped to a different right; adding a couplet that is
/// already present returns the relation unchanged.
pub fn functional_add(rel: impl Operand, couplet: impl Operand) -> Result<MathObject> {
    let (rel, couplet) = operands(rel, couplet)?;
    let rel = expect_relation("functional_add", rel)?;
    let couplet = expect_couplet("functional_add", couplet)?;
    let element = MathObject::from(couplet.clone());
    if rel.contains(&element) {
        return Ok(rel.into());
    }
    if rel.couplets().any(|c| c.left() == couplet.left()) {
        return undef("functional_add");
    }
    Ok(rel.union(&Set::new([element])).into())
}

/// The set of lefts.
pub fn get_lefts(rel: impl Operand) -> Result<MathObject> {
    Ok(expect_relation("get_lefts", rel)?.lefts().into())
}

/// The set of rights.
pub fn get_rights(rel: impl Operand) -> Result<MathObject> {
    Ok(expect_relation("get_rights", rel)?.rights().into())
}

/// The right paired with `left`, if there is exactly one.
pub fn get_right(rel: impl Operand, left: impl Operand) -> Result<MathObject> {
    let (rel, left) = operands(rel, left)?;
    let rel = expect_relation("get_right", rel)?;
    let mut rights = rel.couplets().filter(|c| c.left() == &left);
    match (rights.next(), rights.next()) {
        (Some(c), None) => Ok(c.right().clone()),
        _ => undef("get_right"),
    }
}

/// The left paired with `right`, if there is exactly one.
pub fn get_left(rel: impl Operand, right: impl Operand) -> Result<MathObject> {
    let (rel, right) = operands(rel, right)?;
    let rel = expect_relation("get_left", rel)?;
    let mut lefts = rel.couplets().filter(|c| c.right() == &right);
    match (lefts.next(), lefts.next()) {
        (Some(c), None) => Ok(c.left().clone()),
        _ => undef("get_left"),
    }
}

pub fn is_left_functional(rel: impl Operand) -> Result<bool> {
    Ok(expect_relation("is_left_functional", rel)?.is_functional())
}

pub fn is_right_functional(rel: impl Operand) -> Result<bool> {
    Ok(expect_relation("is_right_functional", rel)?.is_right_functional())
}

/// Every couplet is of the form `x->x`.
pub fn is_reflexive(rel: impl Operand) -> Result<bool> {
    Ok(expect_relation("is_reflexive", rel)?.is_reflexive())
}

pub fn is_symmetric(rel: impl Operand) -> Result<bool> {
    Ok(expect_relation("is_symmetric", rel)?.is_symmetric())
}

pub fn is_transitive(rel: impl Operand) -> Result<bool> {
    Ok(expect_relation("is_transitive", rel)?.is_transitive())
}

/// `renames`, completed with the diagonal of every left of `rel` that
/// `renames` does not already map from.
pub fn fill_lefts(rel: impl Operand, renames: impl Operand) -> Result<MathObject> {
    let (rel, renames) = operands(rel, renames)?;
    let rel = expect_relation("fill_lefts", rel)?;
    let renames = expect_relation("fill_lefts", renames)?;
    Ok(fill(&rel, &renames).into())
}

fn fill(rel: &Set, renames: &Set) -> Set {
    let missing = rel.lefts().minus(&renames.rights());
    renames.union(&diag(missing.iter().cloned()))
}

/// Rename lefts of `rel`: a couplet `new->old` in `renames` replaces
/// the left `old` with `new`. Lefts not mentioned are kept.
pub fn rename(rel: impl Operand, renames: impl Operand) -> Result<MathObject> {
    let (rel, renames) = operands(rel, renames)?;
    let rel = expect_relation("rename", rel)?;
    let renames = expect_relation("rename", renames)?;
    Ok(compose_relations(&rel, &fill(&rel, &renames))?.into())
}

/// Exchange lefts of `rel`: each couplet `a->b` in `swaps` swaps the
/// lefts `a` and `b`.
pub fn swap(rel: impl Operand, swaps: impl Operand) -> Result<MathObject> {
    let (rel, swaps) = operands(rel, swaps)?;
    let rel = expect_relation("swap", rel)?;
    let swaps = expect_relation("swap", swaps)?;
    let renames = swaps.union(&transpose_relation(&swaps)?);
    Ok(compose_relations(&rel, &fill(&rel, &renames))?.into())
}

/// A relation with one couplet per entry.
pub fn from_dict<I, L, R>(entries: I) -> Set
where
    I: IntoIterator<Item = (L, R)>,
    L: Into<MathObject>,
    R: Into<MathObject>,
{
    entries
        .into_iter()
        .map(|(left, right)| Couplet::new(left, right))
        .collect()
}

/// `{x->x | x ∈ elements}`.
pub fn diag<I, T>(elements: I) -> Set
where
    I: IntoIterator<Item = T>,
    T: Into<MathObject>,
{
    elements
        .into_iter()
        .map(|element| {
            let element: MathObject = element.into();
            Couplet::new(element.clone(), element)
        })
        .collect()
}

/// `rel` if it has a couplet with `left`, else undefined.
pub fn defined_at(rel: impl Operand, left: impl Operand) -> Result<MathObject> {
    let (rel, left) = operands(rel, left)?;
    let rel = expect_relation("defined_at", rel)?;
    if rel.couplets().any(|c| c.left() == &left) {
        Ok(rel.into())
    } else {
        undef("defined_at")
    }
}

pub fn is_member(obj: &MathObject) -> bool {
    obj.is_relation()
}

pub fn is_absolute_member(obj: &MathObject) -> bool {
    obj.is_relation() && obj.is_absolute()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::AlgebraError;
    use crate::mathobject::Kind;
    use crate::set;
    use crate::strategy::gen_relation;
    use crate::undef::Definedness;
    use crate::undef::Undef;

    fn rel(pairs: &[(&str, &str)]) -> Set {
        from_dict(pairs.iter().copied())
    }

    fn mo(s: Set) -> MathObject {
        MathObject::from(s)
    }

    #[test]
    fn test_transpose() {
        let r = rel(&[("a", "1"), ("b", "2")]);
        assert_eq!(transpose(&r).unwrap(), mo(rel(&[("1", "a"), ("2", "b")])));
    }

    #[test]
    fn test_compose() {
        let r1 = rel(&[("x", "y"), ("w", "y")]);
        let r2 = rel(&[("a", "x"), ("b", "w")]);
        assert_eq!(compose(&r1, &r2).unwrap(), mo(rel(&[("a", "y"), ("b", "y")])));
        assert_eq!(compose(&r2, &r1).unwrap(), mo(Set::empty()));
    }

    #[test]
    fn test_functional_union() {
        let r1 = rel(&[("a", "1")]);
        let r2 = rel(&[("b", "2")]);
        let clash = rel(&[("a", "2")]);
        assert_eq!(
            functional_union(&r1, &r2).unwrap(),
            mo(rel(&[("a", "1"), ("b", "2")]))
        );
        assert!(functional_union(&r1, &clash).is_undef());
        // Identical couplets do not conflict.
        assert_eq!(functional_union(&r1, &r1).unwrap(), mo(r1.clone()));

        assert!(right_functional_union(&r1, rel(&[("b", "1")])).is_undef());
        assert!(right_functional_union(&r1, &r2).is_ok());
    }

    #[test]
    fn test_functional_add() {
        let r = rel(&[("a", "1")]);
        assert_eq!(
            functional_add(&r, Couplet::new("b", "2")).unwrap(),
            mo(rel(&[("a", "1"), ("b", "2")]))
        );
        assert!(functional_add(&r, Couplet::new("a", "2")).is_undef());
        assert_eq!(functional_add(&r, Couplet::new("a", "1")).unwrap(), mo(r.clone()));
        assert!(matches!(
            functional_add(&r, set![1]),
            Err(AlgebraError::TypeMismatch {
                expected: Kind::Couplet,
                ..
            })
        ));
    }

    #[test]
    fn test_accessors() {
        let r = rel(&[("a", "1"), ("b", "1"), ("c", "2")]);
        assert_eq!(get_lefts(&r).unwrap(), mo(set!["a", "b", "c"]));
        assert_eq!(get_rights(&r).unwrap(), mo(set!["1", "2"]));
        assert_eq!(get_right(&r, MathObject::from("c")).unwrap(), MathObject::from("2"));
        assert!(get_right(&r, MathObject::from("z")).is_undef());
        assert_eq!(get_left(&r, MathObject::from("2")).unwrap(), MathObject::from("c"));
        assert!(get_left(&r, MathObject::from("1")).is_undef());
    }

    #[test]
    fn test_properties() {
        let eq = rel(&[("a", "a"), ("b", "b")]);
        assert_eq!(is_reflexive(&eq), Ok(true));
        assert_eq!(is_symmetric(&eq), Ok(true));
        assert_eq!(is_transitive(&eq), Ok(true));
        assert_eq!(is_left_functional(&eq), Ok(true));
        assert_eq!(is_right_functional(rel(&[("a", "1"), ("b", "1")])), Ok(false));
        assert!(is_reflexive(set![1]).is_err());
        assert!(is_reflexive(Undef).is_undef());
    }

    #[test]
    fn test_fill_lefts_rename_swap() {
        let r = rel(&[("a", "1"), ("b", "2")]);
        let renames = rel(&[("x", "a")]);
        assert_eq!(
            fill_lefts(&r, &renames).unwrap(),
            mo(rel(&[("x", "a"), ("b", "b")]))
        );
        assert_eq!(
            rename(&r, &renames).unwrap(),
            mo(rel(&[("x", "1"), ("b", "2")]))
        );
        assert_eq!(
            swap(&r, rel(&[("a", "b")])).unwrap(),
            mo(rel(&[("a", "2"), ("b", "1")]))
        );
    }

    #[test]
    fn test_diag_and_defined_at() {
        assert_eq!(diag(["a", "b"]), rel(&[("a", "a"), ("b", "b")]));
        let r = rel(&[("a", "1")]);
        assert_eq!(defined_at(&r, MathObject::from("a")).unwrap(), mo(r.clone()));
        assert!(defined_at(&r, MathObject::from("b")).is_undef());
    }

    #[test]
    fn test_membership() {
        assert!(is_member(&mo(Set::empty())));
        assert!(is_absolute_member(&mo(rel(&[("a", "b")]))));
        assert!(!is_member(&mo(set![1])));
    }

    proptest! {
        #[test]
        fn transpose_is_an_involution(r in gen_relation(6)) {
            prop_assert_eq!(transpose(transpose(&r)).unwrap(), mo(r.clone()));
        }

        #[test]
        fn compose_is_associative(
            r1 in gen_relation(5),
            r2 in gen_relation(5),
            r3 in gen_relation(5),
        ) {
            prop_assert_eq!(
                compose(compose(&r1, &r2), &r3).unwrap(),
                compose(&r1, compose(&r2, &r3)).unwrap()
            );
        }

        #[test]
        fn transpose_reverses_composition(r1 in gen_relation(5), r2 in gen_relation(5)) {
            prop_assert_eq!(
                transpose(compose(&r1, &r2)).unwrap(),
                compose(transpose(&r2), transpose(&r1)).unwrap()
            );
        }

        #[test]
        fn functional_union_is_undef_iff_not_functional(
            r1 in gen_relation(4),
            r2 in gen_relation(4),
        ) {
            let plain = r1.union(&r2);
            let result = functional_union(&r1, &r2);
            prop_assert_eq!(result.is_undef(), !plain.is_functional());
        }
    }
}
