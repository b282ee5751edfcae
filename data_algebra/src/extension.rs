/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Extension of element operations to containers.
//!
//! An operation on elements extends to sets of those elements by
//! applying it to every element (unary) or to every pair from the
//! cross product (binary), and collecting the *defined* results. The
//! set-valued extensions collapse equal results; the multiset-valued
//! extensions add up their multiplicities, where a result produced
//! from a pair `(x, y)` carries multiplicity `m(x) * m(y)`. A product
//! or sum past [`MAX_MULTIPLICITY`](crate::MAX_MULTIPLICITY) fails with
//! [`AlgebraError::MultiplicityOverflow`](crate::AlgebraError).
//!
//! Undefined element results are left out. Any other error aborts the
//! extension and is returned to the caller.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use itertools::iproduct;

use crate::error::Result;
use crate::mathobject::MathObject;
use crate::mathobject::Multiset;
use crate::mathobject::Set;
use crate::mathobject::overflow;
use crate::mathobject::tally;
use crate::undef::Definedness;

/// `{ op(x) | x ∈ set, op(x) defined }`.
#[tracing::instrument(level = "trace", skip_all, fields(len = set.len()))]
pub fn unary_extend<F>(set: &Set, op: F) -> Result<Set>
where
    F: Fn(&MathObject) -> Result<MathObject>,
{
    let mut out = BTreeSet::new();
    for element in set.iter() {
        if let Some(value) = op(element).defined()? {
            out.insert(value);
        }
    }
    Ok(Set::from_elements(out))
}

/// `{ op(x, y) | x ∈ lhs, y ∈ rhs, op(x, y) defined }`.
#[tracing::instrument(level = "trace", skip_all, fields(lhs = lhs.len(), rhs = rhs.len()))]
pub fn binary_extend<F>(lhs: &Set, rhs: &Set, op: F) -> Result<Set>
where
    F: Fn(&MathObject, &MathObject) -> Result<MathObject>,
{
    let mut out = BTreeSet::new();
    for (x, y) in iproduct!(lhs.iter(), rhs.iter()) {
        if let Some(value) = op(x, y).defined()? {
            out.insert(value);
        }
    }
    Ok(Set::from_elements(out))
}

/// Multiset extension of a unary operation; each result keeps the
/// multiplicity of the element it came from.
#[tracing::instrument(level = "trace", skip_all, fields(len = multiset.len()))]
pub fn unary_multi_extend<F>(multiset: &Multiset, op: F) -> Result<Multiset>
where
    F: Fn(&MathObject) -> Result<MathObject>,
{
    let mut out = BTreeMap::new();
    for (element, n) in multiset.counts() {
        if let Some(value) = op(element).defined()? {
            tally(&mut out, value, n)?;
        }
    }
    Ok(Multiset::from_map(out))
}

/// Multiset extension of a binary operation; the result of `(x, y)`
/// contributes `m(x) * m(y)` to its multiplicity.
#[tracing::instrument(level = "trace", skip_all, fields(lhs = lhs.len(), rhs = rhs.len()))]
pub fn binary_multi_extend<F>(lhs: &Multiset, rhs: &Multiset, op: F) -> Result<Multiset>
where
    F: Fn(&MathObject, &MathObject) -> Result<MathObject>,
{
    let mut out = BTreeMap::new();
    for ((x, m), (y, n)) in iproduct!(lhs.counts(), rhs.counts()) {
        if let Some(value) = op(x, y).defined()? {
            let product = m.checked_mul(n).ok_or_else(|| overflow(&value))?;
            tally(&mut out, value, product)?;
        }
    }
    Ok(Multiset::from_map(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlgebraError;
    use crate::mathobject::Kind;
    use crate::set;
    use crate::undef::undef;

    fn double(x: &MathObject) -> Result<MathObject> {
        match x.as_atom().map(|a| a.value().clone()) {
            Some(crate::mathobject::Value::Int(i)) => Ok(MathObject::from(2 * i)),
            _ => undef("double"),
        }
    }

    #[test]
    fn test_unary_extend_skips_undefined() {
        let s = set![1, 2, "x"];
        assert_eq!(unary_extend(&s, double).unwrap(), set![2i64, 4i64]);
    }

    #[test]
    fn test_binary_extend_collapses_duplicates() {
        let first = |x: &MathObject, _: &MathObject| Ok(x.clone());
        assert_eq!(
            binary_extend(&set![1, 2], &set!["a", "b", "c"], first).unwrap(),
            set![1, 2]
        );
    }

    #[test]
    fn test_binary_extend_propagates_errors() {
        let fail = |_: &MathObject, _: &MathObject| -> Result<MathObject> {
            Err(AlgebraError::TypeMismatch {
                op: "fail",
                expected: Kind::Set,
                found: Kind::Atom,
            })
        };
        assert!(matches!(
            binary_extend(&set![1], &set![2], fail),
            Err(AlgebraError::TypeMismatch { op: "fail", .. })
        ));
        // Nothing to apply the operation to.
        assert_eq!(binary_extend(&Set::empty(), &set![2], fail), Ok(Set::empty()));
    }

    #[test]
    fn test_binary_multi_extend_multiplies() {
        let lhs = Multiset::from_counts([("a", 2), ("b", 3)]).unwrap();
        let rhs = Multiset::from_counts([("x", 5)]).unwrap();
        let first = |x: &MathObject, _: &MathObject| Ok(x.clone());
        let out = binary_multi_extend(&lhs, &rhs, first).unwrap();
        assert_eq!(out, Multiset::from_counts([("a", 10), ("b", 15)]).unwrap());

        let constant = |_: &MathObject, _: &MathObject| Ok(MathObject::from("k"));
        let out = binary_multi_extend(&lhs, &rhs, constant).unwrap();
        assert_eq!(out, Multiset::from_counts([("k", 25)]).unwrap());
    }

    #[test]
    fn test_binary_multi_extend_overflows() {
        let lhs = Multiset::from_counts([("a", i64::MAX)]).unwrap();
        let rhs = Multiset::from_counts([("x", 2)]).unwrap();
        let first = |x: &MathObject, _: &MathObject| Ok(x.clone());
        assert_eq!(
            binary_multi_extend(&lhs, &rhs, first),
            Err(AlgebraError::MultiplicityOverflow {
                element: "'a'".to_string(),
            })
        );

        // Each product fits; their sum does not.
        let rhs = Multiset::from_counts([("x", 1), ("y", 1)]).unwrap();
        assert!(binary_multi_extend(&lhs, &rhs, first).is_err());
    }

    #[test]
    fn test_unary_multi_extend_keeps_multiplicity() {
        let ms = Multiset::from_counts([(1, 2), (2, 1)]).unwrap();
        let out = unary_multi_extend(&ms, double).unwrap();
        assert_eq!(out, Multiset::from_counts([(2i64, 2), (4i64, 1)]).unwrap());
    }
}
