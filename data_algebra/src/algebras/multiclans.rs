/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The algebra of multiclans: multisets of relations.
//!
//! These are the clan operations with multiplicities. A result produced
//! by the pair `(R, Q)` counts `m(R) * n(Q)` times, and a result
//! produced by several pairs counts the sum over all of them. Empty
//! result relations are ordinary elements.

use super::expect_multiclan;
use super::operands;
use super::relations;
use super::sets;
use crate::error::Result;
use crate::extension::binary_multi_extend;
use crate::extension::unary_multi_extend;
use crate::mathobject::MathObject;
use crate::mathobject::Multiset;
use crate::undef::Operand;

fn cross<F>(op: &'static str, m1: impl Operand, m2: impl Operand, f: F) -> Result<MathObject>
where
    F: Fn(&MathObject, &MathObject) -> Result<MathObject>,
{
    let (m1, m2) = operands(m1, m2)?;
    let (m1, m2) = (expect_multiclan(op, m1)?, expect_multiclan(op, m2)?);
    Ok(binary_multi_extend(&m1, &m2, f)?.into())
}

/// Transpose every relation, keeping multiplicities.
pub fn transpose(multiclan: impl Operand) -> Result<MathObject> {
    let multiclan = expect_multiclan("transpose", multiclan)?;
    Ok(unary_multi_extend(&multiclan, |r| relations::transpose(r))?.into())
}

/// `[ R ∘ Q | R ∈ m1, Q ∈ m2 ]`.
pub fn compose(m1: impl Operand, m2: impl Operand) -> Result<MathObject> {
    cross("compose", m1, m2, |r, q| relations::compose(r, q))
}

pub fn cross_union(m1: impl Operand, m2: impl Operand) -> Result<MathObject> {
    cross("cross_union", m1, m2, |r, q| sets::union(r, q))
}

pub fn cross_functional_union(m1: impl Operand, m2: impl Operand) -> Result<MathObject> {
    cross("cross_functional_union", m1, m2, |r, q| {
        relations::functional_union(r, q)
    })
}

pub fn cross_right_functional_union(m1: impl Operand, m2: impl Operand) -> Result<MathObject> {
    cross("cross_right_functional_union", m1, m2, |r, q| {
        relations::right_functional_union(r, q)
    })
}

pub fn cross_intersect(m1: impl Operand, m2: impl Operand) -> Result<MathObject> {
    cross("cross_intersect", m1, m2, |r, q| sets::intersect(r, q))
}

/// The relations of `m1` contained in some relation of `m2`, counted
/// once per containing relation.
pub fn cross_substrict(m1: impl Operand, m2: impl Operand) -> Result<MathObject> {
    cross("cross_substrict", m1, m2, |r, q| sets::substrict(r, q))
}

/// The relations of `m1` containing some relation of `m2`, counted once
/// per contained relation.
pub fn cross_superstrict(m1: impl Operand, m2: impl Operand) -> Result<MathObject> {
    cross("cross_superstrict", m1, m2, |r, q| sets::superstrict(r, q))
}

/// Union of the left sets of all relations, ignoring multiplicities.
pub fn get_lefts(multiclan: impl Operand) -> Result<MathObject> {
    let multiclan = expect_multiclan("get_lefts", multiclan)?;
    Ok(MathObject::from(multiclan).left_set()?.into())
}

/// Union of the right sets of all relations, ignoring multiplicities.
pub fn get_rights(multiclan: impl Operand) -> Result<MathObject> {
    let multiclan = expect_multiclan("get_rights", multiclan)?;
    Ok(MathObject::from(multiclan).right_set()?.into())
}

/// Keep only the couplets whose left is one of `lefts`. Relations that
/// project to the same result have their multiplicities added.
pub fn project<I, T>(multiclan: impl Operand, lefts: I) -> Result<MathObject>
where
    I: IntoIterator<Item = T>,
    T: Into<MathObject>,
{
    compose(multiclan, diag(lefts))
}

/// The multiclan `[{l->l | l ∈ lefts}:1]`.
pub fn diag<I, T>(lefts: I) -> Multiset
where
    I: IntoIterator<Item = T>,
    T: Into<MathObject>,
{
    Multiset::from_elements([relations::diag(lefts)])
}

/// A multiclan holding one relation once.
pub fn from_dict<I, L, R>(entries: I) -> Multiset
where
    I: IntoIterator<Item = (L, R)>,
    L: Into<MathObject>,
    R: Into<MathObject>,
{
    Multiset::from_elements([relations::from_dict(entries)])
}

pub fn is_left_regular(multiclan: impl Operand) -> Result<bool> {
    Ok(expect_multiclan("is_left_regular", multiclan)?.is_regular())
}

pub fn is_right_regular(multiclan: impl Operand) -> Result<bool> {
    Ok(expect_multiclan("is_right_regular", multiclan)?.is_right_regular())
}

pub fn is_member(obj: &MathObject) -> bool {
    obj.as_multiset().is_some_and(Multiset::is_multiclan)
}

pub fn is_absolute_member(obj: &MathObject) -> bool {
    obj.as_multiset()
        .is_some_and(|m| m.is_multiclan() && m.is_absolute())
}
