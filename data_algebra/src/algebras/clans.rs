/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The algebra of clans: sets of relations.
//!
//! A clan is a table whose rows are relations from column name to
//! value. The cross-operations apply a relation operation to every
//! pair of rows from two clans and keep the defined results; equal
//! results collapse into one row.
//!
//! ```
//! use data_algebra::clans;
//! use data_algebra::set;
//! use data_algebra::relations;
//! use data_algebra::MathObject;
//!
//! let people = set![
//!     relations::from_dict([("id", 1), ("dept", 10)]),
//!     relations::from_dict([("id", 2), ("dept", 20)]),
//! ];
//! let depts = set![relations::from_dict([("dept", 10), ("floor", 3)])];
//!
//! // An inner join on the shared `dept` column.
//! let joined = clans::cross_functional_union(&people, &depts).unwrap();
//! assert_eq!(
//!     joined,
//!     MathObject::from(clans::from_dict([("id", 1), ("dept", 10), ("floor", 3)]))
//! );
//!
//! let ids = clans::project(&people, ["id"]).unwrap();
//! assert_eq!(ids.left_set().unwrap(), set!["id"]);
//! ```

use super::expect_clan;
use super::operands;
use super::relations;
use super::sets;
use crate::error::Result;
use crate::extension::binary_extend;
use crate::extension::unary_extend;
use crate::mathobject::Couplet;
use crate::mathobject::MathObject;
use crate::mathobject::Set;
use crate::undef::Operand;

fn cross<F>(op: &'static str, c1: impl Operand, c2: impl Operand, f: F) -> Result<MathObject>
where
    F: Fn(&MathObject, &MathObject) -> Result<MathObject>,
{
    let (c1, c2) = operands(c1, c2)?;
    let (c1, c2) = (expect_clan(op, c1)?, expect_clan(op, c2)?);
    Ok(binary_extend(&c1, &c2, f)?.into())
}

/// Transpose every relation.
pub fn transpose(clan: impl Operand) -> Result<MathObject> {
    let clan = expect_clan("transpose", clan)?;
    Ok(unary_extend(&clan, |r| relations::transpose(r))?.into())
}

/// `{ R ∘ Q | R ∈ c1, Q ∈ c2 }`.
pub fn compose(c1: impl Operand, c2: impl Operand) -> Result<MathObject> {
    cross("compose", c1, c2, |r, q| relations::compose(r, q))
}

/// `{ R ∪ Q | R ∈ c1, Q ∈ c2 }`.
pub fn cross_union(c1: impl Operand, c2: impl Operand) -> Result<MathObject> {
    cross("cross_union", c1, c2, |r, q| sets::union(r, q))
}

/// `{ R ∪ Q | R ∈ c1, Q ∈ c2, R ∪ Q left-functional }`: rows combine
/// only where their shared columns agree.
pub fn cross_functional_union(c1: impl Operand, c2: impl Operand) -> Result<MathObject> {
    cross("cross_functional_union", c1, c2, |r, q| {
        relations::functional_union(r, q)
    })
}

/// `{ R ∪ Q | R ∈ c1, Q ∈ c2, R ∪ Q right-functional }`.
pub fn cross_right_functional_union(c1: impl Operand, c2: impl Operand) -> Result<MathObject> {
    cross("cross_right_functional_union", c1, c2, |r, q| {
        relations::right_functional_union(r, q)
    })
}

/// The functional cross-union of `lhs` and `rhs`, plus every relation
/// of `lhs` that combines with nothing in `rhs`.
pub fn lhs_cross_functional_union(lhs: impl Operand, rhs: impl Operand) -> Result<MathObject> {
    let (lhs, rhs) = operands(lhs, rhs)?;
    let lhs = expect_clan("lhs_cross_functional_union", lhs)?;
    let rhs = expect_clan("lhs_cross_functional_union", rhs)?;
    let joined = binary_extend(&lhs, &rhs, |r, q| relations::functional_union(r, q))?;
    let mut unmatched = Vec::new();
    for r in lhs.iter() {
        let matches = binary_extend(&Set::new([r.clone()]), &rhs, |r, q| {
            relations::functional_union(r, q)
        })?;
        if matches.is_empty() {
            unmatched.push(r.clone());
        }
    }
    Ok(joined.union(&Set::new(unmatched)).into())
}

/// `{ R ∩ Q | R ∈ c1, Q ∈ c2 }`.
pub fn cross_intersect(c1: impl Operand, c2: impl Operand) -> Result<MathObject> {
    cross("cross_intersect", c1, c2, |r, q| sets::intersect(r, q))
}

/// `{ R | R ∈ c1, Q ∈ c2, R ⊆ Q }`.
pub fn cross_substrict(c1: impl Operand, c2: impl Operand) -> Result<MathObject> {
    cross("cross_substrict", c1, c2, |r, q| sets::substrict(r, q))
}

/// `{ R | R ∈ c1, Q ∈ c2, R ⊇ Q }`: the rows of `c1` matching some
/// pattern row of `c2`.
pub fn cross_superstrict(c1: impl Operand, c2: impl Operand) -> Result<MathObject> {
    cross("cross_superstrict", c1, c2, |r, q| sets::superstrict(r, q))
}

/// Keep only the couplets whose left is one of `lefts`.
pub fn project<I, T>(clan: impl Operand, lefts: I) -> Result<MathObject>
where
    I: IntoIterator<Item = T>,
    T: Into<MathObject>,
{
    compose(clan, diag(lefts))
}

/// The clan `{{l->l | l ∈ lefts}}`.
pub fn diag<I, T>(lefts: I) -> Set
where
    I: IntoIterator<Item = T>,
    T: Into<MathObject>,
{
    Set::new([relations::diag(lefts)])
}

/// A clan with a single relation, one couplet per entry.
pub fn from_dict<I, L, R>(entries: I) -> Set
where
    I: IntoIterator<Item = (L, R)>,
    L: Into<MathObject>,
    R: Into<MathObject>,
{
    Set::new([relations::from_dict(entries)])
}

/// A clan of single-couplet relations `{left->v}`, one per value.
pub fn from_set<L, I, T>(left: L, values: I) -> Set
where
    L: Into<MathObject>,
    I: IntoIterator<Item = T>,
    T: Into<MathObject>,
{
    let left = left.into();
    values
        .into_iter()
        .map(|value| Set::new([Couplet::new(left.clone(), value)]))
        .collect()
}

/// Rename lefts in every relation; see [`relations::rename`].
pub fn rename(clan: impl Operand, renames: impl Operand) -> Result<MathObject> {
    let (clan, renames) = operands(clan, renames)?;
    let clan = expect_clan("rename", clan)?;
    let renames = super::expect_relation("rename", renames)?;
    Ok(unary_extend(&clan, |r| relations::rename(r, &renames))?.into())
}

/// Union of the left sets of all relations.
pub fn get_lefts(clan: impl Operand) -> Result<MathObject> {
    let clan = expect_clan("get_lefts", clan)?;
    Ok(MathObject::from(clan).left_set()?.into())
}

/// Union of the right sets of all relations.
pub fn get_rights(clan: impl Operand) -> Result<MathObject> {
    let clan = expect_clan("get_rights", clan)?;
    Ok(MathObject::from(clan).right_set()?.into())
}

pub fn is_left_functional(clan: impl Operand) -> Result<bool> {
    Ok(expect_clan("is_left_functional", clan)?.is_functional())
}

/// All relations are functional with the same left set.
pub fn is_left_regular(clan: impl Operand) -> Result<bool> {
    Ok(expect_clan("is_left_regular", clan)?.is_regular())
}

pub fn is_right_functional(clan: impl Operand) -> Result<bool> {
    Ok(expect_clan("is_right_functional", clan)?.is_right_functional())
}

/// All relations are right-functional with the same right set.
pub fn is_right_regular(clan: impl Operand) -> Result<bool> {
    Ok(expect_clan("is_right_regular", clan)?.is_right_regular())
}

/// The relations that have a couplet with `left`.
pub fn defined_at(clan: impl Operand, left: impl Operand) -> Result<MathObject> {
    let (clan, left) = operands(clan, left)?;
    let clan = expect_clan("defined_at", clan)?;
    Ok(unary_extend(&clan, |r| relations::defined_at(r, &left))?.into())
}

pub fn is_member(obj: &MathObject) -> bool {
    obj.is_clan()
}

pub fn is_absolute_member(obj: &MathObject) -> bool {
    obj.is_clan() && obj.is_absolute()
}
