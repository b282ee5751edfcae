/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The algebras: operations over each level of the value hierarchy.
//!
//! Every public operation takes its arguments as [`Operand`]s and
//! returns a [`Result`]. An undefined operand makes the result
//! undefined; an operand of the wrong kind is a
//! [`AlgebraError::TypeMismatch`](crate::AlgebraError::TypeMismatch).

pub mod clans;
pub mod couplets;
pub mod multiclans;
pub mod multisets;
pub mod relations;
pub mod sets;

use crate::error::Result;
use crate::mathobject::Couplet;
use crate::mathobject::Kind;
use crate::mathobject::MathObject;
use crate::mathobject::Multiset;
use crate::mathobject::Set;
use crate::mathobject::type_mismatch;
use crate::undef::Operand;

pub(crate) fn expect_couplet(op: &'static str, operand: impl Operand) -> Result<Couplet> {
    match operand.into_operand()? {
        MathObject::Couplet(c) => Ok(c),
        other => type_mismatch(op, Kind::Couplet, &other),
    }
}

pub(crate) fn expect_set(op: &'static str, operand: impl Operand) -> Result<Set> {
    match operand.into_operand()? {
        MathObject::Set(s) => Ok(s),
        other => type_mismatch(op, Kind::Set, &other),
    }
}

pub(crate) fn expect_relation(op: &'static str, operand: impl Operand) -> Result<Set> {
    match operand.into_operand()? {
        MathObject::Set(s) if s.is_relation() => Ok(s),
        other => type_mismatch(op, Kind::Relation, &other),
    }
}

pub(crate) fn expect_clan(op: &'static str, operand: impl Operand) -> Result<Set> {
    match operand.into_operand()? {
        MathObject::Set(s) if s.is_clan() => Ok(s),
        other => type_mismatch(op, Kind::Clan, &other),
    }
}

pub(crate) fn expect_multiset(op: &'static str, operand: impl Operand) -> Result<Multiset> {
    match operand.into_operand()? {
        MathObject::Multiset(m) => Ok(m),
        other => type_mismatch(op, Kind::Multiset, &other),
    }
}

pub(crate) fn expect_multiclan(op: &'static str, operand: impl Operand) -> Result<Multiset> {
    match operand.into_operand()? {
        MathObject::Multiset(m) if m.is_multiclan() => Ok(m),
        other => type_mismatch(op, Kind::Multiclan, &other),
    }
}

/// Resolve both operands of a binary operation. `Undef` on either side
/// wins over any other failure.
pub(crate) fn operands(lhs: impl Operand, rhs: impl Operand) -> Result<(MathObject, MathObject)> {
    match (lhs.into_operand(), rhs.into_operand()) {
        (Ok(lhs), Ok(rhs)) => Ok((lhs, rhs)),
        (Err(e), _) if e.is_undef() => Err(e),
        (_, Err(e)) if e.is_undef() => Err(e),
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlgebraError;
    use crate::undef::Definedness;
    use crate::undef::Undef;

    #[test]
    fn test_undef_operand_wins() {
        let mismatch: Result<MathObject> = Err(AlgebraError::TypeMismatch {
            op: "x",
            expected: Kind::Set,
            found: Kind::Atom,
        });
        assert!(operands(&mismatch, Undef).is_undef());
        assert!(operands(Undef, &mismatch).is_undef());
        assert!(matches!(
            operands(&mismatch, MathObject::from(1)),
            Err(AlgebraError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_expect_reports_kind() {
        assert!(matches!(
            expect_relation("compose", MathObject::from(1)),
            Err(AlgebraError::TypeMismatch {
                op: "compose",
                expected: Kind::Relation,
                found: Kind::Atom,
            })
        ));
        assert!(expect_clan("cross_union", Set::empty()).is_ok());
        assert!(expect_multiclan("compose", Multiset::empty()).is_ok());
        assert!(expect_multiclan("compose", Multiset::from_elements([1])).is_err());
    }
}
