/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The algebra of couplets.

use super::expect_couplet;
use super::operands;
use crate::error::Result;
use crate::mathobject::Couplet;
use crate::mathobject::MathObject;
use crate::undef::Operand;
use crate::undef::undef;

impl Couplet {
    /// `self ∘ other`: `(c->d) ∘ (a->b) = (a->d)` when `b == c`.
    pub fn compose(&self, other: &Couplet) -> Option<Couplet> {
        (self.left() == other.right())
            .then(|| Couplet::new(other.left().clone(), self.right().clone()))
    }
}

/// `left->right` becomes `right->left`.
pub fn transpose(couplet: impl Operand) -> Result<MathObject> {
    let couplet = expect_couplet("transpose", couplet)?;
    Ok(couplet.transpose().into())
}

/// `(c->d) ∘ (a->b) = (a->d)` if `b == c`, else undefined.
pub fn compose(c1: impl Operand, c2: impl Operand) -> Result<MathObject> {
    let (c1, c2) = operands(c1, c2)?;
    let (c1, c2) = (expect_couplet("compose", c1)?, expect_couplet("compose", c2)?);
    match c1.compose(&c2) {
        Some(c) => Ok(c.into()),
        None => undef("compose"),
    }
}

pub fn is_member(obj: &MathObject) -> bool {
    obj.is_couplet()
}

pub fn is_absolute_member(obj: &MathObject) -> bool {
    obj.as_couplet().is_some_and(Couplet::is_absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::undef::Definedness;
    use crate::undef::Undef;

    #[test]
    fn test_compose() {
        let cd = Couplet::new("b", "d");
        let ab = Couplet::new("a", "b");
        assert_eq!(
            compose(&cd, &ab).unwrap(),
            MathObject::from(Couplet::new("a", "d"))
        );
        assert!(compose(&ab, &cd).is_undef());
    }

    #[test]
    fn test_transpose() {
        assert_eq!(
            transpose(Couplet::new(1, 2)).unwrap(),
            MathObject::from(Couplet::new(2, 1))
        );
        assert!(transpose(Undef).is_undef());
        assert!(transpose(MathObject::from(1)).is_err());
    }

    #[test]
    fn test_membership() {
        assert!(is_member(&Couplet::new(1, 2).into()));
        assert!(is_absolute_member(&Couplet::new(1, 2).into()));
        assert!(!is_absolute_member(
            &Couplet::new(Couplet::new(1, 2), 3).into()
        ));
    }
}
