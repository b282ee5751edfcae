/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::MathObject;
use super::structural_hash;
use crate::error::AlgebraError;

/// An ordered pair `left->right`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<MathObject>", into = "Vec<MathObject>")]
pub struct Couplet {
    inner: Arc<CoupletInner>,
}

struct CoupletInner {
    left: MathObject,
    right: MathObject,
    hash: u64,
}

impl Couplet {
    /// Pair `left` with `right`. Raw scalars are wrapped as atoms.
    pub fn new(left: impl Into<MathObject>, right: impl Into<MathObject>) -> Self {
        let left = left.into();
        let right = right.into();
        let hash = structural_hash(1, |h| {
            left.hash(h);
            right.hash(h);
        });
        Self {
            inner: Arc::new(CoupletInner { left, right, hash }),
        }
    }

    pub fn left(&self) -> &MathObject {
        &self.inner.left
    }

    pub fn right(&self) -> &MathObject {
        &self.inner.right
    }

    /// `right->left`.
    pub fn transpose(&self) -> Couplet {
        Couplet::new(self.right().clone(), self.left().clone())
    }

    pub fn is_reflexive(&self) -> bool {
        self.left() == self.right()
    }

    /// Both components are atoms.
    pub fn is_absolute(&self) -> bool {
        self.left().is_atom() && self.right().is_atom()
    }
}

impl PartialEq for Couplet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.hash == other.inner.hash
                && self.left() == other.left()
                && self.right() == other.right())
    }
}

impl Eq for Couplet {}

impl PartialOrd for Couplet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Couplet {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return Ordering::Equal;
        }
        self.left()
            .cmp(other.left())
            .then_with(|| self.right().cmp(other.right()))
    }
}

impl Hash for Couplet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.hash);
    }
}

impl TryFrom<Vec<MathObject>> for Couplet {
    type Error = AlgebraError;

    fn try_from(components: Vec<MathObject>) -> Result<Self, Self::Error> {
        let reason = format!("expected 2 components, got {}", components.len());
        match <[MathObject; 2]>::try_from(components) {
            Ok([left, right]) => Ok(Couplet::new(left, right)),
            Err(_) => Err(AlgebraError::MalformedCouplet { reason }),
        }
    }
}

impl From<Couplet> for Vec<MathObject> {
    fn from(couplet: Couplet) -> Self {
        vec![couplet.left().clone(), couplet.right().clone()]
    }
}

impl fmt::Display for Couplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}->{})", self.left(), self.right())
    }
}

impl fmt::Debug for Couplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let c = Couplet::new("a", 1);
        assert_eq!(c.left(), &MathObject::from("a"));
        assert_eq!(c.right(), &MathObject::from(1));
        assert_eq!(c.transpose(), Couplet::new(1, "a"));
        assert_eq!(c.transpose().transpose(), c);
    }

    #[test]
    fn test_order_is_left_then_right() {
        let mut cs = vec![Couplet::new("b", 1), Couplet::new("a", 2), Couplet::new("a", 1)];
        cs.sort();
        assert_eq!(
            cs,
            vec![Couplet::new("a", 1), Couplet::new("a", 2), Couplet::new("b", 1)]
        );
    }

    #[test]
    fn test_try_from_rejects_wrong_arity() {
        let err = Couplet::try_from(vec![MathObject::from(1)]).unwrap_err();
        assert_eq!(
            err,
            AlgebraError::MalformedCouplet {
                reason: "expected 2 components, got 1".to_string()
            }
        );
        assert!(Couplet::try_from(vec![MathObject::from(1), MathObject::from(2)]).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(Couplet::new("a", 1).to_string(), "('a'->1)");
        assert_eq!(
            Couplet::new(Couplet::new(1, 2), "x").to_string(),
            "((1->2)->'x')"
        );
    }
}
