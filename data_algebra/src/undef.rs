/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The undefined value and the definedness discipline.
//!
//! Every operation in this crate is total over a widened domain: when
//! its arguments fall outside the domain where the mathematical
//! operation is defined (composing couplets whose components do not
//! line up, a functional union that is not functional, ...) the
//! result is [`Undef`]. `Undef` travels as
//! `Err(AlgebraError::Undef(Undef))`, so both the `?` operator and the
//! [`Operand`] conversion propagate it: an operation that receives an
//! undefined operand is itself undefined.
//!
//! The extension machinery needs the opposite behaviour: undefined
//! results of an element-wise operation are simply left out of the
//! result. [`Definedness::defined`] turns `Undef` into `Ok(None)`
//! while letting real errors through.
//!
//! ```
//! use data_algebra::couplets;
//! use data_algebra::Couplet;
//! use data_algebra::Definedness;
//!
//! let ab = Couplet::new("a", "b");
//! let cd = Couplet::new("c", "d");
//! let composed = couplets::compose(&cd, &ab);
//! assert!(composed.is_undef());
//! assert_eq!(composed.defined(), Ok(None));
//! ```

use serde::Deserialize;
use serde::Serialize;

use crate::error::AlgebraError;
use crate::error::Result;
use crate::mathobject::Atom;
use crate::mathobject::Couplet;
use crate::mathobject::MathObject;
use crate::mathobject::Multiset;
use crate::mathobject::Set;

/// The undefined value.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    thiserror::Error
)]
#[error("undef")]
pub struct Undef;

/// Produce the undefined result of `op`.
///
/// All definedness failures in the crate funnel through here.
pub(crate) fn undef<T>(op: &'static str) -> Result<T> {
    tracing::trace!(op, "result is undefined");
    Err(Undef.into())
}

/// Anything an algebra operation accepts as an argument.
///
/// Values convert directly. Results convert to their value, or pass
/// their error (including `Undef`) on to the caller unchanged. This
/// lets the output of one operation be fed straight into another:
///
/// ```
/// use data_algebra::relations;
/// use data_algebra::set;
/// use data_algebra::Couplet;
/// use data_algebra::MathObject;
///
/// let r = set![Couplet::new("a", 1), Couplet::new("b", 2)];
/// let twice = relations::transpose(relations::transpose(&r));
/// assert_eq!(twice.unwrap(), MathObject::from(r));
/// ```
pub trait Operand {
    /// Convert into the operation's argument.
    fn into_operand(self) -> Result<MathObject>;
}

impl Operand for MathObject {
    fn into_operand(self) -> Result<MathObject> {
        Ok(self)
    }
}

impl Operand for &MathObject {
    fn into_operand(self) -> Result<MathObject> {
        Ok(self.clone())
    }
}

impl Operand for Result<MathObject> {
    fn into_operand(self) -> Result<MathObject> {
        self
    }
}

impl Operand for &Result<MathObject> {
    fn into_operand(self) -> Result<MathObject> {
        self.clone()
    }
}

impl Operand for Undef {
    fn into_operand(self) -> Result<MathObject> {
        Err(self.into())
    }
}

macro_rules! impl_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Operand for $ty {
                fn into_operand(self) -> Result<MathObject> {
                    Ok(MathObject::from(self))
                }
            }

            impl Operand for &$ty {
                fn into_operand(self) -> Result<MathObject> {
                    Ok(MathObject::from(self.clone()))
                }
            }
        )*
    };
}

impl_operand!(Atom, Couplet, Set, Multiset);

/// Queries on possibly-undefined results.
pub trait Definedness<T> {
    /// True if the result is `Undef`.
    fn is_undef(&self) -> bool;

    /// `Ok(Some(v))` for a value, `Ok(None)` for `Undef`, `Err` for
    /// any real error.
    fn defined(self) -> Result<Option<T>>;
}

impl<T> Definedness<T> for Result<T> {
    fn is_undef(&self) -> bool {
        matches!(self, Err(AlgebraError::Undef(_)))
    }

    fn defined(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(AlgebraError::Undef(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// `EvalOpts` controls how undefined results are surfaced to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOpts {
    /// Escalate `Undef` results to [`AlgebraError::Raised`].
    pub raise_on_undef: bool,
}

impl EvalOpts {
    // Undef stays an ordinary value.
    pub fn lenient() -> Self {
        Self {
            raise_on_undef: false,
        }
    }

    // Any undefined result is reported as an error naming the
    // operation that produced it.
    pub fn strict() -> Self {
        Self {
            raise_on_undef: true,
        }
    }

    /// Apply this policy to the result of `op`.
    ///
    /// ```
    /// use data_algebra::sets;
    /// use data_algebra::AlgebraError;
    /// use data_algebra::EvalOpts;
    /// use data_algebra::Set;
    ///
    /// let result = sets::single(Set::empty());
    /// let result = EvalOpts::strict().check("single", result);
    /// assert_eq!(result, Err(AlgebraError::Raised { op: "single" }));
    /// ```
    pub fn check<T>(&self, op: &'static str, result: Result<T>) -> Result<T> {
        match result {
            Err(AlgebraError::Undef(_)) if self.raise_on_undef => {
                tracing::debug!(op, "raising on undefined result");
                Err(AlgebraError::Raised { op })
            }
            other => other,
        }
    }
}

impl Default for EvalOpts {
    fn default() -> Self {
        Self::lenient()
    }
}
