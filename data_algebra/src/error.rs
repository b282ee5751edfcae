/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Errors produced by constructors and algebra operations.

use crate::mathobject::Kind;
use crate::undef::Undef;

/// The error type for this crate.
///
/// [`AlgebraError::Undef`] is not a failure in the usual sense: it
/// is the value an operation takes outside the domain where it is
/// defined, and it propagates through every operation that receives
/// it. The remaining variants are genuine errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlgebraError {
    #[error(transparent)]
    Undef(#[from] Undef),

    #[error("invalid multiplicity {multiplicity} for element {element}")]
    InvalidMultiplicity { element: String, multiplicity: i64 },

    #[error("multiplicity of {element} exceeds {}", crate::MAX_MULTIPLICITY)]
    MultiplicityOverflow { element: String },

    #[error("malformed couplet: {reason}")]
    MalformedCouplet { reason: String },

    #[error("{op}: expected {expected}, found {found}")]
    TypeMismatch {
        op: &'static str,
        expected: Kind,
        found: Kind,
    },

    #[error("function is not defined at {left}")]
    NotDefined { left: String },

    #[error("{op}: result is undefined")]
    Raised { op: &'static str },
}

impl AlgebraError {
    /// True if this is the undefined value rather than a real error.
    pub fn is_undef(&self) -> bool {
        matches!(self, AlgebraError::Undef(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = AlgebraError> = std::result::Result<T, E>;
