/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! A data algebra: set-theoretic values and the operations over them.
//!
//! Every value is a [`MathObject`]: an [`Atom`] wrapping a scalar, a
//! [`Couplet`] (an ordered pair `left->right`), a [`Set`], or a
//! [`Multiset`]. Sets of couplets are *relations*, sets of relations
//! are *clans*, and multisets of relations are *multiclans*. Tabular
//! data is a clan whose rows are functional relations from column name
//! to value; graph data is a relation.
//!
//! Operations live in one module per level of that hierarchy
//! ([`sets`], [`multisets`], [`couplets`], [`relations`], [`clans`],
//! [`multiclans`]). An operation that is not defined for its operands
//! returns [`Undef`] (as `Err(AlgebraError::Undef(_))`), and an
//! undefined operand makes the result undefined. Container operations
//! built with [`extension`] skip undefined element results, so for
//! example a cross functional union of two clans is an inner join:
//!
//! ```
//! use data_algebra::clans;
//! use data_algebra::relations;
//! use data_algebra::set;
//! use data_algebra::Definedness;
//!
//! let left = set![relations::from_dict([("k", 1), ("a", 2)])];
//! let right = set![relations::from_dict([("k", 3), ("b", 4)])];
//! let joined = clans::cross_functional_union(&left, &right).unwrap();
//! assert!(joined.as_set().unwrap().is_empty());
//!
//! let r = relations::from_dict([("k", 1)]);
//! let s = relations::from_dict([("k", 2)]);
//! assert!(relations::functional_union(&r, &s).is_undef());
//! ```
//!
//! Values are immutable and cheap to clone. Equality, ordering and
//! hashing are structural, so nested sets behave as set elements.

mod algebras;
mod error;
/// Extension of element operations to sets and multisets.
pub mod extension;
/// Lattice and monoid structure of sets and multisets.
pub mod lattice;
mod mathobject;
/// Grouping the elements of a set by a key.
pub mod partition;
mod undef;

/// Property-based generators for randomized test input.
#[cfg(test)]
pub(crate) mod strategy;

pub use algebras::clans;
pub use algebras::couplets;
pub use algebras::multiclans;
pub use algebras::multisets;
pub use algebras::relations;
pub use algebras::sets;
pub use error::AlgebraError;
pub use error::Result;
pub use mathobject::Atom;
pub use mathobject::Collection;
pub use mathobject::Couplet;
pub use mathobject::Kind;
pub use mathobject::MAX_MULTIPLICITY;
pub use mathobject::MathObject;
pub use mathobject::Multiset;
pub use mathobject::Set;
pub use mathobject::Value;
pub use undef::Definedness;
pub use undef::EvalOpts;
pub use undef::Operand;
pub use undef::Undef;

/// Build a [`Set`] from a list of values convertible to
/// [`MathObject`]. Duplicates collapse.
///
/// ```
/// use data_algebra::set;
/// use data_algebra::Couplet;
///
/// let s = set![1, "a", Couplet::new("x", "y"), 1];
/// assert_eq!(s.len(), 3);
/// assert!(set![].is_empty());
/// ```
#[macro_export]
macro_rules! set {
    () => {
        $crate::Set::empty()
    };
    ($($e:expr),+ $(,)?) => {
        $crate::Set::new(::std::vec![$($crate::MathObject::from($e)),+])
    };
}
