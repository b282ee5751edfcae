/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Lattice and monoid structure of the containers.
//!
//! Union and intersection make sets and multisets lattices ordered by
//! containment, with the empty container at the bottom. Folding over
//! these traits is how the big unions and intersections are computed.
//!
//! # Provided Structure
//!
//! - [`Set`]: join = union, bottom = ∅, meet = intersection.
//! - [`Multiset`]: join = pointwise max, bottom = ∅, meet = pointwise
//!   min.
//! - [`Additive`]: multisets under multiplicity addition, saturating
//!   at [`MAX_MULTIPLICITY`](crate::MAX_MULTIPLICITY). Addition is not
//!   idempotent, so this is a commutative monoid and not a lattice.
//!
//! ```
//! use data_algebra::lattice::BoundedJoinSemilattice;
//! use data_algebra::lattice::JoinSemilattice;
//! use data_algebra::set;
//! use data_algebra::Set;
//!
//! let a = set![1, 2];
//! let b = set![2, 3];
//! assert_eq!(a.join(&b), set![1, 2, 3]);
//! assert!(a.leq(&a.join(&b)));
//! assert_eq!(Set::join_all_from_bottom([a, b]), set![1, 2, 3]);
//! ```

use crate::mathobject::Multiset;
use crate::mathobject::Set;

/// Containers with an associative `combine`.
pub trait Semigroup: Sized {
    fn combine(&self, other: &Self) -> Self;
}

/// A [`Semigroup`] with an identity: `empty().combine(a) == a` and
/// `a.combine(empty()) == a`.
pub trait Monoid: Semigroup {
    fn empty() -> Self;

    /// Combine everything in `iter`; `empty()` if there is nothing.
    fn concat<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        iter.into_iter()
            .fold(Self::empty(), |acc, x| acc.combine(&x))
    }
}

/// Marker: `combine` is also commutative.
pub trait CommutativeMonoid: Monoid {}

/// Least upper bounds. `join` is associative, commutative and
/// idempotent; for containers it is union.
pub trait JoinSemilattice: Sized {
    fn join(&self, other: &Self) -> Self;

    /// Containment, read off the join: `a ≤ b` iff `a ⊔ b = b`.
    fn leq(&self, other: &Self) -> bool
    where
        Self: PartialEq,
    {
        self.join(other) == *other
    }
}

/// A [`JoinSemilattice`] with a least element, the empty container.
pub trait BoundedJoinSemilattice: JoinSemilattice {
    fn bottom() -> Self;

    /// Join everything in `it`; `bottom()` if there is nothing. This is
    /// the big union of a family of containers.
    fn join_all_from_bottom<I>(it: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        it.into_iter().fold(Self::bottom(), |acc, x| acc.join(&x))
    }
}

/// Greatest lower bounds, the dual of [`JoinSemilattice`]; for
/// containers `meet` is intersection.
pub trait MeetSemilattice: Sized {
    fn meet(&self, other: &Self) -> Self;

    /// Meet everything in `it`. `None` if there is nothing, as there
    /// is no universal container to start from.
    fn meet_all<I>(it: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        it.into_iter().reduce(|acc, x| acc.meet(&x))
    }
}

// Every bounded join-semilattice is a commutative monoid under join.

impl<T: JoinSemilattice> Semigroup for T {
    fn combine(&self, other: &Self) -> Self {
        self.join(other)
    }
}

impl<T: BoundedJoinSemilattice> Monoid for T {
    fn empty() -> Self {
        Self::bottom()
    }

    fn concat<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::join_all_from_bottom(iter)
    }
}

impl<T: BoundedJoinSemilattice> CommutativeMonoid for T {}

// Set

impl JoinSemilattice for Set {
    fn join(&self, other: &Self) -> Self {
        self.union(other)
    }
}

impl BoundedJoinSemilattice for Set {
    fn bottom() -> Self {
        Set::empty()
    }
}

impl MeetSemilattice for Set {
    fn meet(&self, other: &Self) -> Self {
        self.intersect(other)
    }
}

// Multiset

impl JoinSemilattice for Multiset {
    fn join(&self, other: &Self) -> Self {
        self.union(other)
    }
}

impl BoundedJoinSemilattice for Multiset {
    fn bottom() -> Self {
        Multiset::empty()
    }
}

impl MeetSemilattice for Multiset {
    fn meet(&self, other: &Self) -> Self {
        self.intersect(other)
    }
}

/// Multisets under saturating multiplicity addition. Use
/// [`Multiset::add`] where reaching the cap is an error.
///
/// ```
/// use data_algebra::lattice::Additive;
/// use data_algebra::lattice::Monoid;
/// use data_algebra::MathObject;
/// use data_algebra::Multiset;
///
/// let parts = [
///     Additive(Multiset::from_elements(["a"])),
///     Additive(Multiset::from_elements(["a", "b"])),
/// ];
/// let Additive(total) = Additive::concat(parts);
/// assert_eq!(total.multiplicity(&MathObject::from("a")), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Additive(pub Multiset);

impl Semigroup for Additive {
    fn combine(&self, other: &Self) -> Self {
        Additive(self.0.saturating_add(&other.0))
    }
}

impl Monoid for Additive {
    fn empty() -> Self {
        Additive(Multiset::empty())
    }
}

impl CommutativeMonoid for Additive {}
