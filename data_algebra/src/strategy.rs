/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for math objects.
//!
//! Atoms are drawn from a small alphabet so that generated values
//! overlap: unions share elements, and relation compositions find
//! matching lefts and rights often enough to be interesting.
//!
//! Example usage:
//!
//! ```
//! use proptest::prelude::*;
//!
//! use crate::strategy::gen_relation;
//!
//! proptest! {
//!     #[test]
//!     fn test_relation(r in gen_relation(4)) {
//!         assert!(r.is_relation());
//!     }
//! }
//! ```
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::Couplet;
use crate::MathObject;
use crate::Multiset;
use crate::Set;

static ALPHABET: [&str; 4] = ["a", "b", "c", "d"];

/// An atom: a small integer or a one-letter string.
pub fn gen_atom() -> impl Strategy<Value = MathObject> {
    prop_oneof![
        (0i64..4).prop_map(MathObject::from),
        prop::sample::select(&ALPHABET[..]).prop_map(MathObject::from),
    ]
}

/// A set of at most `max_len` atoms.
pub fn gen_atom_set(max_len: usize) -> impl Strategy<Value = Set> {
    prop::collection::vec(gen_atom(), 0..=max_len).prop_map(Set::new)
}

/// A relation of at most `max_len` couplets between letters.
pub fn gen_relation(max_len: usize) -> impl Strategy<Value = Set> {
    let letter = || prop::sample::select(&ALPHABET[..]);
    prop::collection::vec((letter(), letter()), 0..=max_len).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(left, right)| Couplet::new(left, right))
            .collect()
    })
}

/// A clan of at most `max_len` relations of up to three couplets.
pub fn gen_clan(max_len: usize) -> impl Strategy<Value = Set> {
    prop::collection::vec(gen_relation(3), 0..=max_len).prop_map(Set::new)
}

fn tally(pairs: Vec<(MathObject, u64)>) -> Multiset {
    let mut counts = BTreeMap::new();
    for (element, n) in pairs {
        *counts.entry(element).or_insert(0) += n;
    }
    Multiset::from_map(counts)
}

/// A multiset of at most `max_distinct` atoms, each with multiplicity
/// between 1 and 3.
pub fn gen_multiset(max_distinct: usize) -> impl Strategy<Value = Multiset> {
    prop::collection::vec((gen_atom(), 1u64..4), 0..=max_distinct).prop_map(tally)
}

/// A multiclan of at most `max_distinct` relations, each with
/// multiplicity between 1 and 3.
pub fn gen_multiclan(max_distinct: usize) -> impl Strategy<Value = Multiset> {
    let weighted = (gen_relation(3).prop_map(MathObject::from), 1u64..4);
    prop::collection::vec(weighted, 0..=max_distinct).prop_map(tally)
}
