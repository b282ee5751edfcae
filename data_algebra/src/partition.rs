/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Partitioning a set by a key function.
//!
//! The key function maps each element to a math object; elements with
//! equal keys land in the same block. Partitioning a clan by the value
//! of one column groups its rows:
//!
//! ```
//! use data_algebra::partition;
//! use data_algebra::relations;
//! use data_algebra::set;
//! use data_algebra::MathObject;
//!
//! let rows = set![
//!     relations::from_dict([("dept", 10), ("id", 1)]),
//!     relations::from_dict([("dept", 10), ("id", 2)]),
//!     relations::from_dict([("dept", 20), ("id", 3)]),
//! ];
//! let by_dept =
//!     partition::left_equiv_relation(&rows, |row| row.apply("dept")).unwrap();
//! assert_eq!(by_dept.get(10).unwrap().as_set().map(|s| s.len()), Some(1));
//! assert_eq!(
//!     by_dept.apply(20).unwrap(),
//!     MathObject::from(set![relations::from_dict([("dept", 20), ("id", 3)])])
//! );
//! ```

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::algebras::expect_set;
use crate::error::Result;
use crate::mathobject::Couplet;
use crate::mathobject::MathObject;
use crate::mathobject::Set;
use crate::undef::Operand;

fn blocks<F, K>(op: &'static str, set: impl Operand, key: F) -> Result<BTreeMap<MathObject, Set>>
where
    F: Fn(&MathObject) -> Result<K>,
    K: Into<MathObject>,
{
    let set = expect_set(op, set)?;
    let mut blocks: BTreeMap<MathObject, BTreeSet<MathObject>> = BTreeMap::new();
    for element in set.iter() {
        blocks
            .entry(key(element)?.into())
            .or_default()
            .insert(element.clone());
    }
    tracing::trace!(op, elements = set.len(), blocks = blocks.len(), "partitioned");
    Ok(blocks
        .into_iter()
        .map(|(key, block)| (key, Set::from_elements(block)))
        .collect())
}

/// The blocks of elements of `set` that share a key. Every block is
/// non-empty and every element is in exactly one block.
pub fn partition<F, K>(set: impl Operand, key: F) -> Result<MathObject>
where
    F: Fn(&MathObject) -> Result<K>,
    K: Into<MathObject>,
{
    Ok(blocks("partition", set, key)?
        .into_values()
        .collect::<Set>()
        .into())
}

/// The function `key ↦ block` over the blocks of `set`.
pub fn left_equiv_relation<F, K>(set: impl Operand, key: F) -> Result<MathObject>
where
    F: Fn(&MathObject) -> Result<K>,
    K: Into<MathObject>,
{
    Ok(blocks("left_equiv_relation", set, key)?
        .into_iter()
        .map(|(key, block)| Couplet::new(key, block))
        .collect::<Set>()
        .into())
}
