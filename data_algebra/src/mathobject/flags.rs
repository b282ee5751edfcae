/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Write-once cache of derived structural properties.

use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

/// A structural property a container may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Property {
    Relation,
    Clan,
    Multiclan,
    LeftFunctional,
    RightFunctional,
    LeftRegular,
    RightRegular,
    Reflexive,
    Symmetric,
    Transitive,
    Absolute,
}

// Two bits per property: unknown, false, true.
const FALSE: u32 = 0b01;
const TRUE: u32 = 0b10;
const MASK: u32 = 0b11;

impl Property {
    fn shift(self) -> u32 {
        2 * self as u32
    }
}

/// Tri-state property bitset.
///
/// Each property is computed at most once per container and never
/// changes afterwards. Two threads racing on the same property compute
/// the same answer, so the loser's `fetch_or` is a no-op.
#[derive(Debug, Default)]
pub(crate) struct Flags(AtomicU32);

impl Flags {
    pub(crate) fn get(&self, property: Property) -> Option<bool> {
        match (self.0.load(Ordering::Acquire) >> property.shift()) & MASK {
            TRUE => Some(true),
            FALSE => Some(false),
            _ => None,
        }
    }

    pub(crate) fn set(&self, property: Property, value: bool) {
        let bits = if value { TRUE } else { FALSE };
        debug_assert!(
            self.get(property).map_or(true, |known| known == value),
            "{:?} flag flipped",
            property
        );
        self.0.fetch_or(bits << property.shift(), Ordering::AcqRel);
    }

    pub(crate) fn get_or_init(&self, property: Property, init: impl FnOnce() -> bool) -> bool {
        if let Some(value) = self.get(property) {
            return value;
        }
        let value = init();
        self.set(property, value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_init_computes_once() {
        let flags = Flags::default();
        let mut calls = 0;
        assert!(flags.get_or_init(Property::Clan, || {
            calls += 1;
            true
        }));
        assert!(flags.get_or_init(Property::Clan, || {
            calls += 1;
            false
        }));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_properties_are_independent() {
        let flags = Flags::default();
        flags.set(Property::Relation, false);
        flags.set(Property::Absolute, true);
        assert_eq!(flags.get(Property::Relation), Some(false));
        assert_eq!(flags.get(Property::Absolute), Some(true));
        assert_eq!(flags.get(Property::Transitive), None);
        assert_eq!(flags.get(Property::Clan), None);
    }
}
