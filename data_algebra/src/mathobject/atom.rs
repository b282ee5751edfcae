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

/// A scalar carried by an [`Atom`].
///
/// Values of different variants never compare equal: `Int(1)`,
/// `Float(1.0)` and `Str("1")` are three distinct values. Floats
/// compare by their canonical bit pattern (`-0.0` is `0.0`, all NaNs
/// are one NaN), which gives them lawful `Eq`, `Hash` and `Ord`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
}

fn canonical(f: f64) -> f64 {
    if f == 0.0 {
        0.0
    } else if f.is_nan() {
        f64::NAN
    } else {
        f
    }
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) => 1,
            Value::Float(_) => 2,
            Value::Str(_) => 3,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => canonical(*f).to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(canonical(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value.into())
    }
}

/// An indivisible value: the leaves of every data-algebra structure.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atom {
    value: Value,
}

impl Atom {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Atom {
                fn from(value: $ty) -> Self {
                    Atom::new(value)
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, u32, i64, f64, &str, String, Value);

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_equality_is_type_sensitive() {
        assert_eq!(Atom::new(1), Atom::new(1i64));
        assert_ne!(Atom::new(1), Atom::new(1.0));
        assert_ne!(Atom::new(1), Atom::new("1"));
        assert_ne!(Atom::new(true), Atom::new(1));
    }

    #[test]
    fn test_float_canonicalization() {
        assert_eq!(Atom::new(0.0), Atom::new(-0.0));
        assert_eq!(Atom::new(f64::NAN), Atom::new(-f64::NAN));
        let distinct: HashSet<_> = [Atom::new(0.0), Atom::new(-0.0), Atom::new(f64::NAN)]
            .into_iter()
            .collect();
        assert_eq!(distinct.len(), 2);
        // Constructed directly, bypassing `From<f64>`.
        assert_eq!(
            Atom::new(Value::Float(-0.0)),
            Atom::new(Value::Float(0.0))
        );
    }

    #[test]
    fn test_order_ranks_variants() {
        let mut atoms = vec![
            Atom::new("a"),
            Atom::new(2.5),
            Atom::new(3),
            Atom::new(false),
            Atom::new(-1),
        ];
        atoms.sort();
        assert_eq!(
            atoms,
            vec![
                Atom::new(false),
                Atom::new(-1),
                Atom::new(3),
                Atom::new(2.5),
                Atom::new("a"),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Atom::new("a").to_string(), "'a'");
        assert_eq!(Atom::new(7).to_string(), "7");
        assert_eq!(Atom::new(1.0).to_string(), "1.0");
        assert_eq!(Atom::new(true).to_string(), "true");
    }
}
