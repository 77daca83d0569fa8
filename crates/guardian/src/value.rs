//! What the checks can ask of a value.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::error::messages;

/// A value that may be absent.
pub trait Nullable {
    type Value: ?Sized;

    /// The present value, or `None` when null.
    fn value(&self) -> Option<&Self::Value>;

    fn is_null(&self) -> bool {
        self.value().is_none()
    }
}

impl<T> Nullable for Option<T> {
    type Value = T;

    fn value(&self) -> Option<&T> {
        self.as_ref()
    }
}

impl<N: Nullable + ?Sized> Nullable for &N {
    type Value = N::Value;

    fn value(&self) -> Option<&N::Value> {
        (**self).value()
    }
}

impl<N: Nullable + ?Sized> Nullable for Box<N> {
    type Value = N::Value;

    fn value(&self) -> Option<&N::Value> {
        (**self).value()
    }
}

/// A collection whose emptiness can be checked.
pub trait Sequence {
    fn has_elements(&self) -> bool;
}

macro_rules! sequence_via_is_empty {
    ($($ty:ty => [$($generics:tt)*]),* $(,)?) => {
        $(
            impl<$($generics)*> Sequence for $ty {
                fn has_elements(&self) -> bool {
                    !self.is_empty()
                }
            }
        )*
    };
}

sequence_via_is_empty! {
    Vec<T> => [T],
    VecDeque<T> => [T],
    [T] => [T],
    HashSet<T, S> => [T, S],
    BTreeSet<T> => [T],
    HashMap<K, V, S> => [K, V, S],
    BTreeMap<K, V> => [K, V],
    String => [],
    str => [],
}

impl<T, const N: usize> Sequence for [T; N] {
    fn has_elements(&self) -> bool {
        N != 0
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    fn has_elements(&self) -> bool {
        (**self).has_elements()
    }
}

/// A collection whose elements may be null.
pub trait NullElements {
    fn contains_null(&self) -> bool;
}

impl<E: Nullable> NullElements for [E] {
    fn contains_null(&self) -> bool {
        self.iter().any(Nullable::is_null)
    }
}

impl<E: Nullable, const N: usize> NullElements for [E; N] {
    fn contains_null(&self) -> bool {
        self.as_slice().contains_null()
    }
}

impl<E: Nullable> NullElements for Vec<E> {
    fn contains_null(&self) -> bool {
        self.as_slice().contains_null()
    }
}

impl<E: Nullable> NullElements for VecDeque<E> {
    fn contains_null(&self) -> bool {
        self.iter().any(Nullable::is_null)
    }
}

impl<S: NullElements + ?Sized> NullElements for &S {
    fn contains_null(&self) -> bool {
        (**self).contains_null()
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// Signed integers accepted by the range checks.
pub trait Integer: Copy + sealed::Sealed {
    fn widen(self) -> i64;
}

impl Integer for i32 {
    fn widen(self) -> i64 {
        i64::from(self)
    }
}

impl Integer for i64 {
    fn widen(self) -> i64 {
        self
    }
}

/// The range a checked integer must stay out of.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RangeConstraint {
    /// Fails when `value > 0`.
    Positive,
    /// Fails when `value >= 0`.
    PositiveOrZero,
    /// Fails when `value < 0`.
    Negative,
    /// Fails when `value <= 0`.
    NegativeOrZero,
}

impl RangeConstraint {
    pub fn rejects(self, value: i64) -> bool {
        match self {
            RangeConstraint::Positive => value > 0,
            RangeConstraint::PositiveOrZero => value >= 0,
            RangeConstraint::Negative => value < 0,
            RangeConstraint::NegativeOrZero => value <= 0,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RangeConstraint::Positive => messages::POSITIVE,
            RangeConstraint::PositiveOrZero => messages::POSITIVE_OR_ZERO,
            RangeConstraint::Negative => messages::NEGATIVE,
            RangeConstraint::NegativeOrZero => messages::NEGATIVE_OR_ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable() {
        assert!(None::<u8>.is_null());
        assert!(!Some(1).is_null());
        assert!((&None::<String>).is_null());
        assert_eq!(Box::new(Some(3)).value(), Some(&3));
    }

    #[test]
    fn test_sequence() {
        assert!(!Vec::<u8>::new().has_elements());
        assert!(vec![1].has_elements());
        assert!(!"".has_elements());
        assert!(String::from("x").has_elements());
        assert!(![0u8; 0].has_elements());
        assert!([1, 2].has_elements());
        assert!(!HashMap::<u8, u8>::new().has_elements());
        assert!(BTreeSet::from([1]).has_elements());
        assert!((&&vec![1]).has_elements());
    }

    #[test]
    fn test_null_elements() {
        assert!(vec![Some(1), None].contains_null());
        assert!(!vec![Some(1)].contains_null());
        assert!([None::<u8>].contains_null());
        assert!(!VecDeque::<Option<u8>>::new().contains_null());
    }

    #[test]
    fn test_range_constraint_boundaries() {
        let cases = [
            (RangeConstraint::Positive, [false, false, true]),
            (RangeConstraint::PositiveOrZero, [false, true, true]),
            (RangeConstraint::Negative, [true, false, false]),
            (RangeConstraint::NegativeOrZero, [true, true, false]),
        ];
        for (constraint, expected) in cases {
            let actual = [-1, 0, 1].map(|v| constraint.rejects(v));
            assert_eq!(actual, expected, "{constraint:?}");
        }
    }

    #[test]
    fn test_widen() {
        assert_eq!(i32::MIN.widen(), -2_147_483_648);
        assert_eq!(i64::MAX.widen(), i64::MAX);
    }
}
