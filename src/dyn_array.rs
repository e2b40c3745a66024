//! DynArray: growable array with an explicit, fallible growth policy.
//!
//! Capacity grows by doubling while small and by a fixed step of 64 slots
//! once it reaches 64, so large arrays do not over-allocate.

use crate::error::{Error, Result};
use log::debug;

const MAX_GROWTH_STEP: usize = 64;

/// Capacity to grow to from `current`: `max(current, 1) + min(current, 64)`.
pub(crate) fn next_capacity(current: usize) -> usize {
    current
        .max(1)
        .saturating_add(current.min(MAX_GROWTH_STEP))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynArray<T> {
    data: Vec<T>,
}

impl<T> DynArray<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity).map_err(|_| {
            debug!("could not reserve dyn array of {} elements", capacity);
            Error::AllocationFailure
        })?;
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Push `value` at the end, growing per the capacity policy when full.
    pub fn append(&mut self, value: T) -> Result<()> {
        if self.data.len() == self.data.capacity() {
            let target = next_capacity(self.data.capacity());
            let additional = target - self.data.len();
            if self.data.try_reserve_exact(additional).is_err() {
                debug!("could not grow dyn array to {} elements", target);
                return Err(Error::AllocationFailure);
            }
        }
        self.data.push(value);
        Ok(())
    }

    /// Remove the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.data.len() {
            return Err(Error::InvalidArgument("index out of range"));
        }
        Ok(self.data.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Access with negative indices counting back from the end (`-1` is last).
    pub fn at(&self, index: isize) -> Option<&T> {
        let resolved = if index < 0 {
            self.data.len().checked_sub(index.unsigned_abs())?
        } else {
            index.unsigned_abs()
        };
        self.data.get(resolved)
    }

    /// Shrink capacity down to the current length.
    pub fn fit(&mut self) {
        self.data.shrink_to_fit();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_policy_doubles_then_steps_by_64() {
        assert_eq!(next_capacity(0), 1);
        assert_eq!(next_capacity(1), 2);
        assert_eq!(next_capacity(4), 8);
        assert_eq!(next_capacity(32), 64);
        assert_eq!(next_capacity(64), 128);
        assert_eq!(next_capacity(128), 192);
        assert_eq!(next_capacity(usize::MAX), usize::MAX);
    }

    /// Invariant: capacity never falls below length while appending.
    #[test]
    fn append_grows_and_keeps_order() {
        let mut a = DynArray::with_capacity(4).unwrap();
        for i in 0..10 {
            a.append(i * i).unwrap();
            assert!(a.capacity() >= a.len());
        }
        assert_eq!(a.len(), 10);
        assert_eq!(a.get(5), Some(&25));
        assert_eq!(a.as_slice(), &[0, 1, 4, 9, 16, 25, 36, 49, 64, 81]);
    }

    /// Invariant: positional removal preserves relative order.
    #[test]
    fn remove_preserves_order() {
        let mut a = DynArray::new();
        for v in [10, 20, 30, 40, 50] {
            a.append(v).unwrap();
        }
        assert_eq!(a.remove(2).unwrap(), 30);
        assert_eq!(a.as_slice(), &[10, 20, 40, 50]);
        assert_eq!(a.remove(3).unwrap(), 50);
        assert_eq!(a.as_slice(), &[10, 20, 40]);
        assert_eq!(a.remove(3), Err(Error::InvalidArgument("index out of range")));
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let mut a = DynArray::new();
        for v in [1, 2, 3] {
            a.append(v).unwrap();
        }
        assert_eq!(a.at(-1), Some(&3));
        assert_eq!(a.at(-3), Some(&1));
        assert_eq!(a.at(-4), None);
        assert_eq!(a.at(0), Some(&1));
        assert_eq!(a.at(3), None);
    }

    /// Invariant: a reservation that cannot be satisfied is an error value.
    #[test]
    fn oversized_reservation_is_allocation_failure() {
        assert_eq!(
            DynArray::<u64>::with_capacity(usize::MAX),
            Err(Error::AllocationFailure)
        );
    }

    /// Elements without a `Default` impl still get a default, empty array.
    #[test]
    fn default_needs_no_element_default() {
        #[derive(Debug, PartialEq)]
        struct Opaque(u8);

        let mut a: DynArray<Opaque> = DynArray::default();
        assert!(a.is_empty());
        a.append(Opaque(1)).unwrap();
        assert_eq!(a.get(0), Some(&Opaque(1)));
    }

    #[test]
    fn fit_shrinks_to_length() {
        let mut a = DynArray::with_capacity(32).unwrap();
        a.append('x').unwrap();
        a.append('y').unwrap();
        a.fit();
        assert_eq!(a.len(), 2);
        assert!(a.capacity() >= 2 && a.capacity() < 32);
        assert_eq!((&a).into_iter().collect::<String>(), "xy");
    }
}
