//! ArraySet: a small set stored as an unsorted `DynArray`.
//!
//! Membership is a linear scan, so this only suits small sets.

use crate::dyn_array::DynArray;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySet<T> {
    items: DynArray<T>,
}

impl<T: PartialEq> ArraySet<T> {
    pub fn new() -> Self {
        Self {
            items: DynArray::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|x| x == item)
    }

    /// Add `item` unless already present. Returns whether it was added.
    pub fn add(&mut self, item: T) -> Result<bool> {
        if self.contains(&item) {
            return Ok(false);
        }
        self.items.append(item)?;
        Ok(true)
    }

    /// Remove `item`, keeping the order of the remaining elements.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.items.iter().position(|x| x == item) {
            Some(pos) => self.items.remove(pos).is_ok(),
            None => false,
        }
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: PartialEq> Default for ArraySet<T> {
    fn default() -> Self {
        Self::new()
    }
}
