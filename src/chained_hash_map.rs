//! ChainedHashMap: fixed bucket array with separately chained entries.
//!
//! Entries live in a generational arena; each bucket holds the key of the
//! first entry in its chain and each entry holds the key of its successor.
//! New entries are prepended, so a chain lists its entries newest first.

use crate::error::{Error, Result};
use crate::hash::bucket_index;
use core::fmt;
use core::num::NonZeroUsize;
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Entry<V> {
    key: String,
    value: V,
    next: Option<DefaultKey>,
}

/// Hash map from owned `String` keys to `V` with a bucket count fixed at
/// construction.
///
/// Keys and values are moved into the map on insert and never cloned.
/// There is no rehashing: once the load factor grows past a handful of
/// entries per bucket, lookups degrade towards a linear scan of the chain,
/// and with a single bucket every operation is O(n).
pub struct ChainedHashMap<V> {
    bucket_count: NonZeroUsize,
    buckets: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<V>>,
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        debug!("rejecting empty key");
        return Err(Error::InvalidArgument("key must not be empty"));
    }
    Ok(())
}

/// Iterator over the entries of one chain, newest first.
pub struct Chain<'a, V> {
    slots: &'a SlotMap<DefaultKey, Entry<V>>,
    cursor: Option<DefaultKey>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.get(self.cursor?)?;
        self.cursor = entry.next;
        Some((entry.key.as_str(), &entry.value))
    }
}

/// Iterator over immutable entries, in no particular order.
pub struct Iter<'a, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (e.key.as_str(), &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// Iterator over mutable values, in no particular order.
pub struct IterMut<'a, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Entry<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .next()
            .map(|(_, e)| (e.key.as_str(), &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<V> ChainedHashMap<V> {
    /// Create a map with `bucket_count` empty buckets.
    ///
    /// Fails with [`Error::InvalidArgument`] for a zero count and with
    /// [`Error::AllocationFailure`] if the bucket array cannot be reserved.
    pub fn new(bucket_count: usize) -> Result<Self> {
        let Some(count) = NonZeroUsize::new(bucket_count) else {
            debug!("rejecting chained map with zero buckets");
            return Err(Error::InvalidArgument("bucket count must be non-zero"));
        };
        let mut buckets = Vec::new();
        if buckets.try_reserve_exact(bucket_count).is_err() {
            debug!("could not reserve {} buckets", bucket_count);
            return Err(Error::AllocationFailure);
        }
        buckets.resize(bucket_count, None);
        debug!("created chained map with {} buckets", bucket_count);
        Ok(Self {
            bucket_count: count,
            buckets,
            slots: SlotMap::with_key(),
        })
    }

    /// Release every entry and the bucket array.
    pub fn destroy(self) {
        drop(self);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count.get()
    }

    /// Entries per bucket. Unbounded, since the bucket count never grows.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    #[inline]
    fn index_of(&self, key: &str) -> usize {
        bucket_index(key.as_bytes(), self.bucket_count)
    }

    fn find_slot(&self, index: usize, key: &str) -> Option<DefaultKey> {
        let mut cursor = self.buckets[index];
        while let Some(slot) = cursor {
            let entry = self.slots.get(slot)?;
            if entry.key == key {
                return Some(slot);
            }
            cursor = entry.next;
        }
        None
    }

    /// Insert `key -> value`, or overwrite the value if `key` is present.
    ///
    /// Returns `true` when a new entry was created and `false` when an
    /// existing one was updated. On update the previous value is dropped
    /// and the stored key is kept.
    pub fn insert(&mut self, key: String, value: V) -> Result<bool> {
        self.replace(key, value).map(|old| old.is_none())
    }

    /// Like [`insert`](Self::insert), but hands back the displaced value.
    pub fn replace(&mut self, key: String, value: V) -> Result<Option<V>> {
        check_key(&key)?;
        let index = self.index_of(&key);
        if let Some(slot) = self.find_slot(index, &key) {
            if let Some(entry) = self.slots.get_mut(slot) {
                return Ok(Some(core::mem::replace(&mut entry.value, value)));
            }
        }

        let next = self.buckets[index];
        let slot = self.slots.insert(Entry { key, value, next });
        self.buckets[index] = Some(slot);
        Ok(None)
    }

    /// Remove `key`. Returns `false` if it was not present.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        self.remove(key).map(|removed| removed.is_some())
    }

    /// Unlink `key` from its chain and return the owned key and value.
    pub fn remove(&mut self, key: &str) -> Result<Option<(String, V)>> {
        check_key(key)?;
        let index = self.index_of(key);
        let mut prev: Option<DefaultKey> = None;
        let mut cursor = self.buckets[index];
        while let Some(slot) = cursor {
            let Some(entry) = self.slots.get(slot) else {
                break;
            };
            if entry.key == key {
                let next = entry.next;
                match prev {
                    Some(p) => {
                        if let Some(pe) = self.slots.get_mut(p) {
                            pe.next = next;
                        }
                    }
                    None => self.buckets[index] = next,
                }
                return Ok(self.slots.remove(slot).map(|e| (e.key, e.value)));
            }
            prev = cursor;
            cursor = entry.next;
        }
        Ok(None)
    }

    pub fn get(&self, key: &str) -> Result<Option<&V>> {
        check_key(key)?;
        let index = self.index_of(key);
        Ok(self
            .find_slot(index, key)
            .and_then(|slot| self.slots.get(slot))
            .map(|e| &e.value))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<Option<&mut V>> {
        check_key(key)?;
        let index = self.index_of(key);
        let slot = self.find_slot(index, key);
        Ok(slot
            .and_then(|slot| self.slots.get_mut(slot))
            .map(|e| &mut e.value))
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        Ok(self.find_slot(self.index_of(key), key).is_some())
    }

    /// Walk one bucket's chain. `None` if `bucket` is out of range.
    pub fn chain(&self, bucket: usize) -> Option<Chain<'_, V>> {
        let head = *self.buckets.get(bucket)?;
        Some(Chain {
            slots: &self.slots,
            cursor: head,
        })
    }

    pub fn chain_len(&self, bucket: usize) -> usize {
        self.chain(bucket).map_or(0, |c| c.count())
    }

    pub fn max_chain_len(&self) -> usize {
        (0..self.bucket_count())
            .map(|b| self.chain_len(b))
            .max()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            it: self.slots.iter_mut(),
        }
    }

    /// Release every entry chain by chain; the bucket array is kept.
    pub fn clear(&mut self) {
        for head in self.buckets.iter_mut() {
            let mut cursor = head.take();
            while let Some(slot) = cursor {
                cursor = self.slots.remove(slot).and_then(|e| e.next);
            }
        }
    }

    /// Check the structural invariants: every entry sits in the bucket its
    /// key hashes to, appears in exactly one chain, and keys are unique.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut seen = std::collections::HashSet::new();
        let mut linked = 0usize;
        for bucket in 0..self.bucket_count() {
            for (key, _) in self.chain(bucket).into_iter().flatten() {
                assert_eq!(self.index_of(key), bucket, "misplaced key {key:?}");
                assert!(seen.insert(key.to_owned()), "duplicate key {key:?}");
                linked += 1;
            }
        }
        assert_eq!(linked, self.slots.len(), "unlinked or orphaned entries");
    }
}

impl<V> Drop for ChainedHashMap<V> {
    fn drop(&mut self) {
        let released = self.len();
        self.clear();
        trace!(
            "destroyed chained map: {} buckets, {} entries released",
            self.bucket_count(),
            released
        );
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
