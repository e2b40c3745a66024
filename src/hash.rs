//! Polynomial rolling hash used to place keys into buckets.
//!
//! `h = h * 31 + byte`, left to right, wrapping at the width of `usize`.
//! Deterministic but not resistant to adversarial or clustered keys.

use crate::error::{Error, Result};
use core::num::NonZeroUsize;

const MULTIPLIER: usize = 31;

/// Raw accumulator over `bytes`, before reduction to a bucket index.
#[inline]
pub fn polynomial_hash(bytes: &[u8]) -> usize {
    bytes.iter().fold(0usize, |h, &b| {
        h.wrapping_mul(MULTIPLIER).wrapping_add(usize::from(b))
    })
}

#[inline]
pub(crate) fn bucket_index(bytes: &[u8], bucket_count: NonZeroUsize) -> usize {
    polynomial_hash(bytes) % bucket_count.get()
}

/// Bucket index in `[0, bucket_count)` for `key`.
///
/// Fails with [`Error::InvalidArgument`] when `bucket_count` is zero.
pub fn hash(key: &str, bucket_count: usize) -> Result<usize> {
    let count = NonZeroUsize::new(bucket_count)
        .ok_or(Error::InvalidArgument("bucket count must be non-zero"))?;
    Ok(bucket_index(key.as_bytes(), count))
}
