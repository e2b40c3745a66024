//! chained-hashmap: a single-threaded hash map with a fixed number of
//! buckets and separate chaining, plus two small linear-storage companions.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a hash map whose collision handling is easy to follow and whose
//!   structural invariants can be checked after every operation.
//! - Layers:
//!   - `hash`: polynomial rolling hash (`h = h * 31 + byte`, wrapping)
//!     reduced modulo the bucket count.
//!   - `ChainedHashMap<V>`: a bucket array of chain heads over an arena of
//!     entries; each entry links to the next entry of its chain.
//!   - `DynArray<T>` / `ArraySet<T>`: linear storage with append,
//!     order-preserving positional delete and indexed access.
//!
//! Constraints
//! - Single-threaded; no interior mutability and no locking. Callers that
//!   share a map across threads must serialize access themselves.
//! - Bucket count is fixed at construction. There is no rehashing, so the
//!   load factor is unbounded and a degenerate key set makes every
//!   operation a linear scan of one chain.
//! - Keys are owned `String`s moved in by the caller; the map never clones
//!   keys or values.
//! - Insert prepends, so a chain lists entries newest first.
//!
//! Storage
//! - Entries live in a `slotmap::SlotMap`; bucket heads and successor links
//!   are generational keys into it. Freed slots are reused by later
//!   inserts, and a stale link can never alias a new entry.
//!
//! Failure policy
//! - A zero bucket count, an empty key or an out-of-range array index is
//!   `Error::InvalidArgument`. Failing to reserve the bucket array or to
//!   grow a `DynArray` is `Error::AllocationFailure`. Both are returned,
//!   never panicked on. The entry arena grows through `SlotMap::insert`
//!   and is subject to the global allocation-error handler.
//! - A missing key is a normal result: `None` from lookups, `false` from
//!   deletes.
//!
//! Logging
//! - Construction, rejected arguments and allocation failures are reported
//!   through the `log` facade at debug level; destruction at trace level.

mod array_set;
pub mod chained_hash_map;
mod chained_hash_map_proptest;
mod dyn_array;
mod error;
mod hash;

// Public surface
pub use array_set::ArraySet;
pub use chained_hash_map::{Chain, ChainedHashMap, Iter, IterMut};
pub use dyn_array::DynArray;
pub use error::{Error, Result};
pub use hash::{hash, polynomial_hash};
