#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can call
// the internal invariant checker after every operation.

use crate::chained_hash_map::ChainedHashMap;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Replace(usize, i32),
    Delete(usize),
    Get(usize),
    Probe(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{1,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::Delete),
            idx.clone().prop_map(OpI::Get),
            "[a-z]{1,5}".prop_map(OpI::Probe),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drive `sut` and a std HashMap model through the same operations.
// Invariants exercised:
// - insert reports "new" exactly when the model lacked the key (uniqueness).
// - get/delete agree with the model; absent keys leave both unchanged.
// - delete removes one logical entry and leaves the others intact.
// - iteration yields exactly the model's entries.
// - placement: every entry sits in the bucket its key hashes to.
fn run_state_machine(
    bucket_count: usize,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut sut: ChainedHashMap<i32> = ChainedHashMap::new(bucket_count).unwrap();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let fresh = sut.insert(k.clone(), v).unwrap();
                prop_assert_eq!(fresh, model.insert(k, v).is_none());
            }
            OpI::Replace(i, v) => {
                let k = pool[i].clone();
                let old = sut.replace(k.clone(), v).unwrap();
                prop_assert_eq!(old, model.insert(k, v));
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                let removed = sut.delete(k).unwrap();
                prop_assert_eq!(removed, model.remove(k).is_some());
                prop_assert!(sut.get(k).unwrap().is_none());
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k).unwrap(), model.get(k));
            }
            OpI::Probe(s) => {
                prop_assert_eq!(sut.contains_key(&s).unwrap(), model.contains_key(&s));
                prop_assert_eq!(sut.get(&s).unwrap(), model.get(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k).unwrap() {
                    *v = v.saturating_add(d);
                }
                if let Some(mv) = model.get_mut(k) {
                    *mv = mv.saturating_add(d);
                }
            }
            OpI::Iterate => {
                let s: BTreeMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.to_owned(), *v)).collect();
                let m: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s, m);
            }
        }

        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.bucket_count(), bucket_count);
    }

    // Every surviving key is still retrievable with its model value.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k).unwrap(), Some(v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(16, pool, ops)?;
    }
}

// Same invariants with a single bucket: every key collides, so every
// operation walks one chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_single_bucket((pool, ops) in arb_scenario()) {
        run_state_machine(1, pool, ops)?;
    }
}
