//! Property tests for set partitioning (pure domain, no DB).

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use crate::domain::reconcile::partition;

fn existing_ids() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::hash_set(1i64..200, 0..20).prop_map(|s| s.into_iter().collect())
}

fn desired_for(existing: Vec<i64>) -> impl Strategy<Value = (Vec<i64>, Vec<Option<i64>>)> {
    let pool = existing.clone();
    let pick = if pool.is_empty() {
        prop_oneof![Just(None), (500i64..600).prop_map(Some)].boxed()
    } else {
        prop_oneof![
            Just(None),
            prop::sample::select(pool).prop_map(Some),
            (500i64..600).prop_map(Some),
        ]
        .boxed()
    };
    (Just(existing), prop::collection::vec(pick, 0..30))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every desired item lands in exactly one bucket.
    #[test]
    fn prop_every_item_lands_once((existing, desired) in existing_ids().prop_flat_map(desired_for)) {
        let n = desired.len();
        let p = partition(&existing, desired, |x| *x);
        prop_assert_eq!(p.create.len() + p.fix.len() + p.dropped.len(), n);
        prop_assert!(p.create.iter().all(|x| x.is_none()));
    }

    /// fix and delete are disjoint and together cover the existing set.
    #[test]
    fn prop_fix_and_delete_cover_existing((existing, desired) in existing_ids().prop_flat_map(desired_for)) {
        let p = partition(&existing, desired, |x| *x);
        let fixed: HashSet<i64> = p.fix.iter().flatten().copied().collect();
        let deleted: HashSet<i64> = p.delete.iter().copied().collect();
        let all: HashSet<i64> = existing.iter().copied().collect();

        prop_assert!(fixed.is_disjoint(&deleted));
        prop_assert_eq!(&fixed | &deleted, all);
        // no identifier double counted
        prop_assert_eq!(fixed.len(), p.fix.len());
        prop_assert_eq!(deleted.len(), p.delete.len());
    }

    /// Fixes only ever name identifiers that were bound to the set.
    #[test]
    fn prop_fix_ids_come_from_existing((existing, desired) in existing_ids().prop_flat_map(desired_for)) {
        let before: HashMap<i64, ()> = existing.iter().map(|id| (*id, ())).collect();
        let p = partition(&existing, desired, |x| *x);
        for id in p.fix.iter().flatten() {
            prop_assert!(before.contains_key(id));
        }
    }

    /// Resubmitting current membership touches nothing but fixes.
    #[test]
    fn prop_identity_is_all_fix(existing in existing_ids()) {
        let desired: Vec<Option<i64>> = existing.iter().copied().map(Some).collect();
        let p = partition(&existing, desired, |x| *x);
        prop_assert!(p.create.is_empty());
        prop_assert!(p.delete.is_empty());
        prop_assert!(p.dropped.is_empty());
        prop_assert_eq!(p.fix.len(), existing.len());
    }
}
