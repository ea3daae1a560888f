//! Property tests over randomly shaped records.
//!
//! Records are generated as a list of systems, each a list of
//! `(n_vars, n_comp)` groups, plus a run of extra-integer values.

#![cfg(not(miri))]

use meshdof_core::{DofIdType, INVALID_ID};
use meshdof_store::DofRecord;
use meshdof_test_utils::fixtures::{instrument, SystemLayout};
use meshdof_test_utils::number_sequentially;
use proptest::prelude::*;

fn arb_layout() -> impl Strategy<Value = Vec<SystemLayout>> {
    prop::collection::vec(
        prop::collection::vec((0u32..6, 0u32..4), 0..4).prop_map(|g| SystemLayout { groups: g }),
        0..4,
    )
}

fn build(layout: &[SystemLayout], extras: &[DofIdType], first: DofIdType) -> DofRecord {
    let mut recs = [DofRecord::new()];
    instrument(&mut recs[0], layout);
    number_sequentially(&mut recs, first);
    let [mut r] = recs;
    r.add_extra_integers(extras.len() as u32);
    for (i, &v) in extras.iter().enumerate() {
        r.set_extra_integer(i as u32, v);
    }
    r
}

proptest! {
    #[test]
    fn dof_number_follows_group_base(
        layout in arb_layout(),
        first in 0 as DofIdType..1000,
    ) {
        let r = build(&layout, &[], first);
        prop_assert_eq!(r.n_systems() as usize, layout.len());

        // Bases as the numbering pass hands them out: system by system,
        // skipping groups without dofs.
        let mut next = first;
        for (s, sys) in layout.iter().enumerate() {
            let s = s as u32;
            let mut v = 0u32;
            for &(nv, nc) in &sys.groups {
                let base = next;
                if nv * nc > 0 {
                    next += (nv * nc) as DofIdType;
                }
                for vig in 0..nv {
                    for c in 0..nc {
                        let expected =
                            base + vig as DofIdType * nc as DofIdType + c as DofIdType;
                        prop_assert_eq!(r.dof_number(s, v, c), expected);
                    }
                    v += 1;
                }
            }
            prop_assert_eq!(r.n_vars(s), v);
        }
    }

    #[test]
    fn extra_growth_preserves_prefix(
        values in prop::collection::vec(0 as DofIdType..INVALID_ID, 0..12),
        more in 0u32..8,
    ) {
        let mut r = DofRecord::new();
        let n = values.len() as u32;
        r.add_extra_integers(n);
        for (i, &v) in values.iter().enumerate() {
            r.set_extra_integer(i as u32, v);
        }
        r.add_extra_integers(n + more);
        prop_assert_eq!(r.n_extra_integers(), n + more);
        for (i, &v) in values.iter().enumerate() {
            prop_assert_eq!(r.get_extra_integer(i as u32), v);
        }
        for i in n..n + more {
            prop_assert_eq!(r.get_extra_integer(i), INVALID_ID);
        }
    }

    #[test]
    fn shrink_then_grow_restores_count_only(
        layout in arb_layout(),
        extra_systems in 1u32..4,
        extras in prop::collection::vec(0 as DofIdType..100, 0..4),
    ) {
        let mut r = build(&layout, &extras, 0);
        let k = r.n_systems();
        r.set_n_systems(k + extra_systems);
        for s in k..k + extra_systems {
            r.set_vars_per_group(s, &[1, 2]);
        }
        r.set_n_systems(k);
        prop_assert_eq!(r.n_systems(), k);
        r.set_n_systems(k + extra_systems);
        for s in k..k + extra_systems {
            prop_assert_eq!(r.n_vars(s), 0);
        }
        prop_assert_eq!(r.extra_integers(), extras.as_slice());
    }

    #[test]
    fn snapshot_round_trip(
        layout in arb_layout(),
        extras in prop::collection::vec(0 as DofIdType..100, 0..6),
        first in 0 as DofIdType..50,
    ) {
        let src = build(&layout, &extras, first);
        let mut dst = DofRecord::new();
        dst.replace_all(&src.snapshot()).unwrap();

        prop_assert_eq!(dst.n_systems(), src.n_systems());
        for s in 0..src.n_systems() {
            prop_assert_eq!(dst.n_vars(s), src.n_vars(s));
            for v in 0..src.n_vars(s) {
                for c in 0..src.n_comp_for_var(s, v) {
                    prop_assert_eq!(dst.dof_number(s, v, c), src.dof_number(s, v, c));
                }
            }
        }
        prop_assert_eq!(dst.extra_integers(), src.extra_integers());
    }

    #[test]
    fn pack_round_trip_with_snapshot(
        layout in arb_layout(),
        extras in prop::collection::vec(0 as DofIdType..100, 0..3),
    ) {
        let mut src = build(&layout, &extras, 3);
        src.set_old_dofs();
        src.invalidate_all_dofs();

        let mut stream = Vec::new();
        src.pack_indexing(&mut stream);
        prop_assert_eq!(stream.len(), src.packed_indexing_size());

        let mut dst = DofRecord::new();
        prop_assert_eq!(dst.unpack_indexing(&stream), Ok(stream.len()));
        prop_assert_eq!(dst.snapshot(), src.snapshot());
        prop_assert_eq!(
            dst.old_dofs().map(DofRecord::snapshot),
            src.old_dofs().map(DofRecord::snapshot)
        );
    }
}
