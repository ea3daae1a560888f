//! Benchmark profiles for the meshdof store.
//!
//! Provides deterministic record populations for benchmarks:
//!
//! - [`lagrange_profile`]: nodal records, one scalar and one vector system
//! - [`mixed_profile`]: records with several groups per system and extras
//! - [`build_records`]: instrument and number any layout

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use meshdof_store::DofRecord;
use meshdof_test_utils::fixtures::{instrument, SystemLayout};
use meshdof_test_utils::number_sequentially;

/// Two systems: a scalar field and a 3-component vector field.
pub fn lagrange_profile() -> Vec<SystemLayout> {
    vec![SystemLayout::new(&[(1, 1)]), SystemLayout::new(&[(1, 3)])]
}

/// Four systems with uneven groups, as seen with mixed element types.
pub fn mixed_profile() -> Vec<SystemLayout> {
    vec![
        SystemLayout::new(&[(2, 1), (3, 3)]),
        SystemLayout::new(&[(1, 2)]),
        SystemLayout::new(&[(4, 1), (1, 1), (2, 2)]),
        SystemLayout::new(&[(1, 1)]),
    ]
}

/// Build `count` records with `layout`, numbered sequentially from 0, each
/// with `n_extra` extra integers.
pub fn build_records(count: usize, layout: &[SystemLayout], n_extra: u32) -> Vec<DofRecord> {
    let mut records = vec![DofRecord::new(); count];
    for r in &mut records {
        instrument(r, layout);
        r.add_extra_integers(n_extra);
    }
    number_sequentially(&mut records, 0);
    records
}
