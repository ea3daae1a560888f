//! Reusable dof record fixtures.
//!
//! - [`SystemLayout`] / [`instrument`]: declare groups and component counts
//!   for a record in one call.
//! - [`two_system_record`]: two systems of groups `[2, 3]` with hand-set
//!   bases (the worked dof arithmetic example).
//! - [`LEGACY_BUFFER`] / [`LEGACY_BUFFER_SHIFTED`]: packed buffers in the
//!   historical layout, for bulk-load regressions.

use meshdof_core::DofIdType;
use meshdof_store::DofRecord;

/// Groups of one system as `(n_vars, n_comp)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemLayout {
    pub groups: Vec<(u32, u32)>,
}

impl SystemLayout {
    pub fn new(groups: &[(u32, u32)]) -> Self {
        Self {
            groups: groups.to_vec(),
        }
    }

    /// Variable count of every group.
    pub fn sizes(&self) -> Vec<u32> {
        self.groups.iter().map(|&(nv, _)| nv).collect()
    }
}

/// Size `record` for `layout`: one system per entry, its groups and their
/// component counts. Bases are left unassigned.
pub fn instrument(record: &mut DofRecord, layout: &[SystemLayout]) {
    record.set_n_systems(layout.len() as u32);
    for (s, sys) in layout.iter().enumerate() {
        let s = s as u32;
        record.set_vars_per_group(s, &sys.sizes());
        for (g, &(_, nc)) in sys.groups.iter().enumerate() {
            record.set_component_count(s, g as u32, nc);
        }
    }
}

/// Two systems of groups `[2, 3]`.
///
/// | system | group | n_comp | base |
/// |--------|-------|--------|------|
/// | 0      | 0     | 1      | 0    |
/// | 0      | 1     | 3      | 120  |
/// | 1      | 0     | 2      | 20   |
/// | 1      | 1     | 1      | 220  |
pub fn two_system_record() -> DofRecord {
    let mut r = DofRecord::new();
    instrument(
        &mut r,
        &[
            SystemLayout::new(&[(2, 1), (3, 3)]),
            SystemLayout::new(&[(2, 2), (3, 1)]),
        ],
    );
    r.set_group_dof_base(0, 0, 0);
    r.set_group_dof_base(0, 1, 120);
    r.set_group_dof_base(1, 0, 20);
    r.set_group_dof_base(1, 1, 220);
    r
}

/// Two systems; the first has three one-variable one-component groups with
/// bases 0, 96 and 192, the second one such group with base 0.
pub const LEGACY_BUFFER: [DofIdType; 10] = [2, 8, 257, 0, 257, 96, 257, 192, 257, 0];

/// [`LEGACY_BUFFER`] with every base shifted by one.
pub const LEGACY_BUFFER_SHIFTED: [DofIdType; 10] = [2, 8, 257, 1, 257, 97, 257, 193, 257, 1];

/// A record with `n_extra` extra integers holding `0, 1, 2, ...`.
pub fn record_with_extras(n_extra: u32) -> DofRecord {
    let mut r = DofRecord::new();
    r.add_extra_integers(n_extra);
    for i in 0..n_extra {
        r.set_extra_integer(i, i as DofIdType);
    }
    r
}
