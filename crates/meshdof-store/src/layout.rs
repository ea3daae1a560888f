//! Packed layout of a dof record.
//!
//! ```text
//! [0]                 n_systems, top bit set when an extra section exists
//! [1 .. n_systems)    start offset of systems 1..n_systems (system 0
//!                     starts right after the header)
//! [max(n_systems,1)]  start offset of the extra section (only with extras)
//! ...                 per system, 2 words per variable group:
//!                       n_vars * NCV_MAGIC + n_comp, dof_base
//! ...                 extra integers
//! ```
//!
//! An empty buffer is a record with no systems and no extra integers.
//! Without extras the layout matches the historical one, e.g.
//! `[2, 8, 257, 0, 257, 96, 257, 192, 257, 0]` is two systems, the first
//! with three one-variable one-component groups.

use meshdof_core::{DofError, DofIdType};

/// Multiplier packing a group's variable count above its component count.
pub const NCV_MAGIC: DofIdType = 256;

/// Largest component count a group can hold.
pub const MAX_COMPONENTS: u32 = (NCV_MAGIC - 1) as u32;

/// Largest variable count a group can hold.
pub const MAX_VARS_PER_GROUP: u32 = {
    let max = DofIdType::MAX / NCV_MAGIC - 1;
    if max > u32::MAX as DofIdType {
        u32::MAX
    } else {
        max as u32
    }
};

/// Header flag marking that an extra-integer section follows the groups.
pub const EXTRA_FLAG: DofIdType = 1 << (DofIdType::BITS - 1);

/// Slots used by one variable-group descriptor.
pub const WORDS_PER_GROUP: usize = 2;

#[inline]
pub(crate) fn n_systems(buf: &[DofIdType]) -> usize {
    match buf.first() {
        Some(&hdr) => (hdr & !EXTRA_FLAG) as usize,
        None => 0,
    }
}

#[inline]
pub(crate) fn has_extra(buf: &[DofIdType]) -> bool {
    matches!(buf.first(), Some(&hdr) if hdr & EXTRA_FLAG != 0)
}

/// Header length for a record with `ns` systems.
#[inline]
pub(crate) fn header_len_for(ns: usize, extra: bool) -> usize {
    ns.max(1) + usize::from(extra)
}

#[inline]
pub(crate) fn header_len(buf: &[DofIdType]) -> usize {
    if buf.is_empty() {
        0
    } else {
        header_len_for(n_systems(buf), has_extra(buf))
    }
}

/// Index of the header word holding the extra-section offset.
#[inline]
pub(crate) fn extra_word(buf: &[DofIdType]) -> usize {
    n_systems(buf).max(1)
}

/// First slot after the last variable group.
#[inline]
pub(crate) fn extra_start(buf: &[DofIdType]) -> usize {
    if has_extra(buf) {
        buf[extra_word(buf)] as usize
    } else {
        buf.len()
    }
}

#[inline]
pub(crate) fn system_start(buf: &[DofIdType], s: usize) -> usize {
    if s == 0 {
        header_len(buf)
    } else {
        buf[s] as usize
    }
}

#[inline]
pub(crate) fn system_end(buf: &[DofIdType], s: usize) -> usize {
    if s + 1 < n_systems(buf) {
        buf[s + 1] as usize
    } else {
        extra_start(buf)
    }
}

#[inline]
pub(crate) fn pack_ncv(n_vars: u32, n_comp: u32) -> DofIdType {
    n_vars as DofIdType * NCV_MAGIC + n_comp as DofIdType
}

#[inline]
pub(crate) fn ncv_vars(ncv: DofIdType) -> u32 {
    (ncv / NCV_MAGIC) as u32
}

#[inline]
pub(crate) fn ncv_comp(ncv: DofIdType) -> u32 {
    (ncv % NCV_MAGIC) as u32
}

/// Check that `buf` is a self-consistent packed record.
///
/// Offsets must lie inside the buffer, be non-decreasing, and bound whole
/// group descriptors. Group contents (counts, bases) are not checked.
pub fn validate(buf: &[DofIdType]) -> Result<(), DofError> {
    if buf.is_empty() {
        return Ok(());
    }
    let ns = n_systems(buf);
    let extra = has_extra(buf);
    let hlen = header_len_for(ns, extra);
    if buf.len() < hlen {
        return Err(malformed(format!(
            "header of {ns} systems needs {hlen} words, buffer has {}",
            buf.len()
        )));
    }
    if ns == 0 && !extra {
        return Err(malformed(
            "zero systems without extras must be an empty buffer".to_string(),
        ));
    }
    let groups_end = extra_start(buf);
    if groups_end < hlen || groups_end > buf.len() {
        return Err(malformed(format!(
            "extra section offset {groups_end} outside {hlen}..={}",
            buf.len()
        )));
    }
    let mut prev = hlen;
    for s in 0..ns {
        let start = system_start(buf, s);
        let end = system_end(buf, s);
        if start != prev || end < start || end > groups_end {
            return Err(malformed(format!(
                "system {s} spans {start}..{end}, expected to start at {prev} and end by {groups_end}"
            )));
        }
        if (end - start) % WORDS_PER_GROUP != 0 {
            return Err(malformed(format!(
                "system {s} spans {} words, not a whole number of groups",
                end - start
            )));
        }
        prev = end;
    }
    if prev != groups_end {
        return Err(malformed(format!(
            "groups end at {prev}, extra section starts at {groups_end}"
        )));
    }
    Ok(())
}

fn malformed(detail: String) -> DofError {
    DofError::MalformedBuffer { detail }
}
