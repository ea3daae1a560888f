//! Variable-group directory and dof arithmetic.
//!
//! Each system of a [`DofRecord`] holds an ordered list of variable groups.
//! A group is `(n_vars, n_comp, dof_base)`, where `dof_base` is the dof id of
//! its first variable's first component. A flat variable index `v` resolves
//! to `(group, var_in_group)` by prefix-summing group sizes, and
//!
//! ```text
//! dof_number(s, v, c) = dof_base(s, g) + var_in_group * n_comp(s, g) + c
//! ```
//!
//! Systems and groups are stored in place in the packed buffer. Growing or
//! redefining one system splices only that system's descriptors and shifts
//! the header offsets behind it, so the dof numbers of every other system
//! and every extra integer are untouched.
//!
//! Out-of-range indices are caller bugs, checked with `debug_assert!`. Use
//! [`DofRecord::try_dof_number`] where a checked lookup is wanted.

use meshdof_core::{DofError, DofIdType, IndexKind, INVALID_ID};
use smallvec::SmallVec;

use crate::layout::{self, EXTRA_FLAG, MAX_COMPONENTS, MAX_VARS_PER_GROUP, WORDS_PER_GROUP};
use crate::record::DofRecord;

impl DofRecord {
    // ── Systems ─────────────────────────────────────────────────

    /// Number of systems this entity carries slots for.
    #[inline]
    pub fn n_systems(&self) -> u32 {
        layout::n_systems(self.buf.as_slice()) as u32
    }

    /// Grow or shrink to exactly `n` systems.
    ///
    /// Growing appends systems with no variable groups. Shrinking drops the
    /// trailing systems and their groups; growing back does not restore them.
    /// Extra integers are preserved either way.
    pub fn set_n_systems(&mut self, n: u32) {
        assert!(
            (n as DofIdType) < EXTRA_FLAG,
            "system count {n} does not fit the header word"
        );
        let n = n as usize;
        let old = layout::n_systems(self.buf.as_slice());
        if n == old {
            return;
        }
        let extra = layout::has_extra(self.buf.as_slice());

        if n == 0 && !extra {
            tracing::debug!(id = %self.id, from = old, "dropping all systems");
            self.buf.clear();
            return;
        }

        if self.buf.is_empty() {
            // Header only: every system starts right after it.
            self.buf.resize(n);
            for s in 0..n {
                self.buf.set_word(s, n as DofIdType);
            }
            return;
        }

        let old_hlen = layout::header_len_for(old, extra);
        let new_hlen = layout::header_len_for(n, extra);

        if n > old {
            let grow = new_hlen - old_hlen;
            let groups_end = layout::extra_start(self.buf.as_slice()) + grow;
            // The new start words sit where the old header ended; the new
            // systems are empty and all begin at the end of the groups.
            self.buf
                .insert_fill(old.max(1), grow, groups_end as DofIdType);
            for s in 1..old {
                let w = self.buf.word(s);
                self.buf.set_word(s, w + grow as DofIdType);
            }
            if extra {
                self.buf.set_word(n.max(1), groups_end as DofIdType);
            }
        } else {
            let buf = self.buf.as_slice();
            let cut_start = layout::system_start(buf, n);
            let cut_len = layout::extra_start(buf) - cut_start;
            let shrink = old_hlen - new_hlen;
            tracing::debug!(
                id = %self.id,
                from = old,
                to = n,
                dropped_words = cut_len,
                "truncating systems"
            );
            self.buf.drain_words(cut_start, cut_len);
            self.buf.drain_words(n.max(1), shrink);
            for s in 1..n {
                let w = self.buf.word(s);
                self.buf.set_word(s, w - shrink as DofIdType);
            }
            if extra {
                self.buf
                    .set_word(n.max(1), (cut_start - shrink) as DofIdType);
            }
        }

        let flag = if extra { EXTRA_FLAG } else { 0 };
        self.buf.set_word(0, n as DofIdType | flag);
    }

    /// Append one system with no variable groups.
    pub fn add_system(&mut self) {
        self.set_n_systems(self.n_systems() + 1);
    }

    // ── Groups ──────────────────────────────────────────────────

    /// Number of variable groups in system `s`.
    pub fn n_var_groups(&self, s: u32) -> u32 {
        self.debug_check_system(s);
        let buf = self.buf.as_slice();
        let s = s as usize;
        ((layout::system_end(buf, s) - layout::system_start(buf, s)) / WORDS_PER_GROUP) as u32
    }

    /// Alias of [`DofRecord::n_var_groups`].
    pub fn n_groups(&self, s: u32) -> u32 {
        self.n_var_groups(s)
    }

    /// Number of variables in group `g` of system `s`.
    pub fn n_vars_in_group(&self, s: u32, g: u32) -> u32 {
        layout::ncv_vars(self.buf.word(self.group_word(s, g)))
    }

    /// Total number of variables in system `s`, over all groups.
    pub fn n_vars(&self, s: u32) -> u32 {
        self.group_words(s)
            .chunks_exact(WORDS_PER_GROUP)
            .map(|d| layout::ncv_vars(d[0]))
            .sum()
    }

    /// Variable counts of every group in system `s`, in group order.
    pub fn vars_per_group(&self, s: u32) -> SmallVec<[u32; 4]> {
        self.group_words(s)
            .chunks_exact(WORDS_PER_GROUP)
            .map(|d| layout::ncv_vars(d[0]))
            .collect()
    }

    /// (Re)define the variable groups of system `s`.
    ///
    /// `group_sizes[g]` is the variable count of group `g`. A group that keeps
    /// its position and variable count keeps its component count and dof
    /// base. A group whose variable count changes keeps its component count
    /// but loses its base. New groups start with zero components and no base.
    /// Groups beyond the new list are discarded.
    ///
    /// The total variable count must fit in `u32`, since flat variable
    /// indices are `u32`.
    pub fn set_vars_per_group(&mut self, s: u32, group_sizes: &[u32]) {
        self.debug_check_system(s);
        let su = s as usize;
        let buf = self.buf.as_slice();
        let start = layout::system_start(buf, su);
        let end = layout::system_end(buf, su);
        let old_len = end - start;
        let old = &buf[start..end];
        let old_ng = old_len / WORDS_PER_GROUP;

        let unchanged = old_ng == group_sizes.len()
            && old
                .chunks_exact(WORDS_PER_GROUP)
                .zip(group_sizes)
                .all(|(d, &nv)| layout::ncv_vars(d[0]) == nv);
        if unchanged {
            return;
        }

        let total: u64 = group_sizes.iter().map(|&nv| u64::from(nv)).sum();
        assert!(
            total <= u64::from(u32::MAX),
            "system {s} would hold {total} variables, more than a u32 index can address"
        );

        let mut words: SmallVec<[DofIdType; 8]> =
            SmallVec::with_capacity(group_sizes.len() * WORDS_PER_GROUP);
        for (g, &nv) in group_sizes.iter().enumerate() {
            assert!(
                nv <= MAX_VARS_PER_GROUP,
                "group {g} of system {s} has {nv} variables, limit is {MAX_VARS_PER_GROUP}"
            );
            if g < old_ng {
                let ncv = old[g * WORDS_PER_GROUP];
                let base = if layout::ncv_vars(ncv) == nv {
                    old[g * WORDS_PER_GROUP + 1]
                } else {
                    INVALID_ID
                };
                words.push(layout::pack_ncv(nv, layout::ncv_comp(ncv)));
                words.push(base);
            } else {
                words.push(layout::pack_ncv(nv, 0));
                words.push(INVALID_ID);
            }
        }

        if words.len() < old_len {
            tracing::trace!(
                id = %self.id,
                system = s,
                from = old_ng,
                to = group_sizes.len(),
                "truncating variable groups"
            );
        }
        let new_len = words.len();
        self.buf.splice_words(start, old_len, &words);
        self.shift_offsets_after(su, old_len, new_len);
    }

    /// Number of components of group `g` of system `s`.
    pub fn n_comp(&self, s: u32, g: u32) -> u32 {
        layout::ncv_comp(self.buf.word(self.group_word(s, g)))
    }

    /// Number of components of the group holding flat variable `v`.
    pub fn n_comp_for_var(&self, s: u32, v: u32) -> u32 {
        let g = self.var_to_group(s, v);
        self.n_comp(s, g)
    }

    /// Set the component count of group `g` of system `s`.
    ///
    /// Changing the count invalidates the group's dof base, since its old
    /// numbering no longer describes the group. Setting the current count is
    /// a no-op.
    pub fn set_component_count(&mut self, s: u32, g: u32, ncomp: u32) {
        assert!(
            ncomp <= MAX_COMPONENTS,
            "{ncomp} components exceed the per-group limit of {MAX_COMPONENTS}"
        );
        let idx = self.group_word(s, g);
        let ncv = self.buf.word(idx);
        if layout::ncv_comp(ncv) == ncomp {
            return;
        }
        self.buf
            .set_word(idx, layout::pack_ncv(layout::ncv_vars(ncv), ncomp));
        self.buf.set_word(idx + 1, INVALID_ID);
    }

    /// Set the component count of the group holding flat variable `v`.
    ///
    /// Every variable of that group is affected.
    pub fn set_var_component_count(&mut self, s: u32, v: u32, ncomp: u32) {
        let g = self.var_to_group(s, v);
        self.set_component_count(s, g, ncomp);
    }

    /// Set the dof id of `(var_in_group = 0, component = 0)` of group `g`.
    ///
    /// No check is made that bases of different groups or systems do not
    /// overlap; that is the numbering pass's contract.
    pub fn set_group_dof_base(&mut self, s: u32, g: u32, base: DofIdType) {
        let idx = self.group_word(s, g);
        self.buf.set_word(idx + 1, base);
    }

    /// The dof base of group `g` of system `s`, or the sentinel if unassigned.
    pub fn group_dof_base(&self, s: u32, g: u32) -> DofIdType {
        self.buf.word(self.group_word(s, g) + 1)
    }

    /// Checked [`DofRecord::group_dof_base`].
    pub fn try_group_dof_base(&self, s: u32, g: u32) -> Result<DofIdType, DofError> {
        let ns = self.n_systems();
        if s >= ns {
            return Err(DofError::out_of_range(IndexKind::System, s as usize, ns as usize));
        }
        let ng = self.n_var_groups(s);
        if g >= ng {
            return Err(DofError::out_of_range(IndexKind::Group, g as usize, ng as usize));
        }
        Ok(self.group_dof_base(s, g))
    }

    // ── Variable lookup ─────────────────────────────────────────

    /// Group holding flat variable `v` of system `s`.
    pub fn var_to_group(&self, s: u32, v: u32) -> u32 {
        self.var_to_group_and_offset(s, v).0
    }

    /// Group holding flat variable `v`, and `v`'s position inside it.
    pub fn var_to_group_and_offset(&self, s: u32, v: u32) -> (u32, u32) {
        self.debug_check_system(s);
        let found = self.locate(s, v);
        debug_assert!(
            found.is_some(),
            "variable {v} out of range ({} variables in system {s})",
            self.n_vars(s)
        );
        match found {
            Some((_, g, vig)) => (g, vig),
            None => (self.n_var_groups(s), 0),
        }
    }

    /// Position of flat variable `v` inside group `g`.
    pub fn system_var_to_group_var(&self, s: u32, g: u32, v: u32) -> u32 {
        let (found, vig) = self.var_to_group_and_offset(s, v);
        debug_assert_eq!(found, g, "variable {v} of system {s} is not in group {g}");
        vig
    }

    // ── Dof numbers ─────────────────────────────────────────────

    /// Global dof id of component `c` of flat variable `v` in system `s`.
    ///
    /// Returns the sentinel when the group's base has not been assigned.
    /// Indices are only checked in debug builds.
    #[inline]
    pub fn dof_number(&self, s: u32, v: u32, c: u32) -> DofIdType {
        self.debug_check_system(s);
        let found = self.locate(s, v);
        debug_assert!(
            found.is_some(),
            "variable {v} out of range ({} variables in system {s})",
            self.n_vars(s)
        );
        let Some((idx, _, vig)) = found else {
            return INVALID_ID;
        };
        let ncomp = layout::ncv_comp(self.buf.word(idx));
        debug_assert!(
            c < ncomp,
            "component {c} out of range ({ncomp} components for variable {v} of system {s})"
        );
        let base = self.buf.word(idx + 1);
        if base == INVALID_ID {
            return INVALID_ID;
        }
        base + vig as DofIdType * ncomp as DofIdType + c as DofIdType
    }

    /// Checked [`DofRecord::dof_number`].
    pub fn try_dof_number(&self, s: u32, v: u32, c: u32) -> Result<DofIdType, DofError> {
        let ns = self.n_systems();
        if s >= ns {
            return Err(DofError::out_of_range(IndexKind::System, s as usize, ns as usize));
        }
        let (idx, _, _) = self.locate(s, v).ok_or_else(|| {
            DofError::out_of_range(IndexKind::Variable, v as usize, self.n_vars(s) as usize)
        })?;
        let ncomp = layout::ncv_comp(self.buf.word(idx));
        if c >= ncomp {
            return Err(DofError::out_of_range(
                IndexKind::Component,
                c as usize,
                ncomp as usize,
            ));
        }
        Ok(self.dof_number(s, v, c))
    }

    /// Record `dn` as the dof id of `(s, v, c)`.
    ///
    /// Only the first component of a group's first variable is stored; it
    /// becomes the group's base. For any other `(v, c)` the id is implied by
    /// the base, and debug builds check that `dn` agrees with it.
    pub fn set_dof_number(&mut self, s: u32, v: u32, c: u32, dn: DofIdType) {
        self.debug_check_system(s);
        let found = self.locate(s, v);
        debug_assert!(
            found.is_some(),
            "variable {v} out of range ({} variables in system {s})",
            self.n_vars(s)
        );
        let Some((idx, _, vig)) = found else {
            return;
        };
        debug_assert!(
            c < layout::ncv_comp(self.buf.word(idx)),
            "component {c} out of range for variable {v} of system {s}"
        );
        if vig == 0 && c == 0 {
            self.buf.set_word(idx + 1, dn);
        } else {
            debug_assert!(
                dn == INVALID_ID || dn == self.dof_number(s, v, c),
                "dof {dn} for ({s}, {v}, {c}) disagrees with the group base"
            );
        }
    }

    /// Number of dofs of system `s` on this entity.
    ///
    /// Wider than the variable count: a full group of 255-component
    /// variables does not fit in `u32`.
    pub fn n_dofs(&self, s: u32) -> u64 {
        self.group_words(s)
            .chunks_exact(WORDS_PER_GROUP)
            .map(|d| u64::from(layout::ncv_vars(d[0])) * u64::from(layout::ncv_comp(d[0])))
            .sum()
    }

    /// Number of dofs of flat variable `v` of system `s` on this entity.
    pub fn n_dofs_for_var(&self, s: u32, v: u32) -> u32 {
        self.n_comp_for_var(s, v)
    }

    /// Total number of dofs over every system.
    pub fn n_dofs_total(&self) -> u64 {
        (0..self.n_systems()).map(|s| self.n_dofs(s)).sum()
    }

    /// Whether system `s` has at least one dof on this entity.
    pub fn has_dofs(&self, s: u32) -> bool {
        self.group_words(s)
            .chunks_exact(WORDS_PER_GROUP)
            .any(|d| layout::ncv_vars(d[0]) > 0 && layout::ncv_comp(d[0]) > 0)
    }

    /// Whether any system has at least one dof on this entity.
    pub fn has_any_dofs(&self) -> bool {
        (0..self.n_systems()).any(|s| self.has_dofs(s))
    }

    /// Reset every group base of system `s` to the sentinel.
    ///
    /// Group structure and component counts are kept.
    pub fn invalidate_dofs(&mut self, s: u32) {
        self.debug_check_system(s);
        let buf = self.buf.as_slice();
        let su = s as usize;
        let start = layout::system_start(buf, su);
        let end = layout::system_end(buf, su);
        for idx in (start..end).step_by(WORDS_PER_GROUP) {
            self.buf.set_word(idx + 1, INVALID_ID);
        }
    }

    /// Reset every group base of every system to the sentinel.
    pub fn invalidate_all_dofs(&mut self) {
        for s in 0..self.n_systems() {
            self.invalidate_dofs(s);
        }
    }

    /// Drop every system. Extra integers and identity are kept.
    pub fn clear_dofs(&mut self) {
        self.set_n_systems(0);
    }

    // ── Internals ───────────────────────────────────────────────

    #[inline]
    fn debug_check_system(&self, s: u32) {
        debug_assert!(
            s < self.n_systems(),
            "system {s} out of range ({} systems)",
            self.n_systems()
        );
    }

    /// Offset of the descriptor word of group `g` of system `s`.
    #[inline]
    fn group_word(&self, s: u32, g: u32) -> usize {
        self.debug_check_system(s);
        debug_assert!(
            g < self.n_var_groups(s),
            "group {g} out of range ({} groups in system {s})",
            self.n_var_groups(s)
        );
        layout::system_start(self.buf.as_slice(), s as usize) + g as usize * WORDS_PER_GROUP
    }

    /// Descriptor words of every group of system `s`.
    #[inline]
    fn group_words(&self, s: u32) -> &[DofIdType] {
        self.debug_check_system(s);
        let buf = self.buf.as_slice();
        let s = s as usize;
        let start = layout::system_start(buf, s);
        self.buf.words(start, layout::system_end(buf, s) - start)
    }

    /// Descriptor offset, group index and in-group position of variable `v`.
    #[inline]
    fn locate(&self, s: u32, v: u32) -> Option<(usize, u32, u32)> {
        let buf = self.buf.as_slice();
        let su = s as usize;
        let start = layout::system_start(buf, su);
        let end = layout::system_end(buf, su);
        let mut first = 0u32;
        let mut g = 0u32;
        let mut idx = start;
        while idx < end {
            let nv = layout::ncv_vars(buf[idx]);
            if v - first < nv {
                return Some((idx, g, v - first));
            }
            first += nv;
            g += 1;
            idx += WORDS_PER_GROUP;
        }
        None
    }

    /// Move the start offsets of systems after `s`, and of the extra
    /// section, after system `s` changed from `old_len` to `new_len` words.
    fn shift_offsets_after(&mut self, s: usize, old_len: usize, new_len: usize) {
        if old_len == new_len {
            return;
        }
        let ns = layout::n_systems(self.buf.as_slice());
        let shift = |w: DofIdType| (w as usize + new_len - old_len) as DofIdType;
        for t in s + 1..ns {
            let w = self.buf.word(t);
            self.buf.set_word(t, shift(w));
        }
        if layout::has_extra(self.buf.as_slice()) {
            let ew = layout::extra_word(self.buf.as_slice());
            let w = self.buf.word(ew);
            self.buf.set_word(ew, shift(w));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario with two systems of groups `[2, 3]` and explicit bases.
    fn manual_record() -> DofRecord {
        let mut r = DofRecord::new();
        r.set_n_systems(2);
        r.set_vars_per_group(0, &[2, 3]);
        r.set_vars_per_group(1, &[2, 3]);
        r.set_component_count(0, 0, 1);
        r.set_component_count(0, 1, 3);
        r.set_component_count(1, 0, 2);
        r.set_component_count(1, 1, 1);
        r.set_group_dof_base(0, 0, 0);
        r.set_group_dof_base(0, 1, 120);
        r.set_group_dof_base(1, 0, 20);
        r.set_group_dof_base(1, 1, 220);
        r
    }

    #[test]
    fn set_n_systems_on_fresh_record() {
        let mut r = DofRecord::new();
        r.set_n_systems(10);
        assert_eq!(r.n_systems(), 10);
        for s in 0..10 {
            assert_eq!(r.n_var_groups(s), 0);
            assert_eq!(r.n_vars(s), 0);
        }
    }

    #[test]
    fn set_n_systems_zero_clears_buffer() {
        let mut r = DofRecord::new();
        r.set_n_systems(3);
        r.set_n_systems(0);
        assert_eq!(r.n_systems(), 0);
        assert!(r.packed().is_empty());
    }

    #[test]
    fn add_system_appends_empty_system() {
        let mut r = DofRecord::new();
        r.add_system();
        r.set_vars_per_group(0, &[1]);
        r.add_system();
        assert_eq!(r.n_systems(), 2);
        assert_eq!(r.n_vars(0), 1);
        assert_eq!(r.n_vars(1), 0);
    }

    #[test]
    fn manual_dof_calculation() {
        let r = manual_record();
        assert_eq!(r.dof_number(0, 0, 0), 0);
        assert_eq!(r.dof_number(0, 1, 0), r.group_dof_base(0, 0) + 1);
        assert_eq!(r.dof_number(0, 4, 2), r.group_dof_base(0, 1) + 2 * 3 + 2);
        assert_eq!(r.dof_number(0, 4, 2), 128);
        assert_eq!(r.dof_number(1, 2, 0), 220);
        assert_eq!(r.dof_number(1, 1, 1), 20 + 2 + 1);
    }

    #[test]
    fn group_accessors() {
        let r = manual_record();
        assert_eq!(r.n_var_groups(0), 2);
        assert_eq!(r.n_groups(1), 2);
        assert_eq!(r.n_vars_in_group(0, 1), 3);
        assert_eq!(r.n_comp(1, 0), 2);
        assert_eq!(r.n_comp_for_var(0, 3), 3);
        assert_eq!(r.var_to_group(0, 1), 0);
        assert_eq!(r.var_to_group(0, 2), 1);
        assert_eq!(r.var_to_group_and_offset(1, 4), (1, 2));
        assert_eq!(r.system_var_to_group_var(0, 1, 3), 1);
        assert_eq!(r.vars_per_group(0).as_slice(), &[2, 3]);
    }

    #[test]
    fn unassigned_base_reads_sentinel() {
        let mut r = DofRecord::new();
        r.set_n_systems(1);
        r.set_vars_per_group(0, &[2]);
        r.set_component_count(0, 0, 1);
        assert_eq!(r.dof_number(0, 1, 0), INVALID_ID);
    }

    #[test]
    fn n_dofs_counts_vars_times_components() {
        let r = manual_record();
        assert_eq!(r.n_dofs(0), 2 + 9);
        assert_eq!(r.n_dofs(1), 4 + 3);
        assert_eq!(r.n_dofs_total(), 18);
        assert_eq!(r.n_dofs_for_var(0, 4), 3);
        assert!(r.has_dofs(0));
        assert!(r.has_any_dofs());
    }

    #[test]
    fn n_dofs_does_not_overflow_on_full_groups() {
        let nv = MAX_VARS_PER_GROUP.min(u32::MAX / 2);
        let mut r = DofRecord::new();
        r.set_n_systems(2);
        r.set_vars_per_group(0, &[nv, nv]);
        r.set_component_count(0, 0, MAX_COMPONENTS);
        r.set_component_count(0, 1, MAX_COMPONENTS);
        r.set_vars_per_group(1, &[1]);
        r.set_component_count(1, 0, 1);
        let per_system = 2 * u64::from(nv) * u64::from(MAX_COMPONENTS);
        assert_eq!(r.n_dofs(0), per_system);
        assert_eq!(r.n_dofs_total(), per_system + 1);
        assert_eq!(r.n_vars(0), 2 * nv);
    }

    #[test]
    #[should_panic(expected = "more than a u32 index can address")]
    fn variable_total_must_fit_u32() {
        let groups = (u32::MAX / MAX_VARS_PER_GROUP) as usize + 1;
        let mut r = DofRecord::new();
        r.set_n_systems(1);
        r.set_vars_per_group(0, &vec![MAX_VARS_PER_GROUP; groups]);
    }

    #[test]
    fn groups_without_components_have_no_dofs() {
        let mut r = DofRecord::new();
        r.set_n_systems(2);
        r.set_vars_per_group(0, &[4]);
        assert!(!r.has_dofs(0));
        assert!(!r.has_any_dofs());
        assert_eq!(r.n_dofs(0), 0);
    }

    #[test]
    fn growing_one_system_preserves_others() {
        let mut r = manual_record();
        r.add_extra_integers(2);
        r.set_extra_integer(0, 77);
        r.set_vars_per_group(0, &[2, 3, 4]);
        assert_eq!(r.dof_number(0, 4, 2), 128);
        assert_eq!(r.dof_number(1, 2, 0), 220);
        assert_eq!(r.dof_number(1, 1, 1), 23);
        assert_eq!(r.get_extra_integer(0), 77);
        assert_eq!(r.n_var_groups(0), 3);
        assert_eq!(r.n_comp(0, 2), 0);
        assert_eq!(r.group_dof_base(0, 2), INVALID_ID);
    }

    #[test]
    fn redefining_group_sizes_resets_changed_bases() {
        let mut r = manual_record();
        r.set_vars_per_group(0, &[2, 5]);
        assert_eq!(r.group_dof_base(0, 0), 0);
        assert_eq!(r.group_dof_base(0, 1), INVALID_ID);
        assert_eq!(r.n_comp(0, 1), 3);
        assert_eq!(r.n_vars(0), 7);
    }

    #[test]
    fn identical_group_list_is_noop() {
        let mut r = manual_record();
        let before = r.snapshot();
        r.set_vars_per_group(1, &[2, 3]);
        assert_eq!(r.snapshot(), before);
    }

    #[test]
    fn shorter_group_list_truncates() {
        let mut r = manual_record();
        r.set_vars_per_group(0, &[2]);
        assert_eq!(r.n_var_groups(0), 1);
        assert_eq!(r.n_vars(0), 2);
        assert_eq!(r.dof_number(0, 1, 0), 1);
        assert_eq!(r.dof_number(1, 4, 0), 222);
    }

    #[test]
    fn changing_component_count_invalidates_base() {
        let mut r = manual_record();
        r.set_component_count(0, 1, 3);
        assert_eq!(r.group_dof_base(0, 1), 120);
        r.set_component_count(0, 1, 2);
        assert_eq!(r.group_dof_base(0, 1), INVALID_ID);
        assert_eq!(r.n_comp(0, 1), 2);
        assert_eq!(r.group_dof_base(0, 0), 0);
    }

    #[test]
    fn set_var_component_count_targets_owning_group() {
        let mut r = manual_record();
        r.set_var_component_count(1, 3, 4);
        assert_eq!(r.n_comp(1, 1), 4);
        assert_eq!(r.n_comp(1, 0), 2);
    }

    #[test]
    fn set_dof_number_sets_base_from_first_component() {
        let mut r = DofRecord::new();
        r.set_n_systems(1);
        r.set_vars_per_group(0, &[3]);
        r.set_component_count(0, 0, 2);
        r.set_dof_number(0, 0, 0, 40);
        assert_eq!(r.dof_number(0, 2, 1), 45);
        // Consistent non-leading ids are accepted and change nothing.
        r.set_dof_number(0, 1, 1, 43);
        assert_eq!(r.group_dof_base(0, 0), 40);
    }

    #[test]
    fn invalidate_dofs_keeps_structure() {
        let mut r = manual_record();
        r.invalidate_dofs(1);
        assert_eq!(r.dof_number(1, 0, 0), INVALID_ID);
        assert_eq!(r.n_vars(1), 5);
        assert_eq!(r.n_comp(1, 0), 2);
        assert_eq!(r.dof_number(0, 4, 2), 128);
        r.invalidate_all_dofs();
        assert_eq!(r.dof_number(0, 0, 0), INVALID_ID);
    }

    #[test]
    fn clear_dofs_keeps_extras() {
        let mut r = manual_record();
        r.add_extra_integers(1);
        r.set_extra_integer(0, 5);
        r.clear_dofs();
        assert_eq!(r.n_systems(), 0);
        assert_eq!(r.get_extra_integer(0), 5);
    }

    #[test]
    fn shrink_then_grow_does_not_restore_groups() {
        let mut r = manual_record();
        r.set_n_systems(1);
        r.set_n_systems(2);
        assert_eq!(r.n_systems(), 2);
        assert_eq!(r.n_vars(1), 0);
        assert_eq!(r.dof_number(0, 4, 2), 128);
    }

    #[test]
    fn try_dof_number_reports_each_index_kind() {
        let r = manual_record();
        assert_eq!(r.try_dof_number(0, 4, 2), Ok(128));
        assert_eq!(
            r.try_dof_number(2, 0, 0),
            Err(DofError::out_of_range(IndexKind::System, 2, 2))
        );
        assert_eq!(
            r.try_dof_number(0, 5, 0),
            Err(DofError::out_of_range(IndexKind::Variable, 5, 5))
        );
        assert_eq!(
            r.try_dof_number(1, 0, 2),
            Err(DofError::out_of_range(IndexKind::Component, 2, 2))
        );
    }

    #[test]
    fn try_group_dof_base_checks_system_and_group() {
        let r = manual_record();
        assert_eq!(r.try_group_dof_base(1, 1), Ok(220));
        assert_eq!(
            r.try_group_dof_base(0, 2),
            Err(DofError::out_of_range(IndexKind::Group, 2, 2))
        );
        assert_eq!(
            r.try_group_dof_base(3, 0),
            Err(DofError::out_of_range(IndexKind::System, 3, 2))
        );
    }

    #[test]
    fn legacy_bulk_load() {
        let mut r = DofRecord::new();
        r.replace_all(&[2, 8, 257, 0, 257, 96, 257, 192, 257, 0])
            .unwrap();
        assert_eq!(r.dof_number(0, 0, 0), 0);
        assert_eq!(r.dof_number(0, 1, 0), 96);
        assert_eq!(r.dof_number(0, 2, 0), 192);
        assert_eq!(r.dof_number(1, 0, 0), 0);

        r.replace_all(&[2, 8, 257, 1, 257, 97, 257, 193, 257, 1])
            .unwrap();
        assert_eq!(r.dof_number(0, 0, 0), 1);
        assert_eq!(r.dof_number(0, 1, 0), 97);
        assert_eq!(r.dof_number(0, 2, 0), 193);
        assert_eq!(r.dof_number(1, 0, 0), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "system 2 out of range")]
    fn dof_number_checks_system_in_debug() {
        manual_record().dof_number(2, 0, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "variable 5 out of range")]
    fn dof_number_checks_variable_in_debug() {
        manual_record().dof_number(0, 5, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "component 1 out of range")]
    fn dof_number_checks_component_in_debug() {
        manual_record().dof_number(0, 0, 1);
    }

    #[test]
    #[should_panic(expected = "exceed the per-group limit")]
    fn component_limit_is_enforced() {
        let mut r = manual_record();
        r.set_component_count(0, 0, 256);
    }
}
