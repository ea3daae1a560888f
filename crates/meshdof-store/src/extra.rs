//! Extra integer channel.
//!
//! Auxiliary per-entity integers (element-set codes, refinement flags,
//! arbitrary fixed-size values) stored after the variable groups. The
//! section is located through a header word, so redefining systems never
//! moves an extra integer's index and growing extras never moves a dof.
//!
//! Wider values are overlaid on consecutive slots by byte copy. A value
//! that does not fill its last slot leaves the remaining bytes of that slot
//! as they were.

use bytemuck::Pod;
use meshdof_core::{DofError, DofIdType, IndexKind, SLOT_BYTES};

use crate::layout::{self, EXTRA_FLAG};
use crate::record::DofRecord;

/// Number of extra-integer slots a value of type `T` occupies.
pub const fn slots_for<T>() -> usize {
    std::mem::size_of::<T>().div_ceil(SLOT_BYTES)
}

/// Read a `T` from the leading bytes of `words`.
pub(crate) fn read_datum<T: Pod>(words: &[DofIdType]) -> T {
    let bytes: &[u8] = bytemuck::cast_slice(words);
    bytemuck::pod_read_unaligned(&bytes[..std::mem::size_of::<T>()])
}

/// Write `value` over the leading bytes of `words`.
pub(crate) fn write_datum<T: Pod>(words: &mut [DofIdType], value: T) {
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(words);
    bytes[..std::mem::size_of::<T>()].copy_from_slice(bytemuck::bytes_of(&value));
}

impl DofRecord {
    /// Number of extra-integer slots.
    pub fn n_extra_integers(&self) -> u32 {
        let buf = self.buf.as_slice();
        if layout::has_extra(buf) {
            (buf.len() - layout::extra_start(buf)) as u32
        } else {
            0
        }
    }

    /// Whether at least one extra-integer slot exists.
    pub fn has_extra_integers(&self) -> bool {
        self.n_extra_integers() > 0
    }

    /// Grow the extra section to at least `n` slots.
    ///
    /// New slots read as the sentinel. Requesting no more slots than exist
    /// is a no-op; the section never shrinks.
    pub fn add_extra_integers(&mut self, n: u32) {
        self.add_extra_integers_with_defaults(n, &[]);
    }

    /// Grow the extra section to at least `n` slots, seeding new slot `i`
    /// with `defaults[i]` when present.
    ///
    /// Existing slots keep their values.
    pub fn add_extra_integers_with_defaults(&mut self, n: u32, defaults: &[DofIdType]) {
        let old = self.n_extra_integers();
        if n <= old {
            return;
        }

        if !layout::has_extra(self.buf.as_slice()) {
            if self.buf.is_empty() {
                // Zero systems still take a header word; the offset follows it.
                self.buf.replace_all(&[EXTRA_FLAG, 2]);
            } else {
                let ns = layout::n_systems(self.buf.as_slice());
                let at = ns.max(1);
                self.buf.insert_fill(at, 1, 0);
                for s in 1..ns {
                    let w = self.buf.word(s);
                    self.buf.set_word(s, w + 1);
                }
                let end = self.buf.len() as DofIdType;
                self.buf.set_word(at, end);
                let hdr = self.buf.word(0);
                self.buf.set_word(0, hdr | EXTRA_FLAG);
            }
        }

        let start = layout::extra_start(self.buf.as_slice());
        self.buf.resize(start + n as usize);
        for i in old as usize..n as usize {
            if let Some(&v) = defaults.get(i) {
                self.buf.set_word(start + i, v);
            }
        }
    }

    /// Borrow every extra-integer slot.
    pub fn extra_integers(&self) -> &[DofIdType] {
        let buf = self.buf.as_slice();
        if layout::has_extra(buf) {
            &buf[layout::extra_start(buf)..]
        } else {
            &[]
        }
    }

    /// Value of extra integer `i`, or the sentinel if never written.
    #[inline]
    pub fn get_extra_integer(&self, i: u32) -> DofIdType {
        self.debug_check_extra(i, 1);
        self.extra_integers()[i as usize]
    }

    /// Checked [`DofRecord::get_extra_integer`].
    pub fn try_get_extra_integer(&self, i: u32) -> Result<DofIdType, DofError> {
        let extras = self.extra_integers();
        extras.get(i as usize).copied().ok_or(DofError::out_of_range(
            IndexKind::ExtraInteger,
            i as usize,
            extras.len(),
        ))
    }

    /// Overwrite extra integer `i`.
    #[inline]
    pub fn set_extra_integer(&mut self, i: u32, value: DofIdType) {
        self.debug_check_extra(i, 1);
        let start = layout::extra_start(self.buf.as_slice());
        self.buf.set_word(start + i as usize, value);
    }

    /// Read a `T` overlaid on the slots starting at `i`.
    ///
    /// The value spans [`slots_for::<T>()`](slots_for) slots, all of which
    /// must exist.
    pub fn get_extra_datum<T: Pod>(&self, i: u32) -> T {
        self.debug_check_extra(i, slots_for::<T>());
        let start = i as usize;
        read_datum(&self.extra_integers()[start..start + slots_for::<T>()])
    }

    /// Overlay `value` on the slots starting at `i`.
    pub fn set_extra_datum<T: Pod>(&mut self, i: u32, value: T) {
        self.debug_check_extra(i, slots_for::<T>());
        let start = layout::extra_start(self.buf.as_slice()) + i as usize;
        write_datum(self.buf.words_mut(start, slots_for::<T>()), value);
    }

    #[inline]
    fn debug_check_extra(&self, i: u32, width: usize) {
        debug_assert!(
            i as usize + width <= self.n_extra_integers() as usize,
            "extra integer {i} (width {width}) out of range ({} slots)",
            self.n_extra_integers()
        );
    }
}
