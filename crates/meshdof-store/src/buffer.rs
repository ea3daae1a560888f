//! Growable run of uniform-width integers backing a dof record.
//!
//! A [`PackedBuffer`] is a `Vec<DofIdType>` with sentinel-filling growth and
//! splice primitives. It knows nothing about the layout stored in it; the
//! header bookkeeping lives in [`crate::layout`].

use meshdof_core::{DofError, DofIdType, IndexKind, INVALID_ID};

/// Contiguous storage for one entity's entire dof metadata.
///
/// Every offset not explicitly written reads as [`INVALID_ID`]. Operations on
/// one range never touch values stored outside it, except that splices shift
/// the offsets of everything after the splice point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedBuffer {
    data: Vec<DofIdType>,
}

impl PackedBuffer {
    /// Create an empty buffer. Allocates nothing.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Number of slots currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no slots.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow every slot.
    pub fn as_slice(&self) -> &[DofIdType] {
        &self.data
    }

    /// Grow or truncate to exactly `new_len` slots.
    ///
    /// Values at offsets below `min(len, new_len)` are preserved; new slots
    /// read as the sentinel.
    pub fn resize(&mut self, new_len: usize) {
        self.data.resize(new_len, INVALID_ID);
    }

    /// Read the slot at `offset`.
    pub fn get(&self, offset: usize) -> Result<DofIdType, DofError> {
        self.data
            .get(offset)
            .copied()
            .ok_or(DofError::out_of_range(IndexKind::Offset, offset, self.data.len()))
    }

    /// Overwrite the slot at `offset`.
    pub fn set(&mut self, offset: usize, value: DofIdType) -> Result<(), DofError> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(offset)
            .ok_or(DofError::out_of_range(IndexKind::Offset, offset, len))?;
        *slot = value;
        Ok(())
    }

    /// Replace the whole content with `raw`.
    pub fn replace_all(&mut self, raw: &[DofIdType]) {
        self.data.clear();
        self.data.extend_from_slice(raw);
    }

    /// Copy the whole content out.
    pub fn snapshot(&self) -> Vec<DofIdType> {
        self.data.clone()
    }

    /// Insert `count` copies of `fill` before offset `at`.
    ///
    /// `at == len()` appends.
    pub fn insert_run(
        &mut self,
        at: usize,
        count: usize,
        fill: DofIdType,
    ) -> Result<(), DofError> {
        if at > self.data.len() {
            return Err(DofError::out_of_range(
                IndexKind::Offset,
                at,
                self.data.len() + 1,
            ));
        }
        self.insert_fill(at, count, fill);
        Ok(())
    }

    /// Remove the `count` slots starting at `at`.
    pub fn remove_run(&mut self, at: usize, count: usize) -> Result<(), DofError> {
        let end = at.saturating_add(count);
        if end > self.data.len() {
            return Err(DofError::out_of_range(IndexKind::Offset, end, self.data.len() + 1));
        }
        self.drain_words(at, count);
        Ok(())
    }

    /// Memory held by the slots, in bytes (excluding spare capacity).
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<DofIdType>()
    }

    // Unchecked-in-release accessors for the layout code. Out-of-range
    // offsets still panic through slice indexing.

    #[inline]
    pub(crate) fn word(&self, offset: usize) -> DofIdType {
        self.data[offset]
    }

    #[inline]
    pub(crate) fn set_word(&mut self, offset: usize, value: DofIdType) {
        self.data[offset] = value;
    }

    #[inline]
    pub(crate) fn words(&self, start: usize, len: usize) -> &[DofIdType] {
        &self.data[start..start + len]
    }

    #[inline]
    pub(crate) fn words_mut(&mut self, start: usize, len: usize) -> &mut [DofIdType] {
        &mut self.data[start..start + len]
    }

    /// Replace `remove` slots at `at` with `replacement`.
    pub(crate) fn splice_words(&mut self, at: usize, remove: usize, replacement: &[DofIdType]) {
        self.data
            .splice(at..at + remove, replacement.iter().copied());
    }

    pub(crate) fn insert_fill(&mut self, at: usize, count: usize, fill: DofIdType) {
        self.data
            .splice(at..at, std::iter::repeat(fill).take(count));
    }

    pub(crate) fn drain_words(&mut self, at: usize, count: usize) {
        self.data.drain(at..at + count);
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }
}
