//! The per-entity dof record: identity plus one packed buffer.
//!
//! [`DofRecord`] is the facade the mesh attaches to every node and element.
//! Its variable-group directory lives in [`crate::directory`], the extra
//! integer channel in [`crate::extra`], and migration support in
//! [`crate::pack`]; all of them operate on the same [`PackedBuffer`].

use std::fmt;

use meshdof_core::{
    DofError, DofIdType, EntityId, ProcessorId, ProcessorIdType, UniqueId, INVALID_ID,
};

use crate::buffer::PackedBuffer;
use crate::layout;

/// Degree-of-freedom indexing and auxiliary integers for one mesh entity.
///
/// A fresh record has no systems, no extra integers and invalid identity,
/// and allocates nothing. Identity fields are independent of the packed
/// buffer: resizing systems or extras never touches them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DofRecord {
    pub(crate) id: EntityId,
    pub(crate) processor_id: ProcessorId,
    pub(crate) unique_id: UniqueId,
    pub(crate) buf: PackedBuffer,
    /// Indexing before the most recent renumbering, kept for projection.
    pub(crate) old: Option<Box<DofRecord>>,
}

impl DofRecord {
    /// Create a fresh record.
    pub fn new() -> Self {
        Self {
            id: EntityId::INVALID,
            processor_id: ProcessorId::INVALID,
            unique_id: UniqueId::INVALID,
            buf: PackedBuffer::new(),
            old: None,
        }
    }

    /// Create a fresh record with the given id and owner.
    pub fn with_identity(id: EntityId, processor_id: ProcessorId) -> Self {
        Self {
            id,
            processor_id,
            ..Self::new()
        }
    }

    // ── Identity ────────────────────────────────────────────────

    /// The entity id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Set the entity id.
    pub fn set_id(&mut self, id: impl Into<EntityId>) {
        self.id = id.into();
    }

    /// Whether the entity id is assigned.
    pub fn valid_id(&self) -> bool {
        self.id.is_valid()
    }

    /// Reset the entity id to the sentinel.
    pub fn invalidate_id(&mut self) {
        self.id = EntityId::INVALID;
    }

    /// The owning processor.
    pub fn processor_id(&self) -> ProcessorId {
        self.processor_id
    }

    /// Set the owning processor.
    pub fn set_processor_id(&mut self, pid: impl Into<ProcessorId>) {
        self.processor_id = pid.into();
    }

    /// Whether the owning processor is assigned.
    pub fn valid_processor_id(&self) -> bool {
        self.processor_id.is_valid()
    }

    /// Reset the owning processor to the sentinel.
    pub fn invalidate_processor_id(&mut self) {
        self.processor_id = ProcessorId::INVALID;
    }

    /// Whether this copy is owned by processor `rank` rather than a ghost.
    pub fn is_owned_by(&self, rank: ProcessorIdType) -> bool {
        self.processor_id == ProcessorId(rank)
    }

    /// The mesh-wide unique id.
    pub fn unique_id(&self) -> UniqueId {
        self.unique_id
    }

    /// Set the mesh-wide unique id.
    pub fn set_unique_id(&mut self, uid: impl Into<UniqueId>) {
        self.unique_id = uid.into();
    }

    /// Whether the unique id is assigned.
    pub fn valid_unique_id(&self) -> bool {
        self.unique_id.is_valid()
    }

    /// Reset every identity field to its sentinel.
    pub fn invalidate(&mut self) {
        self.invalidate_id();
        self.invalidate_processor_id();
        self.unique_id = UniqueId::INVALID;
    }

    // ── Bulk access ─────────────────────────────────────────────

    /// Copy the whole packed buffer out.
    ///
    /// Together with [`DofRecord::replace_all`] this moves a record's dof
    /// indexing between processes or renumbers it in place. Identity and
    /// the old-dof snapshot are not included.
    pub fn snapshot(&self) -> Vec<DofIdType> {
        self.buf.snapshot()
    }

    /// Borrow the packed buffer.
    pub fn packed(&self) -> &[DofIdType] {
        self.buf.as_slice()
    }

    /// Replace the packed buffer with `raw`.
    ///
    /// `raw` must be a well-formed packed record (see [`crate::layout`]);
    /// otherwise [`DofError::MalformedBuffer`] is returned and the record is
    /// left untouched.
    pub fn replace_all(&mut self, raw: &[DofIdType]) -> Result<(), DofError> {
        layout::validate(raw)?;
        tracing::trace!(
            id = %self.id,
            words = raw.len(),
            "loading packed dof buffer"
        );
        self.buf.replace_all(raw);
        Ok(())
    }

    /// Memory held by the packed buffers (current and old), in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.buf.memory_bytes() + self.old.as_ref().map_or(0, |o| o.buf.memory_bytes())
    }
}

impl Default for DofRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DofRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DofRecord(id={}, pid={}, systems={}",
            self.id,
            self.processor_id,
            self.n_systems()
        )?;
        for s in 0..self.n_systems() {
            write!(f, ", s{s}=[")?;
            for g in 0..self.n_var_groups(s) {
                if g > 0 {
                    write!(f, " ")?;
                }
                let base = self.group_dof_base(s, g);
                write!(
                    f,
                    "{}x{}@",
                    self.n_vars_in_group(s, g),
                    self.n_comp(s, g)
                )?;
                if base == INVALID_ID {
                    write!(f, "-")?;
                } else {
                    write!(f, "{base}")?;
                }
            }
            write!(f, "]")?;
        }
        write!(f, ", extras={})", self.n_extra_integers())
    }
}
