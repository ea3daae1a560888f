//! Capability trait for mesh entities that carry a dof record.

use meshdof_core::{DofIdType, EntityId, ProcessorId};

use crate::record::DofRecord;

/// A mesh entity (node, element, ...) that owns a [`DofRecord`].
///
/// Entities compose a record rather than extend it. Implementors provide the
/// two accessors; the remaining methods delegate to the record so that mesh
/// code can number and query entities without reaching through them.
pub trait HasDofRecord {
    /// Borrow the entity's record.
    fn dof_record(&self) -> &DofRecord;

    /// Mutably borrow the entity's record.
    fn dof_record_mut(&mut self) -> &mut DofRecord;

    /// The entity id.
    fn id(&self) -> EntityId {
        self.dof_record().id()
    }

    /// The owning processor.
    fn processor_id(&self) -> ProcessorId {
        self.dof_record().processor_id()
    }

    /// Number of systems with slots on this entity.
    fn n_systems(&self) -> u32 {
        self.dof_record().n_systems()
    }

    /// Number of dofs of system `s` on this entity.
    fn n_dofs(&self, s: u32) -> u64 {
        self.dof_record().n_dofs(s)
    }

    /// Global dof id of `(s, v, c)`; see [`DofRecord::dof_number`].
    fn dof_number(&self, s: u32, v: u32, c: u32) -> DofIdType {
        self.dof_record().dof_number(s, v, c)
    }

    /// Whether system `s` has dofs on this entity.
    fn has_dofs(&self, s: u32) -> bool {
        self.dof_record().has_dofs(s)
    }

    /// Value of extra integer `i`.
    fn get_extra_integer(&self, i: u32) -> DofIdType {
        self.dof_record().get_extra_integer(i)
    }

    /// Overwrite extra integer `i`.
    fn set_extra_integer(&mut self, i: u32, value: DofIdType) {
        self.dof_record_mut().set_extra_integer(i, value);
    }
}

impl HasDofRecord for DofRecord {
    fn dof_record(&self) -> &DofRecord {
        self
    }

    fn dof_record_mut(&mut self) -> &mut DofRecord {
        self
    }
}
