//! Dof indexing from before the most recent renumbering.
//!
//! Solution transfer after refinement or repartitioning projects values
//! from the old numbering onto the new one, so a record can keep one
//! read-only copy of its previous packed buffer.

use crate::record::DofRecord;

impl DofRecord {
    /// Store a copy of the current indexing as the old snapshot.
    ///
    /// Replaces any earlier snapshot. Snapshots never nest: the copy carries
    /// no snapshot of its own.
    pub fn set_old_dofs(&mut self) {
        let old = DofRecord {
            id: self.id,
            processor_id: self.processor_id,
            unique_id: self.unique_id,
            buf: self.buf.clone(),
            old: None,
        };
        self.old = Some(Box::new(old));
    }

    /// The old snapshot, if one is stored.
    pub fn old_dofs(&self) -> Option<&DofRecord> {
        self.old.as_deref()
    }

    /// Whether an old snapshot is stored.
    pub fn has_old_dofs(&self) -> bool {
        self.old.is_some()
    }

    /// Drop the old snapshot.
    pub fn clear_old_dofs(&mut self) {
        self.old = None;
    }
}
