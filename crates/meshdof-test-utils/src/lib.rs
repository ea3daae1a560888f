//! Test utilities and mock mesh entities for meshdof development.
//!
//! Provides mock entity types implementing [`HasDofRecord`], a sequential
//! numbering pass standing in for a real dof map, and the shared record
//! fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use meshdof_core::{DofIdType, EntityId, ProcessorId};
use meshdof_store::{DofRecord, HasDofRecord};

/// Mock mesh node: a position plus a dof record.
#[derive(Clone, Debug)]
pub struct MockNode {
    pub point: [f64; 3],
    record: DofRecord,
}

impl MockNode {
    pub fn new(id: DofIdType, point: [f64; 3]) -> Self {
        Self {
            point,
            record: DofRecord::with_identity(EntityId(id), ProcessorId(0)),
        }
    }
}

impl HasDofRecord for MockNode {
    fn dof_record(&self) -> &DofRecord {
        &self.record
    }

    fn dof_record_mut(&mut self) -> &mut DofRecord {
        &mut self.record
    }
}

/// Mock mesh element: node connectivity plus a dof record.
#[derive(Clone, Debug)]
pub struct MockElem {
    pub nodes: Vec<DofIdType>,
    record: DofRecord,
}

impl MockElem {
    pub fn new(id: DofIdType, nodes: Vec<DofIdType>) -> Self {
        Self {
            nodes,
            record: DofRecord::with_identity(EntityId(id), ProcessorId(0)),
        }
    }
}

impl HasDofRecord for MockElem {
    fn dof_record(&self) -> &DofRecord {
        &self.record
    }

    fn dof_record_mut(&mut self) -> &mut DofRecord {
        &mut self.record
    }
}

/// Give every group with dofs a base, system by system, entity by entity.
///
/// Numbering starts at `first`. Returns the next unused dof id.
pub fn number_sequentially<E: HasDofRecord>(entities: &mut [E], first: DofIdType) -> DofIdType {
    let mut next = first;
    let n_systems = entities
        .iter()
        .map(|e| e.dof_record().n_systems())
        .max()
        .unwrap_or(0);
    for s in 0..n_systems {
        for e in entities.iter_mut() {
            let rec = e.dof_record_mut();
            if s >= rec.n_systems() {
                continue;
            }
            for g in 0..rec.n_var_groups(s) {
                let size = rec.n_vars_in_group(s, g) * rec.n_comp(s, g);
                if size == 0 {
                    continue;
                }
                rec.set_group_dof_base(s, g, next);
                next += size as DofIdType;
            }
        }
    }
    next
}
