//! Integer widths, sentinels and strongly-typed identifiers.
//!
//! Every slot of a packed dof record is one [`DofIdType`]. The width is a
//! build-time choice: 32-bit by default, 64-bit with the `wide-dof-ids`
//! feature. Each sentinel is the maximum value of its type, so it can never
//! collide with a legitimate id, count or dof number.

use std::fmt;

/// Width of a dof id, entity id, and of every packed-record slot.
#[cfg(not(feature = "wide-dof-ids"))]
pub type DofIdType = u32;

/// Width of a dof id, entity id, and of every packed-record slot.
#[cfg(feature = "wide-dof-ids")]
pub type DofIdType = u64;

/// Width of a processor (MPI rank) id.
pub type ProcessorIdType = u16;

/// Width of a mesh-wide persistent unique id.
pub type UniqueIdType = u64;

/// Reserved "unassigned" value for dof numbers, entity ids and extra integers.
pub const INVALID_ID: DofIdType = DofIdType::MAX;

/// Reserved "unassigned" value for processor ids.
pub const INVALID_PROCESSOR_ID: ProcessorIdType = ProcessorIdType::MAX;

/// Reserved "unassigned" value for unique ids.
pub const INVALID_UNIQUE_ID: UniqueIdType = UniqueIdType::MAX;

/// Size in bytes of one packed-record slot.
pub const SLOT_BYTES: usize = std::mem::size_of::<DofIdType>();

/// Identifies a mesh entity (node or element) within its mesh.
///
/// Ids are assigned by the mesh, not by the dof store. [`EntityId::INVALID`]
/// marks an entity that has not been numbered yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub DofIdType);

impl EntityId {
    /// The unassigned entity id.
    pub const INVALID: Self = Self(INVALID_ID);

    /// Whether this id is anything other than the sentinel.
    pub fn is_valid(self) -> bool {
        self.0 != INVALID_ID
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "invalid")
        }
    }
}

impl From<DofIdType> for EntityId {
    fn from(v: DofIdType) -> Self {
        Self(v)
    }
}

/// Identifies the processor that owns an entity for write purposes.
///
/// Other processors may hold read-only ghost copies of the same entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessorId(pub ProcessorIdType);

impl ProcessorId {
    /// The unassigned processor id.
    pub const INVALID: Self = Self(INVALID_PROCESSOR_ID);

    /// Whether this id is anything other than the sentinel.
    pub fn is_valid(self) -> bool {
        self.0 != INVALID_PROCESSOR_ID
    }
}

impl Default for ProcessorId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "invalid")
        }
    }
}

impl From<ProcessorIdType> for ProcessorId {
    fn from(v: ProcessorIdType) -> Self {
        Self(v)
    }
}

/// Mesh-wide persistent identifier that survives renumbering.
///
/// Unlike [`EntityId`], a unique id is never reused after its entity is
/// deleted, so it can key restart files and cross-partition lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueId(pub UniqueIdType);

impl UniqueId {
    /// The unassigned unique id.
    pub const INVALID: Self = Self(INVALID_UNIQUE_ID);

    /// Whether this id is anything other than the sentinel.
    pub fn is_valid(self) -> bool {
        self.0 != INVALID_UNIQUE_ID
    }
}

impl Default for UniqueId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "invalid")
        }
    }
}

impl From<UniqueIdType> for UniqueId {
    fn from(v: UniqueIdType) -> Self {
        Self(v)
    }
}
