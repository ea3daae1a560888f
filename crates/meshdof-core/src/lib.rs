//! Core types for the meshdof per-entity degree-of-freedom store.
//!
//! This is the leaf crate with zero internal dependencies. It fixes the
//! integer widths used by the packed record, the reserved "invalid"
//! sentinels, the strongly-typed entity identifiers, and the error type
//! shared by every other crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::{DofError, IndexKind};
pub use id::{
    DofIdType, EntityId, ProcessorId, ProcessorIdType, UniqueId, UniqueIdType, INVALID_ID,
    INVALID_PROCESSOR_ID, INVALID_UNIQUE_ID, SLOT_BYTES,
};
