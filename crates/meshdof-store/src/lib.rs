//! Packed per-entity degree-of-freedom records.
//!
//! Every node and element of a finite-element mesh carries one
//! [`DofRecord`]: its identity, which of the mesh's systems have variables
//! on it, how those variables are grouped, the global dof number of every
//! component, and a run of auxiliary extra integers. All of it lives in one
//! contiguous [`PackedBuffer`] so that millions of records stay cheap.
//!
//! ```
//! use meshdof_store::DofRecord;
//!
//! let mut r = DofRecord::new();
//! r.set_n_systems(1);
//! r.set_vars_per_group(0, &[2, 3]);
//! r.set_component_count(0, 0, 1);
//! r.set_component_count(0, 1, 3);
//! r.set_group_dof_base(0, 0, 0);
//! r.set_group_dof_base(0, 1, 120);
//! assert_eq!(r.dof_number(0, 4, 2), 128);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod directory;
pub mod extra;
pub mod layout;
pub mod old;
pub mod pack;
pub mod record;
pub mod registry;
pub mod traits;

pub use buffer::PackedBuffer;
pub use extra::slots_for;
pub use record::DofRecord;
pub use registry::{ExtraIntegerRegistry, ExtraSlot};
pub use traits::HasDofRecord;
