//! meshdof: compact per-entity degree-of-freedom indexing for finite-element
//! meshes.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the meshdof sub-crates. For most users, adding `meshdof` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use meshdof::prelude::*;
//!
//! let mut reg = ExtraIntegerRegistry::new();
//! let code = reg.add_integer("elemset_code", 0);
//!
//! let mut node = DofRecord::with_identity(EntityId(7), ProcessorId(0));
//! node.set_n_systems(1);
//! node.set_vars_per_group(0, &[1]);
//! node.set_component_count(0, 0, 3);
//! node.set_group_dof_base(0, 0, 30);
//! reg.apply(&mut node);
//!
//! assert_eq!(node.dof_number(0, 0, 2), 32);
//! assert_eq!(node.get_extra_integer(code), 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `meshdof-core` | Index widths, sentinels, ids, `DofError` |
//! | [`store`] | `meshdof-store` | `DofRecord`, packed layout, extra-integer registry |
//!
//! # Features
//!
//! - `wide-dof-ids`: 64-bit dof ids and extra-integer slots instead of 32-bit.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Index widths, sentinels, ids and errors (`meshdof-core`).
pub use meshdof_core as types;

/// Per-entity dof records and their packed storage (`meshdof-store`).
///
/// [`store::DofRecord`] is the main entry point; mesh entity types expose
/// theirs through [`store::HasDofRecord`].
pub use meshdof_store as store;

/// Common imports for typical meshdof usage.
///
/// ```rust
/// use meshdof::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use meshdof_core::{
        DofError, DofIdType, EntityId, IndexKind, ProcessorId, UniqueId, INVALID_ID,
    };

    // Records
    pub use meshdof_store::{slots_for, DofRecord, ExtraIntegerRegistry, HasDofRecord};
}
