//! Error types for the meshdof store.
//!
//! Out-of-range indices are caller bugs: the hot-path accessors only check
//! them with debug assertions, while the `try_*` entry points and the raw
//! buffer accessors report them as [`DofError::InvalidArgument`]. Reading an
//! unassigned slot is not an error; it yields the sentinel.

use std::error::Error;
use std::fmt;

/// Which index of a dof record an [`DofError::InvalidArgument`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// A system slot index.
    System,
    /// A variable-group index within a system.
    Group,
    /// A flat variable index within a system.
    Variable,
    /// A component index within a variable.
    Component,
    /// An extra-integer slot index.
    ExtraInteger,
    /// A raw offset into the packed buffer.
    Offset,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::System => "system",
            Self::Group => "variable group",
            Self::Variable => "variable",
            Self::Component => "component",
            Self::ExtraInteger => "extra integer",
            Self::Offset => "buffer offset",
        };
        f.write_str(name)
    }
}

/// Errors reported by dof record operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DofError {
    /// An index lies outside its currently-defined range.
    InvalidArgument {
        /// What kind of index was out of range.
        kind: IndexKind,
        /// The offending index.
        index: usize,
        /// The exclusive upper bound that was in effect.
        bound: usize,
    },
    /// A raw buffer handed to a bulk load is not a well-formed packed record.
    MalformedBuffer {
        /// Human-readable description of the inconsistency.
        detail: String,
    },
    /// A packed indexing stream ended before the record it describes.
    Truncated {
        /// Number of words the record needs.
        needed: usize,
        /// Number of words left in the stream.
        available: usize,
    },
}

impl DofError {
    /// Shorthand for an [`DofError::InvalidArgument`].
    pub fn out_of_range(kind: IndexKind, index: usize, bound: usize) -> Self {
        Self::InvalidArgument { kind, index, bound }
    }
}

impl fmt::Display for DofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { kind, index, bound } => {
                write!(f, "{kind} index {index} out of range (bound {bound})")
            }
            Self::MalformedBuffer { detail } => write!(f, "malformed dof buffer: {detail}"),
            Self::Truncated { needed, available } => {
                write!(
                    f,
                    "truncated indexing stream: need {needed} words, {available} available"
                )
            }
        }
    }
}

impl Error for DofError {}
