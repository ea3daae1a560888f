//! Named extra-integer slots with per-slot defaults.
//!
//! The mesh owns one [`ExtraIntegerRegistry`] and registers every auxiliary
//! field it attaches to entities (element-set codes, material tags, stored
//! floating-point values). Each name maps to a fixed slot range, so every
//! record extended through [`ExtraIntegerRegistry::apply`] agrees on where a
//! field lives. Iteration follows registration order.

use bytemuck::Pod;
use indexmap::IndexMap;
use meshdof_core::{DofIdType, INVALID_ID};

use crate::extra::{slots_for, write_datum};
use crate::record::DofRecord;

/// Location of one registered field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtraSlot {
    /// First extra-integer index of the field.
    pub index: u32,
    /// Number of consecutive slots it occupies.
    pub slots: u32,
}

/// Maps field names to extra-integer slots.
#[derive(Clone, Debug, Default)]
pub struct ExtraIntegerRegistry {
    fields: IndexMap<String, ExtraSlot>,
    defaults: Vec<DofIdType>,
}

impl ExtraIntegerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a one-slot integer field, returning its index.
    ///
    /// Registering a name twice returns the existing index and keeps the
    /// first default.
    pub fn add_integer(&mut self, name: &str, default: DofIdType) -> u32 {
        if let Some(slot) = self.fields.get(name) {
            return slot.index;
        }
        self.reserve(name, &[default])
    }

    /// Register a field holding a `T`, returning its first index.
    ///
    /// The field spans [`slots_for::<T>()`](slots_for) slots whose default
    /// bytes are `default`. Registering a name twice returns the existing
    /// index.
    pub fn add_datum<T: Pod>(&mut self, name: &str, default: T) -> u32 {
        if let Some(slot) = self.fields.get(name) {
            return slot.index;
        }
        let mut words = vec![INVALID_ID; slots_for::<T>()];
        write_datum(&mut words, default);
        self.reserve(name, &words)
    }

    fn reserve(&mut self, name: &str, words: &[DofIdType]) -> u32 {
        let index = self.defaults.len() as u32;
        self.defaults.extend_from_slice(words);
        self.fields.insert(
            name.to_owned(),
            ExtraSlot {
                index,
                slots: words.len() as u32,
            },
        );
        tracing::debug!(name, index, slots = words.len(), "registered extra integer field");
        index
    }

    /// First index of field `name`, if registered.
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.fields.get(name).map(|slot| slot.index)
    }

    /// Slot range of field `name`, if registered.
    pub fn slot(&self, name: &str) -> Option<ExtraSlot> {
        self.fields.get(name).copied()
    }

    /// Total slots reserved by every field.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Whether no field is registered.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Default value of every reserved slot, by index.
    pub fn defaults(&self) -> &[DofIdType] {
        &self.defaults
    }

    /// Registered fields in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ExtraSlot)> {
        self.fields.iter().map(|(name, slot)| (name.as_str(), *slot))
    }

    /// Grow `record` to hold every registered slot.
    ///
    /// Slots the record lacked take their registered default; slots it
    /// already had keep their values.
    pub fn apply(&self, record: &mut DofRecord) {
        record.add_extra_integers_with_defaults(self.defaults.len() as u32, &self.defaults);
    }
}
