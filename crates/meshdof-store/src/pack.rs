//! Flat stream encoding of a record's dof indexing.
//!
//! Used when entities migrate between partitions. Several records can be
//! appended to one stream and read back in order.
//!
//! ```text
//! len, has_old, buffer[len], (old_len, old_buffer[old_len])?
//! ```
//!
//! Identity is not part of the stream; the receiving mesh re-attaches it.

use meshdof_core::{DofError, DofIdType};

use crate::layout;
use crate::record::DofRecord;

// ── Cursor ──────────────────────────────────────────────────────

/// Sequential reader over an indexing stream.
struct Cursor<'a> {
    stream: &'a [DofIdType],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(stream: &'a [DofIdType]) -> Self {
        Self { stream, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [DofIdType], DofError> {
        let available = self.stream.len() - self.pos;
        if n > available {
            return Err(DofError::Truncated {
                needed: self.pos.saturating_add(n),
                available: self.stream.len(),
            });
        }
        let words = &self.stream[self.pos..self.pos + n];
        self.pos += n;
        Ok(words)
    }

    fn word(&mut self) -> Result<DofIdType, DofError> {
        Ok(self.take(1)?[0])
    }

    /// A length-prefixed packed buffer, validated.
    fn buffer(&mut self) -> Result<&'a [DofIdType], DofError> {
        let len = self.word()? as usize;
        let words = self.take(len)?;
        layout::validate(words)?;
        Ok(words)
    }
}

// ── Record entry points ─────────────────────────────────────────

impl DofRecord {
    /// Number of stream words [`DofRecord::pack_indexing`] appends.
    pub fn packed_indexing_size(&self) -> usize {
        2 + self.buf.len() + self.old.as_ref().map_or(0, |o| 1 + o.buf.len())
    }

    /// Append this record's indexing, and its old snapshot if any, to `out`.
    pub fn pack_indexing(&self, out: &mut Vec<DofIdType>) {
        out.reserve(self.packed_indexing_size());
        out.push(self.buf.len() as DofIdType);
        out.push(DofIdType::from(self.old.is_some()));
        out.extend_from_slice(self.buf.as_slice());
        if let Some(old) = &self.old {
            out.push(old.buf.len() as DofIdType);
            out.extend_from_slice(old.buf.as_slice());
        }
    }

    /// Load indexing from the front of `stream`, returning the number of
    /// words consumed.
    ///
    /// The current buffer and old snapshot are replaced together. On error
    /// the record is left untouched.
    pub fn unpack_indexing(&mut self, stream: &[DofIdType]) -> Result<usize, DofError> {
        let mut cur = Cursor::new(stream);
        let len = cur.word()? as usize;
        let has_old = match cur.word()? {
            0 => false,
            1 => true,
            other => {
                return Err(DofError::MalformedBuffer {
                    detail: format!("old-snapshot flag must be 0 or 1, found {other}"),
                })
            }
        };
        let words = cur.take(len)?;
        layout::validate(words)?;
        let old = if has_old { Some(cur.buffer()?) } else { None };

        tracing::trace!(
            id = %self.id,
            words = cur.pos,
            has_old,
            "unpacking dof indexing"
        );
        self.buf.replace_all(words);
        self.old = old.map(|raw| {
            let mut snapshot = DofRecord {
                id: self.id,
                processor_id: self.processor_id,
                unique_id: self.unique_id,
                ..DofRecord::new()
            };
            snapshot.buf.replace_all(raw);
            Box::new(snapshot)
        });
        Ok(cur.pos)
    }
}
