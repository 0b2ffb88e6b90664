//! Buffer and cursor management: loading, growth, and the single splice primitive every
//! relocation goes through.

use crate::alloc_util::{try_reserve, try_vec_from_slice};
use crate::{CborError, Document, ErrorCode};

impl Document {
    /// Replace the document bytes with a copy of `bytes`.
    ///
    /// The cursor and map-end are left where they are, clamped to the new length. Callers
    /// position them explicitly afterwards.
    ///
    /// # Errors
    ///
    /// Returns the latched error if the document has already failed, or `InsufficientSpace` if
    /// `bytes` exceed `max_bytes` or cannot be allocated. On failure the old bytes are kept.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), CborError> {
        self.ensure_writable()?;
        let res = self.load_inner(bytes);
        self.record(res)
    }

    fn load_inner(&mut self, bytes: &[u8]) -> Result<(), CborError> {
        if bytes.len() > self.limits.max_bytes {
            return Err(CborError::new(ErrorCode::InsufficientSpace, 0));
        }
        if bytes.len() <= self.buf.capacity() {
            self.buf.clear();
            self.buf.extend_from_slice(bytes);
        } else {
            self.buf = try_vec_from_slice(bytes, 0)?;
        }
        let len = self.buf.len();
        self.cursor = self.cursor.min(len);
        self.map_end = self.map_end.min(len);
        Ok(())
    }

    /// Move the cursor to `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the bytes.
    pub fn set_cursor(&mut self, offset: usize) {
        assert!(
            offset <= self.buf.len(),
            "cursor offset {offset} out of bounds (len {})",
            self.buf.len()
        );
        self.cursor = offset;
    }

    /// Move the map-end boundary to `offset`, narrowing or widening what key search can see.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the bytes.
    pub fn set_map_end(&mut self, offset: usize) {
        assert!(
            offset <= self.buf.len(),
            "map end offset {offset} out of bounds (len {})",
            self.buf.len()
        );
        self.map_end = offset;
    }

    /// Make room for `extra` more bytes without changing the content.
    ///
    /// This does not latch its failure; mutating operations built on it do.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientSpace` if the new length would exceed `max_bytes` or the allocation
    /// fails, and `LengthOverflow` if the length computation overflows.
    pub fn ensure_capacity(&mut self, extra: usize) -> Result<(), CborError> {
        let len = self.buf.len();
        let needed = len
            .checked_add(extra)
            .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, len))?;
        if needed > self.limits.max_bytes {
            return Err(CborError::new(ErrorCode::InsufficientSpace, len));
        }
        if needed <= self.buf.capacity() {
            return Ok(());
        }
        let before = self.buf.capacity();
        try_reserve(&mut self.buf, extra, len)?;
        tracing::debug!(
            from = before,
            to = self.buf.capacity(),
            "document buffer grown"
        );
        Ok(())
    }

    /// Replace `remove_len` bytes at `at` with `insert`, shifting everything after.
    ///
    /// The map-end moves by the length delta when it lies past `at` and at or after the replaced
    /// range; an insertion exactly at the map-end leaves it in place. The cursor is left right
    /// after the inserted bytes.
    ///
    /// # Errors
    ///
    /// Returns the latched error if the document has already failed, or the growth error from
    /// [`Document::ensure_capacity`]. On failure nothing changes.
    ///
    /// # Panics
    ///
    /// Panics if `at + remove_len` is past the end of the bytes.
    pub fn splice(&mut self, at: usize, remove_len: usize, insert: &[u8]) -> Result<(), CborError> {
        self.ensure_writable()?;
        let res = self.splice_raw(at, remove_len, insert);
        self.record(res)
    }

    pub(crate) fn splice_raw(
        &mut self,
        at: usize,
        remove_len: usize,
        insert: &[u8],
    ) -> Result<(), CborError> {
        let end = at
            .checked_add(remove_len)
            .filter(|&end| end <= self.buf.len())
            .unwrap_or_else(|| {
                panic!(
                    "splice range {at}+{remove_len} out of bounds (len {})",
                    self.buf.len()
                )
            });
        if insert.len() > remove_len {
            self.ensure_capacity(insert.len() - remove_len)?;
        }
        drop(self.buf.splice(at..end, insert.iter().copied()));

        // Bytes inserted exactly at the map-end lie outside the map.
        if self.map_end > at {
            self.map_end = if self.map_end >= end {
                self.map_end - remove_len + insert.len()
            } else {
                at + insert.len()
            };
        }
        self.cursor = at + insert.len();
        tracing::trace!(at, removed = remove_len, inserted = insert.len(), "splice");
        Ok(())
    }
}
