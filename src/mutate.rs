//! Mutation engine: update-or-insert, blind append, value writes and sub-map extraction.
//!
//! Every mutation encodes into a scratch buffer first and then applies one splice, so a failure
//! at any step leaves the bytes as they were.

use alloc::vec::Vec;

use crate::alloc_util::{try_extend, try_vec_from_slice};
use crate::codec::{encode_int, encode_text, encode_uint, BREAK, MAJOR_MAP, MAP_OPEN};
use crate::walk::{map_body, value_end};
use crate::{CborError, Document, ErrorCode, ValueWriter};

impl Document {
    /// Set `key` to `value`, replacing an existing value or appending a new entry.
    ///
    /// An empty document is first framed as an indefinite-length map. An existing value is
    /// replaced in place; the entries after it shift but keep their order and content.
    ///
    /// ```
    /// use cbor_doc::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.assign_key("1", 0x23u64)?;
    /// doc.assign_key("2", 0x7392u64)?;
    /// doc.assign_key("1", 0x1234u64)?;
    /// assert_eq!(
    ///     doc.as_bytes(),
    ///     b"\xbf\x61\x31\x19\x12\x34\x61\x32\x19\x73\x92\xff"
    /// );
    /// # Ok::<(), cbor_doc::CborError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the latched error if the document has already failed, `UnsupportedOperation` if it
    /// is neither empty nor an indefinite-length map, `InsufficientSpace` if it cannot grow, or a
    /// decode error for malformed entries. Errors are latched.
    pub fn assign_key<W: ValueWriter>(&mut self, key: &str, value: W) -> Result<(), CborError> {
        self.ensure_writable()?;
        let res = self.assign_inner(key, &value);
        self.record(res)
    }

    /// Append `key` with `value` without searching for an existing entry.
    ///
    /// Use this when the key is known to be absent, such as during bulk construction.
    ///
    /// # Errors
    ///
    /// Same as [`Document::assign_key`].
    pub fn append_key<W: ValueWriter>(&mut self, key: &str, value: W) -> Result<(), CborError> {
        self.ensure_writable()?;
        let res = encode_value(&value).and_then(|bytes| self.append_encoded(key, &bytes));
        self.record(res)
    }

    /// Insert `value` at the cursor and advance the cursor past it.
    ///
    /// # Errors
    ///
    /// Returns the latched error if the document has already failed, or `InsufficientSpace`.
    /// Errors are latched.
    pub fn write<W: ValueWriter>(&mut self, value: W) -> Result<(), CborError> {
        self.ensure_writable()?;
        let res = encode_value(&value).and_then(|bytes| self.splice_raw(self.cursor, 0, &bytes));
        self.record(res)
    }

    /// Insert an unsigned integer at the cursor.
    ///
    /// # Errors
    ///
    /// See [`Document::write`].
    pub fn write_uint(&mut self, v: u64) -> Result<(), CborError> {
        self.write_with(|out| encode_uint(out, v))
    }

    /// Insert a signed integer at the cursor.
    ///
    /// # Errors
    ///
    /// See [`Document::write`].
    pub fn write_int(&mut self, v: i64) -> Result<(), CborError> {
        self.write_with(|out| encode_int(out, v))
    }

    /// Insert a text string at the cursor.
    ///
    /// # Errors
    ///
    /// See [`Document::write`].
    pub fn write_text(&mut self, s: &str) -> Result<(), CborError> {
        self.write_with(|out| encode_text(out, s))
    }

    /// Insert the raw bytes of `other` at the cursor, embedding it as a nested value.
    ///
    /// # Errors
    ///
    /// See [`Document::write`].
    pub fn write_map(&mut self, other: &Self) -> Result<(), CborError> {
        self.write(other)
    }

    /// Copy the map at the cursor into a new, independent document.
    ///
    /// The child's cursor is `0` and its map-end is the span length. It inherits this
    /// document's limits. The cursor of this document does not move.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the value is not a map, `InsufficientSpace` if the copy cannot
    /// be allocated, or a decode error for a malformed map. Errors are latched on this document.
    pub fn read_map(&mut self) -> Result<Self, CborError> {
        let res = self.read_map_inner();
        self.record(res)
    }

    /// Append every entry of the map `other` before this document's break marker.
    ///
    /// Entries are copied verbatim; keys already present are not replaced. An empty `other` is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` if either document holds something other than a map, plus
    /// the errors of [`Document::append_key`]. Errors are latched on this document.
    pub fn append_entries(&mut self, other: &Self) -> Result<(), CborError> {
        self.ensure_writable()?;
        let res = self.append_entries_inner(other);
        self.record(res)
    }

    fn write_with<F>(&mut self, f: F) -> Result<(), CborError>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), CborError>,
    {
        self.ensure_writable()?;
        let mut bytes = Vec::new();
        let res = f(&mut bytes).and_then(|()| self.splice_raw(self.cursor, 0, &bytes));
        self.record(res)
    }

    fn assign_inner(&mut self, key: &str, value: &dyn ValueWriter) -> Result<(), CborError> {
        let bytes = encode_value(value)?;
        if !self.buf.is_empty() {
            if self.buf[0] != MAP_OPEN {
                return Err(CborError::new(ErrorCode::UnsupportedOperation, 0));
            }
            if self.find_key_inner(key)? {
                let start = self.cursor;
                let end = value_end(&self.buf, start, self.limits.max_depth)?;
                return self.splice_raw(start, end - start, &bytes);
            }
        }
        self.append_encoded(key, &bytes)
    }

    /// Appends `key` followed by pre-encoded value bytes.
    fn append_encoded(&mut self, key: &str, value: &[u8]) -> Result<(), CborError> {
        let mut entry = Vec::new();
        encode_text(&mut entry, key)?;
        try_extend(&mut entry, value)?;
        self.insert_entries(&entry)
    }

    /// Inserts encoded entries before the break marker, framing an empty document first.
    fn insert_entries(&mut self, entries: &[u8]) -> Result<(), CborError> {
        if self.buf.is_empty() {
            return self.frame_with_entries(entries);
        }
        if self.buf[0] != MAP_OPEN {
            return Err(CborError::new(ErrorCode::UnsupportedOperation, 0));
        }
        let at = self
            .map_end
            .checked_sub(1)
            .filter(|&at| self.buf[at] == BREAK)
            .ok_or_else(|| CborError::new(ErrorCode::MissingBreak, self.map_end))?;
        self.splice_raw(at, 0, entries)
    }

    fn frame_with_entries(&mut self, entries: &[u8]) -> Result<(), CborError> {
        let mut framed = Vec::new();
        try_extend(&mut framed, &[MAP_OPEN])?;
        try_extend(&mut framed, entries)?;
        try_extend(&mut framed, &[BREAK])?;
        self.splice_raw(0, 0, &framed)?;
        self.map_end = self.buf.len();
        Ok(())
    }

    fn read_map_inner(&self) -> Result<Self, CborError> {
        let start = self.cursor;
        match self.buf.get(start) {
            Some(&b) if b >> 5 == MAJOR_MAP => {}
            Some(_) => return Err(CborError::new(ErrorCode::TypeMismatch, start)),
            None => return Err(CborError::new(ErrorCode::UnexpectedEof, start)),
        }
        let end = value_end(&self.buf, start, self.limits.max_depth)?;
        let buf = try_vec_from_slice(&self.buf[start..end], start)?;
        Ok(Self {
            map_end: buf.len(),
            buf,
            cursor: 0,
            error: None,
            limits: self.limits,
        })
    }

    fn append_entries_inner(&mut self, other: &Self) -> Result<(), CborError> {
        if other.buf.is_empty() {
            return Ok(());
        }
        let depth = other.limits.max_depth;
        let (body, len) = map_body(&other.buf, 0)
            .map_err(|_| CborError::new(ErrorCode::UnsupportedOperation, 0))?;
        let end = value_end(&other.buf, 0, depth)?;
        // Indefinite maps end with a break marker that is not part of the entries.
        let body_end = if len.is_some() { end } else { end - 1 };
        if body == body_end {
            return Ok(());
        }
        self.insert_entries(&other.buf[body..body_end])
    }
}

fn encode_value(value: &dyn ValueWriter) -> Result<Vec<u8>, CborError> {
    let mut bytes = Vec::new();
    value.encode_into(&mut bytes)?;
    Ok(bytes)
}
