//! Linear key search bounded by the map-end offset.

use crate::codec::{BREAK, MAJOR_MAP, MAJOR_TEXT, MAP_OPEN};
use crate::stream::CborStream;
use crate::walk::{map_body, value_end};
use crate::{CborError, Document, ErrorCode};

impl Document {
    /// Search the map for `key`, starting from its first entry.
    ///
    /// On a match the cursor is left at the start of the value and `true` is returned. On a miss
    /// the cursor is left where the scan stopped, which is the break marker for a complete map.
    /// An empty document has no keys.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` if the document is not a map, or a decode error if an entry
    /// is malformed. Errors are latched.
    pub fn find_key(&mut self, key: &str) -> Result<bool, CborError> {
        let res = self.find_key_inner(key);
        self.record(res)
    }

    /// Continue searching for `key` from the current cursor, which must sit at a key.
    ///
    /// # Errors
    ///
    /// Returns a decode error if an entry is malformed. Errors are latched.
    pub fn search_for_key(&mut self, key: &str) -> Result<bool, CborError> {
        let res = self.search_inner(key);
        self.record(res)
    }

    /// Returns `true` if the map holds `key`. Moves the cursor like [`Document::find_key`].
    ///
    /// # Errors
    ///
    /// Same as [`Document::find_key`].
    pub fn contains_key(&mut self, key: &str) -> Result<bool, CborError> {
        self.find_key(key)
    }

    pub(crate) fn find_key_inner(&mut self, key: &str) -> Result<bool, CborError> {
        if self.buf.is_empty() {
            self.cursor = 0;
            return Ok(false);
        }
        self.cursor = self.first_entry()?;
        self.search_inner(key)
    }

    /// Offset of the first entry of the root map.
    pub(crate) fn first_entry(&self) -> Result<usize, CborError> {
        match self.buf.first() {
            Some(&MAP_OPEN) => Ok(1),
            Some(&b) if b >> 5 == MAJOR_MAP => map_body(&self.buf, 0).map(|(body, _)| body),
            _ => Err(CborError::new(ErrorCode::UnsupportedOperation, 0)),
        }
    }

    /// Counts the entries a search can see: those of the root map that end within the map-end.
    pub(crate) fn count_entries(&self) -> Result<usize, CborError> {
        let bound = self.scan_bound()?;
        let depth = self.limits.max_depth;
        let mut pos = self.first_entry()?;
        let mut count = 0usize;
        while pos < bound && self.buf[pos] != BREAK {
            let value_start = value_end(&self.buf, pos, depth)?;
            let entry_end = value_end(&self.buf, value_start, depth)?;
            if entry_end > bound {
                break;
            }
            count += 1;
            pos = entry_end;
        }
        Ok(count)
    }

    /// Where an entry scan must stop: the map-end, or the end of a definite root map if that
    /// comes first.
    ///
    /// A malformed entry leaves the map-end as the bound so the scan reports it when it gets
    /// there.
    fn scan_bound(&self) -> Result<usize, CborError> {
        let bound = self.map_end;
        match self.buf.first() {
            Some(&b) if b != MAP_OPEN && b >> 5 == MAJOR_MAP => {}
            _ => return Ok(bound),
        }
        let (mut pos, len) = map_body(&self.buf, 0)?;
        let depth = self.limits.max_depth;
        for _ in 0..len.unwrap_or(0) {
            if pos >= bound {
                return Ok(bound);
            }
            let entry_end = value_end(&self.buf, pos, depth)
                .and_then(|value_start| value_end(&self.buf, value_start, depth));
            match entry_end {
                Ok(end) => pos = end,
                Err(_) => return Ok(bound),
            }
        }
        Ok(pos.min(bound))
    }

    fn search_inner(&mut self, key: &str) -> Result<bool, CborError> {
        let bound = self.scan_bound()?;
        let depth = self.limits.max_depth;
        let mut pos = self.cursor;
        while pos < bound && self.buf[pos] != BREAK {
            let (matched, value_start) = key_at(&self.buf, pos, key, depth)?;
            let entry_end = value_end(&self.buf, value_start, depth)?;
            if entry_end > bound {
                break;
            }
            if matched {
                self.cursor = value_start;
                return Ok(true);
            }
            pos = entry_end;
        }
        self.cursor = pos;
        Ok(false)
    }
}

/// Compares the key at `pos` with `key` and returns the offset of its value.
///
/// Keys that are not definite text strings never match.
fn key_at(data: &[u8], pos: usize, key: &str, depth: usize) -> Result<(bool, usize), CborError> {
    let mut s = CborStream::new(data, pos);
    let head = s.read_head()?;
    if head.major == MAJOR_TEXT {
        if let Some(len) = s.read_len_arg(head)? {
            let bytes = s.read_exact(len)?;
            return Ok((bytes == key.as_bytes(), s.position()));
        }
    }
    Ok((false, value_end(data, pos, depth)?))
}
