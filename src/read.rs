//! Typed reads at the cursor.
//!
//! Reads never move the cursor. A read against a value of the wrong major type fails with
//! `TypeMismatch` and leaves the document bytes and cursor as they were.

use alloc::string::String;

use crate::alloc_util::try_string_from_str;
use crate::codec::{CborKind, MAJOR_NINT, MAJOR_TEXT, MAJOR_UINT};
use crate::stream::{CborStream, Head};
use crate::walk::value_end;
use crate::{CborError, Document, ErrorCode};

mod sealed {
    pub trait Sealed {}
}

/// A native type that can be decoded from the value at the cursor.
pub trait ReadValue: sealed::Sealed + Sized {
    /// Decode the value at the document cursor.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for a value of another type, `IntegerOutOfRange` when an integer
    /// does not fit, or a decode error for malformed bytes.
    fn read_from(doc: &mut Document) -> Result<Self, CborError>;
}

impl Document {
    /// The kind of the item at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if the cursor is at the end of the bytes.
    pub fn kind(&self) -> Result<CborKind, CborError> {
        self.buf
            .get(self.cursor)
            .map(|&b| CborKind::of(b))
            .ok_or_else(|| CborError::new(ErrorCode::UnexpectedEof, self.cursor))
    }

    /// Read an unsigned integer at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` unless the value is major type 0. Errors are latched.
    pub fn read_uint(&mut self) -> Result<u64, CborError> {
        let res = self.uint_at_cursor();
        self.record(res)
    }

    /// Read a signed integer (major type 0 or 1) at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for other major types and `IntegerOutOfRange` if the value does not
    /// fit an `i64`. Errors are latched.
    pub fn read_int(&mut self) -> Result<i64, CborError> {
        let res = self.int_at_cursor();
        self.record(res)
    }

    /// Read a text string at the cursor into an owned `String`.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` unless the value is a text string, `IndefiniteLengthString` for
    /// chunked text, `Utf8Invalid` for bad text, or `InsufficientSpace` if the copy cannot be
    /// allocated. Errors are latched.
    pub fn read_text(&mut self) -> Result<String, CborError> {
        let res = self.text_at_cursor();
        self.record(res)
    }

    /// Read the value at the cursor as `T`.
    ///
    /// # Errors
    ///
    /// See [`ReadValue::read_from`].
    pub fn read<T: ReadValue>(&mut self) -> Result<T, CborError> {
        T::read_from(self)
    }

    /// Find `key` and read its value as `T`; `None` if the key is absent.
    ///
    /// ```
    /// use cbor_doc::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.assign_key("name", "gauge")?;
    /// assert_eq!(doc.get::<String>("name")?.as_deref(), Some("gauge"));
    /// assert_eq!(doc.get::<u64>("missing")?, None);
    /// # Ok::<(), cbor_doc::CborError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns search errors from [`Document::find_key`] or read errors from `T`.
    pub fn get<T: ReadValue>(&mut self, key: &str) -> Result<Option<T>, CborError> {
        if !self.find_key(key)? {
            return Ok(None);
        }
        T::read_from(self).map(Some)
    }

    /// Encoded size in bytes of the item at the cursor.
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed bytes. Errors are latched.
    pub fn data_item_size(&mut self) -> Result<usize, CborError> {
        let res = value_end(&self.buf, self.cursor, self.limits.max_depth)
            .map(|end| end - self.cursor);
        self.record(res)
    }

    /// Move the cursor past the item at the cursor.
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed bytes. Errors are latched and the cursor stays put.
    pub fn skip_item(&mut self) -> Result<(), CborError> {
        let size = self.data_item_size()?;
        self.cursor += size;
        Ok(())
    }

    /// Number of entries in the root map that end within the map-end, which is the set
    /// [`Document::find_key`] searches. An empty document has none.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` if the document is not a map, or a decode error. Errors
    /// are latched.
    pub fn entry_count(&mut self) -> Result<usize, CborError> {
        if self.buf.is_empty() {
            return Ok(0);
        }
        let res = self.count_entries();
        self.record(res)
    }

    fn head_at_cursor(&self) -> Result<(Head, CborStream<'_>), CborError> {
        let mut s = CborStream::new(&self.buf, self.cursor);
        let head = s.read_head()?;
        Ok((head, s))
    }

    fn uint_at_cursor(&self) -> Result<u64, CborError> {
        let (head, mut s) = self.head_at_cursor()?;
        if head.major != MAJOR_UINT {
            return Err(CborError::new(ErrorCode::TypeMismatch, head.offset));
        }
        s.read_uint_arg(head)
    }

    fn int_at_cursor(&self) -> Result<i64, CborError> {
        let (head, mut s) = self.head_at_cursor()?;
        let out_of_range = || CborError::new(ErrorCode::IntegerOutOfRange, head.offset);
        match head.major {
            MAJOR_UINT => i64::try_from(s.read_uint_arg(head)?).map_err(|_| out_of_range()),
            MAJOR_NINT => {
                let n = i64::try_from(s.read_uint_arg(head)?).map_err(|_| out_of_range())?;
                Ok(-1 - n)
            }
            _ => Err(CborError::new(ErrorCode::TypeMismatch, head.offset)),
        }
    }

    fn text_at_cursor(&self) -> Result<String, CborError> {
        let (head, mut s) = self.head_at_cursor()?;
        if head.major != MAJOR_TEXT {
            return Err(CborError::new(ErrorCode::TypeMismatch, head.offset));
        }
        let len = s.read_len_arg(head)?.ok_or_else(|| {
            CborError::new(ErrorCode::IndefiniteLengthString, head.offset)
        })?;
        let bytes = s.read_exact(len)?;
        let text = crate::utf8::validate(bytes)
            .map_err(|()| CborError::new(ErrorCode::Utf8Invalid, head.offset))?;
        try_string_from_str(text, head.offset)
    }
}

impl sealed::Sealed for u64 {}

impl ReadValue for u64 {
    fn read_from(doc: &mut Document) -> Result<Self, CborError> {
        doc.read_uint()
    }
}

impl sealed::Sealed for i64 {}

impl ReadValue for i64 {
    fn read_from(doc: &mut Document) -> Result<Self, CborError> {
        doc.read_int()
    }
}

macro_rules! narrow_reader {
    ($wide:ty => $($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl ReadValue for $t {
            fn read_from(doc: &mut Document) -> Result<Self, CborError> {
                let offset = doc.cursor();
                let wide = <$wide as ReadValue>::read_from(doc)?;
                let res = <$t>::try_from(wide)
                    .map_err(|_| CborError::new(ErrorCode::IntegerOutOfRange, offset));
                doc.record(res)
            }
        }
    )*};
}

narrow_reader!(u64 => u8, u16, u32);
narrow_reader!(i64 => i8, i16, i32);

impl sealed::Sealed for String {}

impl ReadValue for String {
    fn read_from(doc: &mut Document) -> Result<Self, CborError> {
        doc.read_text()
    }
}

impl sealed::Sealed for Document {}

impl ReadValue for Document {
    fn read_from(doc: &mut Document) -> Result<Self, CborError> {
        doc.read_map()
    }
}
