//! Value writers: the pluggable encoders the mutation engine dispatches to.

use alloc::string::String;
use alloc::vec::Vec;

use crate::alloc_util::try_extend;
use crate::codec::{encode_int, encode_text, encode_uint, EMPTY_MAP};
use crate::{CborError, Document};

mod sealed {
    pub trait Sealed {}
}

/// Encodes exactly one CBOR value.
///
/// The mutation engine never inspects value types; it asks a writer for the bytes and splices
/// them in. Writers are pure encoders of already-valid native values, so the only failure they
/// report is running out of space.
pub trait ValueWriter: sealed::Sealed {
    /// Append the encoded value to `out`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientSpace` if `out` cannot grow.
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CborError>;
}

/// The closed set of values a document entry can be assigned.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    /// An unsigned integer (major type 0).
    Uint(u64),
    /// A signed integer (major type 0 or 1).
    Int(i64),
    /// A text string (major type 3).
    Text(&'a str),
    /// A nested document, embedded verbatim.
    Map(&'a Document),
}

impl sealed::Sealed for Value<'_> {}

impl ValueWriter for Value<'_> {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CborError> {
        match *self {
            Self::Uint(v) => encode_uint(out, v),
            Self::Int(v) => encode_int(out, v),
            Self::Text(s) => encode_text(out, s),
            Self::Map(doc) => doc.encode_into(out),
        }
    }
}

impl<T: ValueWriter + ?Sized> sealed::Sealed for &T {}

impl<T: ValueWriter + ?Sized> ValueWriter for &T {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CborError> {
        (**self).encode_into(out)
    }
}

macro_rules! unsigned_writer {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl ValueWriter for $t {
            fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CborError> {
                encode_uint(out, u64::from(*self))
            }
        }
    )*};
}

macro_rules! signed_writer {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl ValueWriter for $t {
            fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CborError> {
                encode_int(out, i64::from(*self))
            }
        }
    )*};
}

unsigned_writer!(u8, u16, u32, u64);
signed_writer!(i8, i16, i32, i64);

impl sealed::Sealed for str {}

impl ValueWriter for str {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CborError> {
        encode_text(out, self)
    }
}

impl sealed::Sealed for String {}

impl ValueWriter for String {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CborError> {
        encode_text(out, self)
    }
}

impl sealed::Sealed for Document {}

/// Embeds the raw bytes. An empty document is written as the empty map `bf ff`.
impl ValueWriter for Document {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), CborError> {
        if self.buf.is_empty() {
            return try_extend(out, &EMPTY_MAP);
        }
        try_extend(out, &self.buf)
    }
}
