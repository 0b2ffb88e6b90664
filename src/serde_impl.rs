use alloc::string::String;
use alloc::vec::Vec;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::codec::{
    f16_to_f64, BREAK, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP, MAJOR_NINT, MAJOR_SIMPLE, MAJOR_TAG,
    MAJOR_TEXT, MAJOR_UINT,
};
use crate::stream::{CborStream, Head};
use crate::walk::value_end;
use crate::{CborError, Document, ErrorCode};

/// Serializes the first data item. An empty document serializes as an empty map.
impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.buf.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }
        let max_depth = self.limits.max_depth;
        value_end(&self.buf, 0, max_depth).map_err(S::Error::custom)?;
        ItemRef {
            data: &self.buf,
            start: 0,
            max_depth,
        }
        .serialize(serializer)
    }
}

/// A borrowed, already-validated data item.
#[derive(Clone, Copy)]
struct ItemRef<'a> {
    data: &'a [u8],
    start: usize,
    max_depth: usize,
}

impl<'a> ItemRef<'a> {
    fn at(self, start: usize) -> Self {
        Self { start, ..self }
    }

    fn end(self) -> Result<usize, CborError> {
        value_end(self.data, self.start, self.max_depth)
    }

    fn chunks(s: &mut CborStream<'a>) -> Result<Vec<u8>, CborError> {
        let mut out = Vec::new();
        while s.peek_u8()? != BREAK {
            let chunk = s.read_head()?;
            let len = s.read_len_arg(chunk)?.ok_or_else(|| {
                CborError::new(ErrorCode::IndefiniteLengthString, chunk.offset)
            })?;
            crate::alloc_util::try_extend(&mut out, s.read_exact(len)?)?;
        }
        Ok(out)
    }

    fn string_bytes(s: &mut CborStream<'a>, head: Head) -> Result<Vec<u8>, CborError> {
        match s.read_len_arg(head)? {
            Some(len) => crate::alloc_util::try_vec_from_slice(s.read_exact(len)?, head.offset),
            None => Self::chunks(s),
        }
    }

    fn text(s: &mut CborStream<'a>, head: Head) -> Result<String, CborError> {
        let bytes = Self::string_bytes(s, head)?;
        String::from_utf8(bytes).map_err(|_| CborError::new(ErrorCode::Utf8Invalid, head.offset))
    }
}

impl Serialize for ItemRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = CborStream::new(self.data, self.start);
        let head = s.read_head().map_err(S::Error::custom)?;
        let arg = |s: &mut CborStream<'_>| s.read_uint_arg(head).map_err(S::Error::custom);
        match head.major {
            MAJOR_UINT => serializer.serialize_u64(arg(&mut s)?),
            MAJOR_NINT => {
                let n = arg(&mut s)?;
                match i64::try_from(n) {
                    Ok(v) => serializer.serialize_i64(-1 - v),
                    Err(_) => serializer.serialize_i128(-1 - i128::from(n)),
                }
            }
            MAJOR_BYTES => {
                let bytes = ItemRef::string_bytes(&mut s, head).map_err(S::Error::custom)?;
                serializer.serialize_bytes(&bytes)
            }
            MAJOR_TEXT => {
                let text = ItemRef::text(&mut s, head).map_err(S::Error::custom)?;
                serializer.serialize_str(&text)
            }
            MAJOR_ARRAY => {
                let len = s.read_len_arg(head).map_err(S::Error::custom)?;
                let mut seq = serializer.serialize_seq(len)?;
                let mut pos = s.position();
                let mut i = 0usize;
                while len.map_or(self.data[pos] != BREAK, |n| i < n) {
                    let item = self.at(pos);
                    seq.serialize_element(&item)?;
                    pos = item.end().map_err(S::Error::custom)?;
                    i += 1;
                }
                seq.end()
            }
            MAJOR_MAP => {
                let len = s.read_len_arg(head).map_err(S::Error::custom)?;
                let mut map = serializer.serialize_map(len)?;
                let mut pos = s.position();
                let mut i = 0usize;
                while len.map_or(self.data[pos] != BREAK, |n| i < n) {
                    let key = self.at(pos);
                    let value = self.at(key.end().map_err(S::Error::custom)?);
                    map.serialize_entry(&key, &value)?;
                    pos = value.end().map_err(S::Error::custom)?;
                    i += 1;
                }
                map.end()
            }
            MAJOR_TAG => {
                arg(&mut s)?;
                self.at(s.position()).serialize(serializer)
            }
            MAJOR_SIMPLE => match head.ai {
                20 => serializer.serialize_bool(false),
                21 => serializer.serialize_bool(true),
                22 | 23 => serializer.serialize_unit(),
                25 => {
                    let bits = s.read_be_u16().map_err(S::Error::custom)?;
                    serializer.serialize_f64(f16_to_f64(bits))
                }
                26 => {
                    let bits = s.read_be_u32().map_err(S::Error::custom)?;
                    serializer.serialize_f32(f32::from_bits(bits))
                }
                27 => {
                    let bits = s.read_be_u64().map_err(S::Error::custom)?;
                    serializer.serialize_f64(f64::from_bits(bits))
                }
                0..=19 => serializer.serialize_u8(head.ai),
                24 => serializer.serialize_u8(s.read_u8().map_err(S::Error::custom)?),
                _ => Err(S::Error::custom(CborError::new(
                    ErrorCode::ReservedAdditionalInfo,
                    head.offset,
                ))),
            },
            _ => unreachable!("major out of range"),
        }
    }
}
