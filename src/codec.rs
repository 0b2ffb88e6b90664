//! Primitive codec: minimal-length heads, integers, text strings and map framing.
//!
//! Every encoder picks the shortest head that fits its argument, so re-encoding a value can
//! change its length. Callers that rewrite values in place must therefore go through
//! [`Document::splice`](crate::Document::splice).

use alloc::vec::Vec;

use crate::alloc_util::try_extend;
use crate::CborError;

pub(crate) const MAJOR_UINT: u8 = 0;
pub(crate) const MAJOR_NINT: u8 = 1;
pub(crate) const MAJOR_BYTES: u8 = 2;
pub(crate) const MAJOR_TEXT: u8 = 3;
pub(crate) const MAJOR_ARRAY: u8 = 4;
pub(crate) const MAJOR_MAP: u8 = 5;
pub(crate) const MAJOR_TAG: u8 = 6;
pub(crate) const MAJOR_SIMPLE: u8 = 7;

pub(crate) const INDEFINITE: u8 = 31;

/// Initial byte of an indefinite-length map.
pub const MAP_OPEN: u8 = 0xbf;
/// Break marker closing an indefinite-length container.
pub const BREAK: u8 = 0xff;

/// The encoded CBOR representation of an empty map as written by this crate.
pub(crate) const EMPTY_MAP: [u8; 2] = [MAP_OPEN, BREAK];

/// The kind of a CBOR data item, as read from its initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CborKind {
    /// Major type 0.
    Unsigned,
    /// Major type 1.
    Negative,
    /// Major type 2.
    Bytes,
    /// Major type 3.
    Text,
    /// Major type 4.
    Array,
    /// Major type 5.
    Map,
    /// Major type 6.
    Tag,
    /// Major type 7 floats (half, single, double).
    Float,
    /// Major type 7 simple values (false, true, null, undefined, others).
    Simple,
    /// The break marker `0xff`.
    Break,
}

impl CborKind {
    /// Classify an initial byte.
    #[must_use]
    pub const fn of(initial: u8) -> Self {
        match initial >> 5 {
            MAJOR_UINT => Self::Unsigned,
            MAJOR_NINT => Self::Negative,
            MAJOR_BYTES => Self::Bytes,
            MAJOR_TEXT => Self::Text,
            MAJOR_ARRAY => Self::Array,
            MAJOR_MAP => Self::Map,
            MAJOR_TAG => Self::Tag,
            _ => match initial & 0x1f {
                25..=27 => Self::Float,
                INDEFINITE => Self::Break,
                _ => Self::Simple,
            },
        }
    }
}

/// Returns the encoded head for `major` and `value` in a fixed buffer plus its used length.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn head(major: u8, value: u64) -> ([u8; 9], usize) {
    let mut out = [0u8; 9];
    let mt = major << 5;
    if value < 24 {
        out[0] = mt | value as u8;
        (out, 1)
    } else if value <= 0xff {
        out[0] = mt | 24;
        out[1] = value as u8;
        (out, 2)
    } else if value <= 0xffff {
        out[0] = mt | 25;
        let b = (value as u16).to_be_bytes();
        out[1] = b[0];
        out[2] = b[1];
        (out, 3)
    } else if value <= 0xffff_ffff {
        out[0] = mt | 26;
        let b = (value as u32).to_be_bytes();
        let mut i = 0;
        while i < 4 {
            out[1 + i] = b[i];
            i += 1;
        }
        (out, 5)
    } else {
        out[0] = mt | 27;
        let b = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            out[1 + i] = b[i];
            i += 1;
        }
        (out, 9)
    }
}

pub(crate) fn encode_head(out: &mut Vec<u8>, major: u8, value: u64) -> Result<(), CborError> {
    debug_assert!(major <= 7);
    let (buf, len) = head(major, value);
    try_extend(out, &buf[..len])
}

pub(crate) fn encode_uint(out: &mut Vec<u8>, v: u64) -> Result<(), CborError> {
    encode_head(out, MAJOR_UINT, v)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn encode_int(out: &mut Vec<u8>, v: i64) -> Result<(), CborError> {
    match u64::try_from(v) {
        Ok(u) => encode_head(out, MAJOR_UINT, u),
        // -1 - v is non-negative and fits u64 for every negative i64.
        Err(_) => encode_head(out, MAJOR_NINT, (-1 - i128::from(v)) as u64),
    }
}

pub(crate) fn encode_text(out: &mut Vec<u8>, s: &str) -> Result<(), CborError> {
    // `str` guarantees valid UTF-8.
    let b = s.as_bytes();
    encode_head(out, MAJOR_TEXT, b.len() as u64)?;
    try_extend(out, b)
}

/// Widens an IEEE 754 half-precision value.
pub(crate) fn f16_to_f64(h: u16) -> f64 {
    let sign = u64::from(h >> 15) << 63;
    let exp = u64::from((h >> 10) & 0x1f);
    let mant = u64::from(h & 0x3ff);
    let magnitude = match exp {
        // Subnormal: mant * 2^-24.
        0 => f64::from(h & 0x3ff) * f64::from_bits((1023 - 24) << 52),
        31 => f64::from_bits((0x7ff << 52) | (mant << 42)),
        _ => f64::from_bits(((exp + 1023 - 15) << 52) | (mant << 42)),
    };
    f64::from_bits(magnitude.to_bits() | sign)
}
