use core::fmt;

/// A structured error code identifying why a document operation failed.
///
/// The first three codes are the document-level failures every caller should expect. The rest
/// describe malformed bytes, which can only appear in documents loaded from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A map-only operation was attempted on a document that is neither empty nor a map.
    UnsupportedOperation,
    /// A typed read found a value whose major type differs from the requested one.
    TypeMismatch,
    /// Buffer growth or allocation failed, or the configured size ceiling was reached.
    InsufficientSpace,

    /// Unexpected end of input while decoding.
    UnexpectedEof,
    /// Arithmetic overflow while computing a length or offset.
    LengthOverflow,
    /// Reserved additional-info value (28..30) was used.
    ReservedAdditionalInfo,
    /// A break marker appeared where a data item was expected.
    UnexpectedBreak,
    /// The map-end boundary does not sit right after a break marker.
    MissingBreak,
    /// Chunked (indefinite-length) strings cannot be read.
    IndefiniteLengthString,
    /// Nesting depth limit exceeded.
    DepthLimitExceeded,
    /// The decoded integer does not fit the requested native type.
    IntegerOutOfRange,
    /// Invalid UTF-8 in a text string.
    Utf8Invalid,
    /// A required key is absent from the document.
    MissingKey,
}

impl ErrorCode {
    /// Returns true iff this code describes malformed encoded bytes.
    #[inline]
    #[must_use]
    pub const fn is_malformed(self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof
                | Self::LengthOverflow
                | Self::ReservedAdditionalInfo
                | Self::UnexpectedBreak
                | Self::MissingBreak
                | Self::Utf8Invalid
        )
    }

    const fn message(self) -> &'static str {
        match self {
            Self::UnsupportedOperation => "operation requires an empty or map document",
            Self::TypeMismatch => "value has a different major type",
            Self::InsufficientSpace => "insufficient space",

            Self::UnexpectedEof => "unexpected end of input",
            Self::LengthOverflow => "length overflow",
            Self::ReservedAdditionalInfo => "reserved additional info value",
            Self::UnexpectedBreak => "unexpected break marker",
            Self::MissingBreak => "map end is not preceded by a break marker",
            Self::IndefiniteLengthString => "indefinite-length strings are not supported",
            Self::DepthLimitExceeded => "nesting depth limit exceeded",
            Self::IntegerOutOfRange => "integer out of range for the requested type",
            Self::Utf8Invalid => "text must be valid UTF-8",
            Self::MissingKey => "required key is missing",
        }
    }
}

/// A document error with a stable code and the byte offset where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CborError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset into the document buffer where the error was detected.
    pub offset: usize,
}

impl CborError {
    /// Construct an error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cbor document error at {}: {}",
            self.offset,
            self.code.message()
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CborError {}
