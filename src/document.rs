use alloc::vec::Vec;

use crate::alloc_util::try_vec_with_capacity;
use crate::codec::MAP_OPEN;
use crate::{CborError, DocumentLimits};

/// A single CBOR data item held in one growable buffer and edited in place.
///
/// A document is almost always an indefinite-length map (`0xbf … 0xff`). It carries:
///
/// - the encoded bytes,
/// - a **cursor**, the offset where reads happen and value writes are inserted,
/// - a **map-end** offset, one past the break marker of the outermost map, which bounds key
///   search and marks where new entries go,
/// - a latched error: the first failure is kept, and every later mutation becomes a no-op that
///   returns it.
///
/// Both offsets always lie in `[0, len]`.
///
/// ```
/// use cbor_doc::Document;
///
/// let mut doc = Document::new();
/// doc.assign_key("answer", 42u64)?;
/// assert_eq!(doc.as_bytes(), b"\xbf\x66answer\x18\x2a\xff");
///
/// assert!(doc.find_key("answer")?);
/// assert_eq!(doc.read_uint()?, 42);
/// # Ok::<(), cbor_doc::CborError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) buf: Vec<u8>,
    pub(crate) cursor: usize,
    pub(crate) map_end: usize,
    pub(crate) error: Option<CborError>,
    pub(crate) limits: DocumentLimits,
}

impl Document {
    /// Create an empty document without allocating.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with at least `capacity` bytes reserved.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientSpace` if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, CborError> {
        Self::with_limits(capacity, DocumentLimits::default())
    }

    /// Create an empty document governed by `limits`.
    ///
    /// The reserved capacity is raised to `limits.min_capacity` and capped at `limits.max_bytes`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientSpace` if the allocation fails.
    pub fn with_limits(capacity: usize, limits: DocumentLimits) -> Result<Self, CborError> {
        let capacity = capacity.max(limits.min_capacity).min(limits.max_bytes);
        Ok(Self {
            buf: try_vec_with_capacity(capacity, 0)?,
            cursor: 0,
            map_end: 0,
            error: None,
            limits,
        })
    }

    /// Create a document holding a copy of `bytes`, with the cursor at `0` and map-end at the end.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientSpace` if `bytes` exceed the default limits or the allocation fails.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CborError> {
        Self::from_bytes_with_limits(bytes, DocumentLimits::default())
    }

    /// Like [`Document::from_bytes`], governed by `limits`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientSpace` if `bytes` exceed `limits.max_bytes` or the allocation fails.
    pub fn from_bytes_with_limits(
        bytes: &[u8],
        limits: DocumentLimits,
    ) -> Result<Self, CborError> {
        let mut doc = Self::with_limits(bytes.len(), limits)?;
        doc.load(bytes)?;
        doc.map_end = doc.buf.len();
        Ok(doc)
    }

    /// Borrow the encoded bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the document and return its encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Length of the encoded bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the document holds no bytes yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes the buffer can hold before it has to grow.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The current cursor offset.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The current map-end offset.
    #[inline]
    #[must_use]
    pub const fn map_end(&self) -> usize {
        self.map_end
    }

    /// The limits governing this document.
    #[inline]
    #[must_use]
    pub const fn limits(&self) -> DocumentLimits {
        self.limits
    }

    /// Returns `true` if the first byte opens an indefinite-length map.
    #[must_use]
    pub fn is_map(&self) -> bool {
        self.buf.first() == Some(&MAP_OPEN)
    }

    /// The latched error, if any operation has failed.
    #[inline]
    #[must_use]
    pub const fn error(&self) -> Option<CborError> {
        self.error
    }

    /// Returns the latched error as a `Result`, for checking once after a batch of calls.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded on this document.
    pub const fn check(&self) -> Result<(), CborError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Compute the SHA-256 digest of the encoded bytes.
    #[cfg(feature = "sha2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha2")))]
    #[must_use]
    pub fn sha256(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};
        let mut h = Sha256::new();
        h.update(&self.buf);
        let out = h.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(out.as_slice());
        digest
    }

    /// Fails with the latched error so mutations can bail out before touching the bytes.
    #[inline]
    pub(crate) const fn ensure_writable(&self) -> Result<(), CborError> {
        self.check()
    }

    /// Records the first failure of `res` and passes it through.
    pub(crate) fn record<T>(&mut self, res: Result<T, CborError>) -> Result<T, CborError> {
        if let Err(err) = &res {
            if self.error.is_none() {
                tracing::debug!(code = ?err.code, offset = err.offset, "document error latched");
                self.error = Some(*err);
            }
        }
        res
    }
}
