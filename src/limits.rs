/// Default lower bound on the capacity reserved by [`Document::with_capacity`](crate::Document::with_capacity).
pub const DEFAULT_MIN_CAPACITY: usize = 64;

/// Default ceiling on the size of a document buffer.
#[allow(clippy::cast_sign_loss)]
pub const DEFAULT_MAX_BYTES: usize = isize::MAX as usize;

/// Default maximum nesting depth when walking encoded items.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Resource limits applied to a single document.
///
/// Limits are per document; nested documents produced by
/// [`Document::read_map`](crate::Document::read_map) inherit the limits of their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLimits {
    /// Capacity reserved up front when a document is created.
    pub min_capacity: usize,
    /// Maximum buffer length in bytes. Growth past it fails with `InsufficientSpace`.
    pub max_bytes: usize,
    /// Maximum container nesting depth accepted when measuring, rendering or serializing items.
    pub max_depth: usize,
}

impl DocumentLimits {
    /// Construct conservative limits for documents of at most `max_bytes` bytes.
    ///
    /// The reserved capacity is `min(DEFAULT_MIN_CAPACITY, max_bytes)`.
    #[must_use]
    pub const fn for_bytes(max_bytes: usize) -> Self {
        let min_capacity = if max_bytes < DEFAULT_MIN_CAPACITY {
            max_bytes
        } else {
            DEFAULT_MIN_CAPACITY
        };
        Self {
            min_capacity,
            max_bytes,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for DocumentLimits {
    fn default() -> Self {
        Self::for_bytes(DEFAULT_MAX_BYTES)
    }
}
