//! # cbor-doc
//!
//! A mutable CBOR document engine: one encoded data item, almost always an indefinite-length
//! map, held in a single growable buffer and edited **in place**.
//!
//! There is no intermediate tree. Keys are found by a linear scan of the encoded bytes, values
//! are read at a cursor, and every change (update, insert, append, grow) is a byte splice
//! followed by an update of the cursor and the map-end boundary.
//!
//! ```
//! use cbor_doc::Document;
//!
//! let mut doc = Document::new();
//! doc.assign_key("1", 0x23u64)?;
//! doc.assign_key("2", 0x7392u64)?;
//! doc.assign_key("1", 0x1234u64)?; // the entry for "2" shifts right, untouched
//!
//! assert!(doc.find_key("2")?);
//! assert_eq!(doc.read_uint()?, 0x7392);
//! assert_eq!(doc.to_string(), r#"{"1": 4660, "2": 29586}"#);
//! # Ok::<(), cbor_doc::CborError>(())
//! ```
//!
//! ## Encoding rules
//!
//! - Maps written by this crate are indefinite-length (`0xbf … 0xff`).
//! - Integers and string lengths always use the shortest head that fits the argument.
//! - Map keys are text strings. Key search skips entries whose key is not text.
//! - Loaded bytes may contain any well-formed CBOR; definite-length maps are searchable and
//!   readable but not mutable.
//!
//! ## Errors
//!
//! Every fallible operation returns `Result<_, CborError>`. The first failure is also latched in
//! the document: later mutations return it without touching the bytes, so a caller may run a
//! batch of edits and inspect [`Document::check`] once at the end.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`CborError`].
//! - `sha2` *(default)*: enables [`Document::sha256`].
//! - `serde`: implements `serde::Serialize` for [`Document`].
//! - `simdutf8`: enables SIMD-accelerated UTF-8 validation where supported.
//!
//! ## Logging
//!
//! Buffer growth and latched errors are reported at `debug` level through `tracing`; every
//! splice is reported at `trace` level. The crate never installs a subscriber.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and requires `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod alloc_util;
mod buffer;
mod codec;
mod convert;
mod diag;
mod document;
mod error;
mod limits;
mod mutate;
mod read;
mod search;
#[cfg(feature = "serde")]
mod serde_impl;
mod stream;
pub(crate) mod utf8;
mod walk;
mod writer;

pub use crate::codec::{CborKind, BREAK, MAP_OPEN};
pub use crate::convert::{FromDocument, IntoDocument};
pub use crate::document::Document;
pub use crate::error::{CborError, ErrorCode};
pub use crate::limits::{
    DocumentLimits, DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH, DEFAULT_MIN_CAPACITY,
};
pub use crate::read::ReadValue;
pub use crate::writer::{Value, ValueWriter};

pub use cbor_doc_derive::{FromDocument, IntoDocument};
