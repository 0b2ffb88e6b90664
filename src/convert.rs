use crate::{CborError, Document};

/// A type that stores itself as entries of a document map.
///
/// Usually derived with `#[derive(IntoDocument)]`: each named field becomes one text key, in
/// declaration order. `Option` fields are left out when `None`.
///
/// ```
/// use cbor_doc::{Document, FromDocument, IntoDocument};
///
/// #[derive(IntoDocument, FromDocument, Debug, PartialEq)]
/// struct Reading {
///     sensor: String,
///     #[cbor(rename = "v")]
///     value: i64,
///     unit: Option<String>,
/// }
///
/// let r = Reading { sensor: "t1".into(), value: -4, unit: None };
/// let mut doc = r.to_document()?;
/// assert_eq!(doc.as_bytes(), b"\xbf\x66sensor\x62t1\x61v\x23\xff");
/// assert_eq!(Reading::from_document(&mut doc)?, r);
/// # Ok::<(), cbor_doc::CborError>(())
/// ```
pub trait IntoDocument {
    /// Assign every field of `self` into `doc`, replacing keys that already exist.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`Document::assign_key`].
    fn write_into(&self, doc: &mut Document) -> Result<(), CborError>;

    /// Build a fresh document holding `self`.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`IntoDocument::write_into`].
    fn to_document(&self) -> Result<Document, CborError> {
        let mut doc = Document::new();
        self.write_into(&mut doc)?;
        Ok(doc)
    }
}

/// A type that can be rebuilt from the entries of a document map.
///
/// Usually derived with `#[derive(FromDocument)]`. Missing required keys fail with
/// `MissingKey`; missing `Option` or `#[cbor(default)]` fields are filled in.
pub trait FromDocument: Sized {
    /// Read `Self` out of `doc`. The cursor is left wherever the last lookup put it.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` for an absent required key, or the error of the failing read.
    fn from_document(doc: &mut Document) -> Result<Self, CborError>;
}
