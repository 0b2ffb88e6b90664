//! Derive macros for `cbor-doc`: `IntoDocument` and `FromDocument` on structs with named
//! fields.
//!
//! Field attributes:
//! - `#[cbor(rename = "key")]` stores the field under another key.
//! - `#[cbor(skip)]` leaves the field out; it is rebuilt with `Default::default()`.
//! - `#[cbor(default)]` fills a missing key with `Default::default()` instead of failing.

extern crate proc_macro;

mod attrs;
mod decode;
mod encode;
mod types;
mod util;

use proc_macro::TokenStream;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Ident, LitStr};

use crate::attrs::ensure_no_cbor_attrs;
use crate::decode::decode_struct;
use crate::encode::encode_struct;

pub(crate) fn field_key(ident: &Ident, rename: Option<LitStr>) -> LitStr {
    rename.unwrap_or_else(|| {
        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name);
        LitStr::new(name, ident.span())
    })
}

fn expand(
    input: &DeriveInput,
    trait_name: &str,
    f: fn(&Ident, &syn::Generics, &syn::DataStruct) -> syn::Result<proc_macro2::TokenStream>,
) -> syn::Result<proc_macro2::TokenStream> {
    ensure_no_cbor_attrs(&input.attrs, "the container")?;
    match &input.data {
        Data::Struct(data) => f(&input.ident, &input.generics, data),
        Data::Enum(e) => Err(syn::Error::new(
            e.enum_token.span(),
            format!("{trait_name} is only supported for structs"),
        )),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span(),
            format!("{trait_name} is only supported for structs"),
        )),
    }
}

#[proc_macro_derive(IntoDocument, attributes(cbor))]
pub fn derive_into_document(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = expand(&input, "IntoDocument", encode_struct)
        .unwrap_or_else(syn::Error::into_compile_error);
    TokenStream::from(out)
}

#[proc_macro_derive(FromDocument, attributes(cbor))]
pub fn derive_from_document(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = expand(&input, "FromDocument", decode_struct)
        .unwrap_or_else(syn::Error::into_compile_error);
    TokenStream::from(out)
}
