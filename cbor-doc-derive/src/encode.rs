use quote::quote;
use syn::{spanned::Spanned, DataStruct, Fields, Generics, Ident};

use crate::attrs::parse_cbor_field_attrs;
use crate::field_key;
use crate::types::{option_inner_type, type_mentions_self};
use crate::util::where_with_bounds;

pub(crate) fn encode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
) -> syn::Result<proc_macro2::TokenStream> {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.struct_token.span(),
            "IntoDocument requires a struct with named fields",
        ));
    };

    let mut stmts = Vec::new();
    let mut bounds = Vec::new();

    for field in &fields.named {
        let attr = parse_cbor_field_attrs(&field.attrs)?;
        if attr.skip {
            continue;
        }
        let Some(f_ident) = field.ident.as_ref() else {
            continue;
        };
        let key = field_key(f_ident, attr.rename);

        if let Some(inner) = option_inner_type(&field.ty) {
            if !type_mentions_self(inner, name) {
                bounds.push((inner, quote!(::cbor_doc::ValueWriter)));
            }
            stmts.push(quote! {
                if let ::core::option::Option::Some(v) = &self.#f_ident {
                    doc.assign_key(#key, v)?;
                }
            });
        } else {
            if !type_mentions_self(&field.ty, name) {
                bounds.push((&field.ty, quote!(::cbor_doc::ValueWriter)));
            }
            stmts.push(quote! {
                doc.assign_key(#key, &self.#f_ident)?;
            });
        }
    }

    let where_clause = where_with_bounds(where_clause, &bounds);

    Ok(quote! {
        impl #impl_generics ::cbor_doc::IntoDocument for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn write_into(
                &self,
                doc: &mut ::cbor_doc::Document,
            ) -> ::core::result::Result<(), ::cbor_doc::CborError> {
                #(#stmts)*
                ::core::result::Result::Ok(())
            }
        }
    })
}
