use quote::quote;
use syn::{spanned::Spanned, DataStruct, Fields, Generics, Ident};

use crate::attrs::parse_cbor_field_attrs;
use crate::field_key;
use crate::types::{option_inner_type, type_mentions_self};
use crate::util::where_with_bounds;

pub(crate) fn decode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
) -> syn::Result<proc_macro2::TokenStream> {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.struct_token.span(),
            "FromDocument requires a struct with named fields",
        ));
    };

    let mut inits = Vec::new();
    let mut bounds = Vec::new();

    for field in &fields.named {
        let attr = parse_cbor_field_attrs(&field.attrs)?;
        let Some(f_ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let recursive = type_mentions_self(ty, name);

        if attr.skip {
            if !recursive {
                bounds.push((ty, quote!(::core::default::Default)));
            }
            inits.push(quote! { #f_ident: ::core::default::Default::default(), });
            continue;
        }

        let key = field_key(f_ident, attr.rename);

        if let Some(inner) = option_inner_type(ty) {
            if !type_mentions_self(inner, name) {
                bounds.push((inner, quote!(::cbor_doc::ReadValue)));
            }
            inits.push(quote! { #f_ident: doc.get(#key)?, });
        } else if attr.default {
            if !recursive {
                bounds.push((ty, quote!(::cbor_doc::ReadValue + ::core::default::Default)));
            }
            inits.push(quote! { #f_ident: doc.get(#key)?.unwrap_or_default(), });
        } else {
            if !recursive {
                bounds.push((ty, quote!(::cbor_doc::ReadValue)));
            }
            inits.push(quote! {
                #f_ident: match doc.get(#key)? {
                    ::core::option::Option::Some(v) => v,
                    ::core::option::Option::None => {
                        return ::core::result::Result::Err(::cbor_doc::CborError::new(
                            ::cbor_doc::ErrorCode::MissingKey,
                            doc.cursor(),
                        ));
                    }
                },
            });
        }
    }

    let where_clause = where_with_bounds(where_clause, &bounds);

    Ok(quote! {
        impl #impl_generics ::cbor_doc::FromDocument for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn from_document(
                doc: &mut ::cbor_doc::Document,
            ) -> ::core::result::Result<Self, ::cbor_doc::CborError> {
                ::core::result::Result::Ok(Self {
                    #(#inits)*
                })
            }
        }
    })
}
