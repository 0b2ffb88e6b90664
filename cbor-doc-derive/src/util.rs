use proc_macro2::TokenStream;
use syn::{parse_quote, Type, WhereClause, WherePredicate};

pub(crate) fn add_where_bound(wc: &mut WhereClause, ty: &Type, bound: TokenStream) {
    let pred: WherePredicate = parse_quote!(#ty: #bound);
    wc.predicates.push(pred);
}

/// Extends the input's where clause with `ty: bound` for every collected bound.
pub(crate) fn where_with_bounds(
    base: Option<&WhereClause>,
    bounds: &[(&Type, TokenStream)],
) -> Option<WhereClause> {
    let mut out = base.cloned();
    if !bounds.is_empty() {
        let wc = out.get_or_insert_with(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });
        for (ty, bound) in bounds {
            add_where_bound(wc, ty, bound.clone());
        }
    }
    out
}
