use crate::helper;
use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Generates an implementation of `Columns` from the named fields of a struct.
///
/// Field order is kept, so the column list and the placeholder list line up
/// with the order in which a caller binds the fields.
pub fn impl_columns(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse2(input).expect("failed to parse input token stream");

    let struct_name = &ast.ident;
    let columns = helper::extract_fields(&ast.data)
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| ident.to_string()))
        .collect::<Vec<String>>();

    let column_list = columns.join(", ");
    let placeholder_list = (1..=columns.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<String>>()
        .join(", ");

    quote::quote! {
        impl Columns for #struct_name {
            fn columns() -> &'static str {
                #column_list
            }

            fn placeholders() -> &'static str {
                #placeholder_list
            }
        }
    }
}
