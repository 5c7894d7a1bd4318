mod columns;
mod helper;

use columns::impl_columns;
use proc_macro::TokenStream;

#[proc_macro_derive(Columns)]
pub fn derive_columns(input: TokenStream) -> TokenStream {
    impl_columns(input.into()).into()
}
