extern crate proc_macro;

use proc_macro::TokenStream;

/// Implements `rowbind::Record` for a struct with named fields.
///
/// * `#[column("name")]` binds the field to a column.
/// * `#[column(ignore)]` skips the field.
/// * `#[flatten]` numbers the fields of a nested record in place.
#[proc_macro_derive(Record, attributes(column, flatten))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match rowbind_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
