use crate::schema::{Field, FieldKind, Record};

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The record being expanded
    record: &'a Record,

    /// Path prefix for rowbind types
    rowbind: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let rowbind = &self.rowbind;
        let ident = &self.record.ident;
        let (impl_generics, ty_generics, where_clause) = self.record.generics.split_for_impl();

        let field_count = self.expand_field_count();
        let describe = self.expand_describe();
        let slot_mut = self.expand_accessors(Access::SlotMut);
        let value = self.expand_accessors(Access::Value);

        wrap_in_const(quote! {
            impl #impl_generics #rowbind::Record for #ident #ty_generics #where_clause {
                const FIELD_COUNT: usize = #field_count;

                fn describe(fields: &mut Vec<#rowbind::FieldDef>) {
                    #describe
                }

                fn slot_mut(&mut self, index: usize) -> Option<#rowbind::SlotMut<'_>> {
                    #slot_mut
                }

                fn value(&self, index: usize) -> Option<#rowbind::Value> {
                    #value
                }
            }
        })
    }

    /// Number of accessors a field occupies.
    fn width(&self, field: &Field) -> Option<TokenStream> {
        let rowbind = &self.rowbind;
        let ty = &field.ty;

        match field.kind {
            FieldKind::Column(_) => Some(quote!(1)),
            FieldKind::Flatten => Some(quote!(<#ty as #rowbind::Record>::FIELD_COUNT)),
            FieldKind::Ignore => None,
        }
    }

    fn expand_field_count(&self) -> TokenStream {
        let widths = self.record.fields.iter().filter_map(|field| self.width(field));
        quote!(0 #( + #widths )*)
    }

    fn expand_describe(&self) -> TokenStream {
        let rowbind = &self.rowbind;

        let pushes: Vec<_> = self
            .record
            .fields
            .iter()
            .filter_map(|field| {
                let ty = &field.ty;
                let name = field.ident.to_string();

                match &field.kind {
                    FieldKind::Column(tag) => {
                        let tag = match tag {
                            Some(tag) => quote!(Some(#tag)),
                            None => quote!(None),
                        };

                        Some(quote! {
                            fields.push(#rowbind::FieldDef {
                                name: #name,
                                tag: #tag,
                                ty: <#ty as #rowbind::Column>::TYPE,
                            });
                        })
                    }
                    FieldKind::Flatten => Some(quote! {
                        <#ty as #rowbind::Record>::describe(fields);
                    }),
                    FieldKind::Ignore => None,
                }
            })
            .collect();

        if pushes.is_empty() {
            quote!(let _ = fields;)
        } else {
            quote!(#( #pushes )*)
        }
    }

    /// Walks the fields in order, shadowing `index` so each field sees it
    /// relative to its own first accessor.
    fn expand_accessors(&self, access: Access) -> TokenStream {
        let rowbind = &self.rowbind;

        let steps = self.record.fields.iter().filter_map(|field| {
            let ident = &field.ident;
            let ty = &field.ty;

            let get = match (&field.kind, access) {
                (FieldKind::Ignore, _) => return None,
                (FieldKind::Column(_), Access::SlotMut) => {
                    quote!(Some(<#ty as #rowbind::Column>::slot_mut(&mut self.#ident)))
                }
                (FieldKind::Column(_), Access::Value) => {
                    quote!(Some(<#ty as #rowbind::Column>::to_value(&self.#ident)))
                }
                (FieldKind::Flatten, Access::SlotMut) => {
                    quote!(<#ty as #rowbind::Record>::slot_mut(&mut self.#ident, index))
                }
                (FieldKind::Flatten, Access::Value) => {
                    quote!(<#ty as #rowbind::Record>::value(&self.#ident, index))
                }
            };

            let width = self.width(field)?;

            Some(quote! {
                if index < #width {
                    return #get;
                }
                let index = index - #width;
            })
        });

        quote! {
            #( #steps )*
            let _ = index;
            None
        }
    }
}

#[derive(Clone, Copy)]
enum Access {
    SlotMut,
    Value,
}

pub(super) fn record(record: &Record) -> TokenStream {
    Expand {
        record,
        rowbind: quote!(_rowbind::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use rowbind as _rowbind;
            #code
        };
    }
}
