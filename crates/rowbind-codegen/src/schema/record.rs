use super::{ErrorSet, Field};

#[derive(Debug)]
pub(crate) struct Record {
    /// Struct identifier
    pub(crate) ident: syn::Ident,

    /// Generics, passed through to the generated impl
    pub(crate) generics: syn::Generics,

    /// Fields in declaration order
    pub(crate) fields: Vec<Field>,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Record> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "Record structs must have named fields",
            ));
        };

        let mut errs = ErrorSet::new();
        let mut fields = vec![];

        for field in &node.named {
            match Field::from_ast(field) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Record {
            ident: ast.ident.clone(),
            generics: ast.generics.clone(),
            fields,
        })
    }
}
