use super::{Column, ErrorSet};

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    pub(crate) kind: FieldKind,
}

#[derive(Debug)]
pub(crate) enum FieldKind {
    /// Binds to a single column, optionally named by `#[column("name")]`
    Column(Option<syn::LitStr>),

    /// `#[flatten]`: the fields of a nested record, numbered in place
    Flatten,

    /// `#[column(ignore)]`
    Ignore,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Field> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut column: Option<Column> = None;
        let mut flatten = false;

        for attr in &field.attrs {
            if attr.path().is_ident("column") {
                if column.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[column] attribute"));
                    continue;
                }

                match Column::from_ast(attr) {
                    Ok(attr) => column = Some(attr),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("flatten") {
                if let Err(err) = attr.meta.require_path_only() {
                    errs.push(err);
                } else if flatten {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[flatten] attribute"));
                }
                flatten = true;
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let kind = match column {
            Some(Column { ignore: true, .. }) => FieldKind::Ignore,
            Some(Column { name: Some(name), .. }) if flatten => {
                return Err(syn::Error::new_spanned(
                    name,
                    "a flattened field cannot have a column name",
                ));
            }
            _ if flatten => FieldKind::Flatten,
            Some(Column { name, .. }) => FieldKind::Column(name),
            None => FieldKind::Column(None),
        };

        Ok(Field {
            ident: ident.clone(),
            ty: field.ty.clone(),
            kind,
        })
    }
}
