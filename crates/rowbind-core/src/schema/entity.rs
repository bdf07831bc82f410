use super::{FieldDef, Record};
use crate::stmt::Type;

use std::collections::HashMap;

/// A field bound to a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    /// Column name used in SQL
    pub column: &'static str,

    /// Semantic type of the field
    pub ty: Type,

    /// Accessor of the field within the record
    pub accessor: usize,
}

/// The ordered column bindings of one record type.
///
/// Built on every cold compile and dropped afterwards.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    fields: Vec<FieldBinding>,

    /// Column name to position in `fields`. On duplicate column names the
    /// last declared field wins.
    by_name: HashMap<&'static str, usize>,
}

impl EntityDescriptor {
    /// Introspects `R`, keeping tagged fields, or every field under its
    /// declared name when `fallback` is set.
    pub fn extract<R: Record>(fallback: bool) -> EntityDescriptor {
        let mut defs = Vec::with_capacity(R::FIELD_COUNT);
        R::describe(&mut defs);
        EntityDescriptor::from_defs(&defs, fallback)
    }

    pub fn from_defs(defs: &[FieldDef], fallback: bool) -> EntityDescriptor {
        let mut fields = Vec::with_capacity(defs.len());
        let mut by_name = HashMap::with_capacity(defs.len());

        for (accessor, def) in defs.iter().enumerate() {
            let column = match (def.tag, fallback) {
                (Some(tag), _) => tag,
                (None, true) => def.name,
                (None, false) => continue,
            };

            by_name.insert(column, fields.len());
            fields.push(FieldBinding {
                column,
                ty: def.ty,
                accessor,
            });
        }

        EntityDescriptor { fields, by_name }
    }

    /// All bound columns in declaration order.
    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    pub fn field(&self, column: &str) -> Option<&FieldBinding> {
        self.by_name.get(column).map(|&index| &self.fields[index])
    }
}
