mod column;
pub use column::{Column, SlotMut};

mod entity;
pub use entity::{EntityDescriptor, FieldBinding};

use crate::stmt::{Type, Value};

/// A struct whose fields bind to table columns.
///
/// Implemented by `#[derive(Record)]`. Fields are numbered in declaration
/// order; a `#[flatten]` field contributes the fields of the nested record in
/// place and `#[column(ignore)]` fields are not numbered at all. The field
/// number is the accessor used by compiled binding plans, so plans stay valid
/// for every instance of the type.
pub trait Record: Default + Send + 'static {
    /// Number of bindable fields, including flattened ones.
    const FIELD_COUNT: usize;

    /// Pushes one [`FieldDef`] per bindable field, in accessor order.
    fn describe(fields: &mut Vec<FieldDef>);

    /// Mutable access to the field with the given accessor.
    fn slot_mut(&mut self, index: usize) -> Option<SlotMut<'_>>;

    /// Reads the field with the given accessor.
    fn value(&self, index: usize) -> Option<Value>;
}

/// Static description of one bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Declared Rust field name
    pub name: &'static str,

    /// Column name from `#[column("...")]`
    pub tag: Option<&'static str>,

    /// Semantic type of the field
    pub ty: Type,
}
