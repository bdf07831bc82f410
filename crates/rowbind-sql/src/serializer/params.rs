use super::{Formatter, ToSql};

use rowbind_core::stmt::Value;

/// Receives the positional arguments of a statement in placeholder order.
pub trait Params {
    fn push(&mut self, value: &Value);
}

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) {
        Vec::push(self, value.clone());
    }
}

/// Drops every argument. Used when only the SQL text is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Params for Discard {
    fn push(&mut self, _: &Value) {}
}

/// A bound argument renders as a `?` placeholder.
impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.params.push(self);
        f.push_char('?');
    }
}
