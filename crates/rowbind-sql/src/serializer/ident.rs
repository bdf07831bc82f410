use super::{Formatter, Params, ToSql};

/// A table or column name.
///
/// Names containing `(`, a backtick or a space are treated as expressions
/// (aggregates, pre-quoted or ordered terms) and emitted as-is.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let name = self.0.as_ref();

        if is_expression(name) {
            f.push_str(name);
        } else {
            let quote = f.serializer.quote;
            f.push_char(quote);
            f.push_str(name);
            f.push_char(quote);
        }
    }
}

fn is_expression(name: &str) -> bool {
    name.contains(['(', '`', ' '])
}
