use super::{Formatter, Ident, Params, ToSql};

use crate::cond::{Cond, Group, Leaf};

impl ToSql for &Cond {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Cond::Leaf(leaf) => leaf.to_sql(f),
            Cond::Group(group) => group.to_sql(f),
        }
    }
}

impl ToSql for &Leaf {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let template: &str = &self.template;
        fmt!(f, self.column.as_deref().map(Ident) template);

        for arg in &self.args {
            f.params.push(arg);
        }
    }
}

impl ToSql for &Group {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let parens = f.depth > 0 && self.effective().nth(1).is_some();

        if parens {
            f.push_char('(');
        }

        f.depth += 1;

        let mut s = "";
        for child in self.effective() {
            fmt!(f, s child);
            s = self.combinator.as_sql();
        }

        f.depth -= 1;

        if parens {
            f.push_char(')');
        }
    }
}
