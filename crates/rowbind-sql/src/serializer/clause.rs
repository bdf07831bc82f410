use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::clause::{Assign, Clauses, Limit};

use rowbind_core::stmt::Value;

/// Everything after the table: where, group by, having, order by, limit and
/// upsert, in that order. The column list is part of each statement skeleton.
impl ToSql for &Clauses {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(filter) = self.filter.as_ref().filter(|cond| !cond.is_empty()) {
            fmt!(f, " where " filter);
        }

        if let Some(columns) = &self.group_by {
            fmt!(f, " group by " Comma(columns.iter().map(Ident)));
        }

        if let Some(having) = self.having.as_ref().filter(|cond| !cond.is_empty()) {
            fmt!(f, " having " having);
        }

        if let Some(terms) = &self.order_by {
            fmt!(f, " order by " Comma(terms.iter().map(Ident)));
        }

        if let Some(limit) = &self.limit {
            fmt!(f, " limit " limit);
        }

        if let Some(assignments) = &self.upsert {
            let assignments = assignments
                .iter()
                .map(|(column, assign)| Assignment(column, assign));
            fmt!(f, " on duplicate key update " Comma(assignments));
        }
    }
}

impl ToSql for &Limit {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(offset) = self.offset {
            fmt!(f, &Value::U64(offset) ",");
        }

        fmt!(f, &Value::U64(self.count));
    }
}

struct Assignment<'a>(&'a str, &'a Assign);

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(self.0) "=");

        match self.1 {
            Assign::Value(value) => value.to_sql(f),
            Assign::Unsafe(sql) => f.push_str(sql),
        }
    }
}
