use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::clause::Clauses;

use serde::{Deserialize, Serialize};

/// How an insert treats rows that collide with an existing key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMode {
    /// `insert into`
    #[default]
    Insert,

    /// `insert ignore into`
    Ignore,

    /// `replace into`
    Replace,
}

#[derive(Debug, Clone)]
pub enum Statement<'a> {
    Select(Select<'a>),
    Insert(Insert<'a>),
    Update(Update<'a>),
    Delete(Delete<'a>),
}

#[derive(Debug, Clone)]
pub struct Select<'a> {
    pub table: &'a str,

    /// Selected columns; empty selects `*`.
    pub columns: Vec<&'a str>,

    pub clauses: &'a Clauses,
}

#[derive(Debug, Clone)]
pub struct Insert<'a> {
    pub table: &'a str,
    pub columns: Vec<&'a str>,

    /// Number of value tuples
    pub rows: usize,

    pub mode: InsertMode,
    pub clauses: &'a Clauses,
}

#[derive(Debug, Clone)]
pub struct Update<'a> {
    pub table: &'a str,
    pub columns: Vec<&'a str>,
    pub clauses: &'a Clauses,
}

#[derive(Debug, Clone)]
pub struct Delete<'a> {
    pub table: &'a str,
    pub clauses: &'a Clauses,
}

impl ToSql for &Statement<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Select<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "select ");

        if self.columns.is_empty() {
            fmt!(f, "*");
        } else {
            fmt!(f, Comma(self.columns.iter().map(Ident)));
        }

        fmt!(f, " from " Ident(self.table) self.clauses);
    }
}

impl ToSql for &Insert<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let verb = match self.mode {
            InsertMode::Insert => "insert into ",
            InsertMode::Ignore => "insert ignore into ",
            InsertMode::Replace => "replace into ",
        };

        let columns = Comma(self.columns.iter().map(Ident));
        let tuple = Tuple(self.columns.len());

        fmt!(f, verb Ident(self.table) " (" columns ") values " Comma((0..self.rows).map(|_| tuple)) self.clauses);
    }
}

impl ToSql for &Update<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let assignments = self.columns.iter().map(|column| Assignment(column));

        fmt!(f, "update " Ident(self.table) " set " Comma(assignments) self.clauses);
    }
}

impl ToSql for &Delete<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "delete from " Ident(self.table) self.clauses);
    }
}

/// `(?,?,..)` with one placeholder per column. The values are bound by the
/// caller.
#[derive(Clone, Copy)]
struct Tuple(usize);

impl ToSql for Tuple {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "(" Comma((0..self.0).map(|_| "?")) ")");
    }
}

/// `col=?` with the value bound by the caller.
struct Assignment<'a>(&'a str);

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(self.0) "=?");
    }
}
