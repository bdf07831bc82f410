use crate::{
    cond::{self, Cond},
    serializer::{Formatter, Params, ToSql},
    Serializer,
};

use rowbind_core::stmt::Value;

/// One clause passed to an operation.
///
/// Clauses may be given in any order; they are always rendered as
/// fields → table → where → group by → having → order by → limit → upsert.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Explicit column list
    Fields(Vec<String>),
    Where(Cond),
    GroupBy(Vec<String>),
    Having(Cond),
    OrderBy(Vec<String>),
    Limit(Limit),
    /// Update-on-conflict assignments of an insert
    OnUpsert(Vec<(String, Assign)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: Option<u64>,
    pub count: u64,
}

/// Right-hand side of an upsert assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Assign {
    /// Bound as an argument
    Value(Value),

    /// Emitted verbatim, e.g. `age+1`. Never built from untrusted input.
    Unsafe(String),
}

impl Assign {
    pub fn value(value: impl Into<Value>) -> Assign {
        Assign::Value(value.into())
    }

    pub fn unsafe_fragment(sql: impl Into<String>) -> Assign {
        Assign::Unsafe(sql.into())
    }
}

impl From<Value> for Assign {
    fn from(value: Value) -> Assign {
        Assign::Value(value)
    }
}

/// The clauses of one operation call, slotted by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses {
    pub(crate) fields: Option<Vec<String>>,
    pub(crate) filter: Option<Cond>,
    pub(crate) group_by: Option<Vec<String>>,
    pub(crate) having: Option<Cond>,
    pub(crate) order_by: Option<Vec<String>>,
    pub(crate) limit: Option<Limit>,
    pub(crate) upsert: Option<Vec<(String, Assign)>>,
}

impl Clauses {
    pub fn new() -> Clauses {
        Clauses::default()
    }

    /// Adds a clause. A repeated `Where` or `Having` is combined with the
    /// previous one using `and`; any other repeated kind replaces the earlier
    /// clause.
    pub fn push(&mut self, clause: Clause) -> &mut Self {
        match clause {
            Clause::Fields(fields) => self.fields = Some(fields),
            Clause::Where(cond) => self.filter = Some(merge(self.filter.take(), cond)),
            Clause::GroupBy(columns) => self.group_by = Some(columns),
            Clause::Having(cond) => self.having = Some(merge(self.having.take(), cond)),
            Clause::OrderBy(columns) => self.order_by = Some(columns),
            Clause::Limit(limit) => self.limit = Some(limit),
            Clause::OnUpsert(assignments) => self.upsert = Some(assignments),
        }
        self
    }

    pub fn with(mut self, clause: Clause) -> Self {
        self.push(clause);
        self
    }

    /// The explicit column list, if one was given.
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Returns `true` if a `Where` clause that renders SQL is present.
    pub fn has_filter(&self) -> bool {
        self.filter.as_ref().is_some_and(|filter| !filter.is_empty())
    }

    pub fn has_upsert(&self) -> bool {
        self.upsert.is_some()
    }

    /// Keyword of the first clause present that matches or orders existing
    /// rows: `where`, `group by`, `having`, `order by` or `limit`.
    pub fn row_clause(&self) -> Option<&'static str> {
        if self.has_filter() {
            Some("where")
        } else if self.group_by.is_some() {
            Some("group by")
        } else if self.having.as_ref().is_some_and(|having| !having.is_empty()) {
            Some("having")
        } else if self.order_by.is_some() {
            Some("order by")
        } else if self.limit.is_some() {
            Some("limit")
        } else {
            None
        }
    }

    /// Appends the arguments of every clause, in the order their
    /// placeholders appear in the rendered SQL.
    pub fn collect_args(&self, params: &mut impl Params) {
        let serializer = Serializer::new();
        let mut f = Formatter::discard(&serializer, params);
        self.to_sql(&mut f);
    }
}

fn merge(prev: Option<Cond>, next: Cond) -> Cond {
    match prev {
        Some(prev) => cond::and([prev, next]),
        None => next,
    }
}

impl From<Clause> for Clauses {
    fn from(clause: Clause) -> Clauses {
        Clauses::new().with(clause)
    }
}

impl From<Vec<Clause>> for Clauses {
    fn from(clauses: Vec<Clause>) -> Clauses {
        clauses.into_iter().fold(Clauses::new(), Clauses::with)
    }
}

impl<const N: usize> From<[Clause; N]> for Clauses {
    fn from(clauses: [Clause; N]) -> Clauses {
        clauses.into_iter().fold(Clauses::new(), Clauses::with)
    }
}

impl From<()> for Clauses {
    fn from(_: ()) -> Clauses {
        Clauses::new()
    }
}

fn names<I>(columns: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    columns.into_iter().map(Into::into).collect()
}

/// Restricts the operation to the listed columns.
pub fn fields<I>(columns: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Clause::Fields(names(columns))
}

/// The `where` clause.
pub fn filter(cond: Cond) -> Clause {
    Clause::Where(cond)
}

pub fn group_by<I>(columns: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Clause::GroupBy(names(columns))
}

pub fn having(cond: Cond) -> Clause {
    Clause::Having(cond)
}

/// Ordering terms; a term containing a space, such as `"id desc"`, is
/// emitted verbatim.
pub fn order_by<I>(columns: I) -> Clause
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Clause::OrderBy(names(columns))
}

pub fn limit(count: u64) -> Clause {
    Clause::Limit(Limit {
        offset: None,
        count,
    })
}

pub fn limit_offset(offset: u64, count: u64) -> Clause {
    Clause::Limit(Limit {
        offset: Some(offset),
        count,
    })
}

pub fn on_upsert<I, K>(assignments: I) -> Clause
where
    I: IntoIterator<Item = (K, Assign)>,
    K: Into<String>,
{
    Clause::OnUpsert(
        assignments
            .into_iter()
            .map(|(column, assign)| (column.into(), assign))
            .collect(),
    )
}
