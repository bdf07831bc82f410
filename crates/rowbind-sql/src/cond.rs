//! Predicate trees.
//!
//! A [`Cond`] is either a leaf (a column, an operator template containing `?`
//! placeholders and the values bound to them) or an `and`/`or` group of
//! further conditions. Rendering produces the SQL fragment and the flattened
//! argument list in a single left-to-right pass.

use rowbind_core::stmt::Value;

use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    Leaf(Leaf),
    Group(Group),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Column the template applies to. `None` for tautologies and unsafe
    /// fragments, which are emitted as-is.
    pub column: Option<String>,

    /// SQL following the column, with one `?` per argument
    pub template: Cow<'static, str>,

    pub args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub combinator: Combinator,
    pub children: Vec<Cond>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::And => " and ",
            Self::Or => " or ",
        }
    }
}

impl Cond {
    fn leaf(column: impl Into<String>, template: &'static str, args: Vec<Value>) -> Cond {
        Cond::Leaf(Leaf {
            column: Some(column.into()),
            template: Cow::Borrowed(template),
            args,
        })
    }

    /// A condition that always holds and binds nothing.
    pub fn always() -> Cond {
        Cond::Leaf(Leaf {
            column: None,
            template: Cow::Borrowed("1=1"),
            args: vec![],
        })
    }

    /// Inserts caller-provided SQL and arguments verbatim.
    ///
    /// The text is not validated or escaped in any way; never build it from
    /// untrusted input.
    pub fn unsafe_fragment(sql: impl Into<String>, args: Vec<Value>) -> Cond {
        Cond::Leaf(Leaf {
            column: None,
            template: Cow::Owned(sql.into()),
            args,
        })
    }

    /// Returns `true` if the condition renders no SQL, i.e. it is a group
    /// without any non-empty descendants.
    pub fn is_empty(&self) -> bool {
        match self {
            Cond::Leaf(_) => false,
            Cond::Group(group) => group.children.iter().all(Cond::is_empty),
        }
    }
}

impl Group {
    /// Children that render SQL.
    pub(crate) fn effective(&self) -> impl Iterator<Item = &Cond> {
        self.children.iter().filter(|child| !child.is_empty())
    }
}

pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Cond {
    Cond::leaf(column, "=?", vec![value.into()])
}

pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Cond {
    Cond::leaf(column, "<>?", vec![value.into()])
}

pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Cond {
    Cond::leaf(column, ">?", vec![value.into()])
}

pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Cond {
    Cond::leaf(column, ">=?", vec![value.into()])
}

pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Cond {
    Cond::leaf(column, "<?", vec![value.into()])
}

pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Cond {
    Cond::leaf(column, "<=?", vec![value.into()])
}

pub fn between(
    column: impl Into<String>,
    low: impl Into<Value>,
    high: impl Into<Value>,
) -> Cond {
    Cond::leaf(column, " between ? and ?", vec![low.into(), high.into()])
}

pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Cond {
    Cond::leaf(column, " like ?", vec![pattern.into()])
}

/// Set membership.
///
/// No values yields [`Cond::always`]; a single value is the same as [`eq`].
pub fn in_list<I>(column: impl Into<String>, values: I) -> Cond
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut args: Vec<Value> = values.into_iter().map(Into::into).collect();

    match args.len() {
        0 => Cond::always(),
        1 => eq(column, args.remove(0)),
        len => {
            let mut template = String::with_capacity(len * 2 + 5);
            template.push_str(" in (");
            for i in 0..len {
                if i > 0 {
                    template.push(',');
                }
                template.push('?');
            }
            template.push(')');

            Cond::Leaf(Leaf {
                column: Some(column.into()),
                template: Cow::Owned(template),
                args,
            })
        }
    }
}

pub fn and(children: impl IntoIterator<Item = Cond>) -> Cond {
    Cond::Group(Group {
        combinator: Combinator::And,
        children: children.into_iter().collect(),
    })
}

pub fn or(children: impl IntoIterator<Item = Cond>) -> Cond {
    Cond::Group(Group {
        combinator: Combinator::Or,
        children: children.into_iter().collect(),
    })
}
