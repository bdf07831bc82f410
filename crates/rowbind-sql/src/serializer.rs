#[macro_use]
mod fmt;
pub(crate) use fmt::ToSql;

mod delim;
use delim::Comma;

mod ident;
use ident::Ident;

mod params;
pub use params::{Discard, Params};

// Fragment serializers
mod clause;
mod cond;
mod statement;
pub use statement::{Delete, Insert, InsertMode, Select, Statement, Update};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone)]
pub struct Serializer {
    /// Character wrapped around bare identifiers
    quote: char,
}

pub(crate) struct Formatter<'a, P> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL. `None` when only the parameters are
    /// of interest.
    dst: Option<&'a mut String>,

    /// Where to store parameters
    params: &'a mut P,

    /// Current condition nesting depth. Groups below the top level are
    /// parenthesized.
    depth: usize,
}

impl Serializer {
    /// A serializer quoting identifiers with backticks.
    pub fn new() -> Serializer {
        Serializer { quote: '`' }
    }

    pub fn with_quote(quote: char) -> Serializer {
        Serializer { quote }
    }

    /// Renders `stmt`, pushing the arguments of its clauses into `params`.
    ///
    /// Insert and update value placeholders are rendered but not pushed; the
    /// caller binds those from its source ahead of the clause arguments.
    pub fn serialize(&self, stmt: &Statement<'_>, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: Some(&mut ret),
            params,
            depth: 0,
        };

        stmt.to_sql(&mut fmt);

        ret
    }
}

impl Default for Serializer {
    fn default() -> Serializer {
        Serializer::new()
    }
}

impl<'a, P: Params> Formatter<'a, P> {
    /// A formatter that only collects parameters.
    pub(crate) fn discard(serializer: &'a Serializer, params: &'a mut P) -> Formatter<'a, P> {
        Formatter {
            serializer,
            dst: None,
            params,
            depth: 0,
        }
    }

    fn push_str(&mut self, s: &str) {
        if let Some(dst) = self.dst.as_mut() {
            dst.push_str(s);
        }
    }

    fn push_char(&mut self, c: char) {
        if let Some(dst) = self.dst.as_mut() {
            dst.push(c);
        }
    }
}
