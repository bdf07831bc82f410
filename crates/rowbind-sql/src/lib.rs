pub mod clause;
pub use clause::{Assign, Clause, Clauses, Limit};

pub mod cond;
pub use cond::Cond;

pub mod serializer;
pub use serializer::{
    Delete, Discard, Insert, InsertMode, Params, Select, Serializer, Statement, Update,
};
