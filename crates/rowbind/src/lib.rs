extern crate self as rowbind;

mod cache;
pub use cache::{BindingStore, CacheKey, CompiledBinding, PlanEntry, Reuse, SharedStore};

mod compile;

mod config;
pub use config::Config;

pub mod db;
pub use db::Db;

pub mod dest;
pub use dest::Destination;

pub mod mock;

mod scan;

pub mod source;
pub use source::Source;

pub mod table;
pub use table::Table;

pub use rowbind_core::{
    async_trait, bail,
    driver::{self, Context, Cursor, Driver, Row, Rows},
    err,
    stmt::{Type, Value},
    time, Column, Error, Record, Result,
};
pub use rowbind_macros::Record;
pub use rowbind_sql::{
    clause::{fields, filter, group_by, having, limit, limit_offset, on_upsert, order_by},
    cond::{and, between, eq, gt, gte, in_list, like, lt, lte, ne, or},
    Assign, Clause, Clauses, Cond, InsertMode,
};

/// An ordered column → value map, usable as a destination and as a source.
pub type Map = indexmap::IndexMap<String, Value>;

/// Builds a [`Map`] from `key => value` pairs, preserving their order.
///
/// ```
/// let row = rowbind::map! { "name" => "alice", "age" => 30 };
/// assert_eq!(row.keys().collect::<Vec<_>>(), ["name", "age"]);
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::Map::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        map
    }};
}

#[doc(hidden)]
pub mod codegen_support {
    pub use rowbind_core::{
        schema::{FieldDef, SlotMut},
        stmt::Value,
        Column, Record,
    };
}
