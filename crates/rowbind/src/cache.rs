//! Compiled bindings, keyed by call site.
//!
//! A compiled binding is the SQL text of one statement plus the plan that
//! moves values between that statement and the caller's memory. Plans refer
//! to fields by accessor index, never by address, so a cached binding applies
//! to whatever destination the current call passes.

use rowbind_core::stmt::Type;

use dashmap::DashMap;
use serde::Deserialize;

use std::{fmt, panic::Location, sync::Arc};

/// Whether, and how precisely, a table caches compiled bindings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reuse {
    /// Compile on every call
    #[default]
    Off,

    /// One binding per call site. The caller must pass the same column list
    /// every time it reaches that site.
    CallSite,

    /// One binding per call site and explicit column list
    Shape,
}

/// Identifies one cached binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Source location of the operation call
    pub site: &'static Location<'static>,

    /// The explicit column list, under [`Reuse::Shape`]
    pub shape: Option<Box<[String]>>,

    /// Value tuple count of an insert; zero for other statements
    pub rows: usize,
}

#[derive(Debug, PartialEq)]
pub struct CompiledBinding {
    /// Final SQL text, reused verbatim
    pub sql: Box<str>,

    /// One entry per selected column (select) or bound column (insert,
    /// update), in SQL order
    pub plan: Box<[PlanEntry]>,
}

/// Where one column's value lives in the caller's memory.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEntry {
    /// A record field
    Field {
        column: &'static str,
        accessor: usize,
        ty: Type,
    },

    /// A map entry
    Key(Box<str>),
}

/// Storage for compiled bindings.
///
/// Entries are replaced wholesale; concurrent first callers at one key may
/// both compile and the last `put` wins.
pub trait BindingStore: fmt::Debug + Send + Sync + 'static {
    fn get(&self, key: &CacheKey) -> Option<Arc<CompiledBinding>>;

    fn put(&self, key: CacheKey, binding: Arc<CompiledBinding>);
}

/// The default store: an unbounded concurrent map shared by every table of a
/// [`Db`](crate::Db).
#[derive(Debug, Default)]
pub struct SharedStore {
    entries: DashMap<CacheKey, Arc<CompiledBinding>>,
}

impl SharedStore {
    pub fn new() -> SharedStore {
        SharedStore::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl BindingStore for SharedStore {
    fn get(&self, key: &CacheKey) -> Option<Arc<CompiledBinding>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: CacheKey, binding: Arc<CompiledBinding>) {
        self.entries.insert(key, binding);
    }
}

impl<S: BindingStore> BindingStore for Arc<S> {
    fn get(&self, key: &CacheKey) -> Option<Arc<CompiledBinding>> {
        (**self).get(key)
    }

    fn put(&self, key: CacheKey, binding: Arc<CompiledBinding>) {
        (**self).put(key, binding)
    }
}
