//! Sources of an insert or update: a record, a slice or `Vec` of records, a
//! [`Map`] or a slice or `Vec` of maps.

use crate::{
    dest::{marker, Target},
    Map, PlanEntry,
};

use rowbind_core::{err, schema::EntityDescriptor, stmt::Value, Error, Record, Result};

pub trait Source<M>: Sync {
    fn target(field_name_fallback: bool) -> Target;

    /// Number of rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of the first map. `None` for record sources.
    fn keys(&self) -> Option<Vec<&str>> {
        None
    }

    /// Appends the values of every row, row by row, in plan order.
    fn push_args(&self, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()>;
}

impl<R: Record + Sync> Source<marker::One> for &R {
    fn target(fallback: bool) -> Target {
        Target::Record(EntityDescriptor::extract::<R>(fallback))
    }

    fn len(&self) -> usize {
        1
    }

    fn push_args(&self, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()> {
        record_args(*self, plan, args)
    }
}

impl<R: Record + Sync> Source<marker::Many> for &[R] {
    fn target(fallback: bool) -> Target {
        Target::Record(EntityDescriptor::extract::<R>(fallback))
    }

    fn len(&self) -> usize {
        <[R]>::len(self)
    }

    fn push_args(&self, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()> {
        self.iter()
            .try_for_each(|record| record_args(record, plan, args))
    }
}

impl<R: Record + Sync> Source<marker::Many> for &Vec<R> {
    fn target(fallback: bool) -> Target {
        <&[R] as Source<marker::Many>>::target(fallback)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn push_args(&self, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()> {
        Source::<marker::Many>::push_args(&self.as_slice(), plan, args)
    }
}

impl Source<marker::Map> for &Map {
    fn target(_: bool) -> Target {
        Target::Map
    }

    fn len(&self) -> usize {
        1
    }

    fn keys(&self) -> Option<Vec<&str>> {
        Some(Map::keys(self).map(String::as_str).collect())
    }

    fn push_args(&self, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()> {
        map_args(0, self, plan, args)
    }
}

impl Source<marker::Maps> for &[Map] {
    fn target(_: bool) -> Target {
        Target::Map
    }

    fn len(&self) -> usize {
        <[Map]>::len(self)
    }

    fn keys(&self) -> Option<Vec<&str>> {
        let first = self.first()?;
        Some(first.keys().map(String::as_str).collect())
    }

    fn push_args(&self, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()> {
        self.iter()
            .enumerate()
            .try_for_each(|(row, map)| map_args(row, map, plan, args))
    }
}

impl Source<marker::Maps> for &Vec<Map> {
    fn target(_: bool) -> Target {
        Target::Map
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn keys(&self) -> Option<Vec<&str>> {
        let first = self.first()?;
        Some(first.keys().map(String::as_str).collect())
    }

    fn push_args(&self, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()> {
        Source::<marker::Maps>::push_args(&self.as_slice(), plan, args)
    }
}

fn record_args<R: Record>(record: &R, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()> {
    for entry in plan {
        let PlanEntry::Field {
            column, accessor, ..
        } = entry
        else {
            return Err(err!("map plan entry applied to a record"));
        };

        let value = record
            .value(*accessor)
            .ok_or_else(|| err!("no field at accessor {accessor} for column `{column}`"))?;
        args.push(value);
    }

    Ok(())
}

fn map_args(row: usize, map: &Map, plan: &[PlanEntry], args: &mut Vec<Value>) -> Result<()> {
    for entry in plan {
        let PlanEntry::Key(key) = entry else {
            return Err(err!("record plan entry applied to a map"));
        };

        let value = map.get(&**key).ok_or_else(|| {
            Error::invalid_argument(format!("row {row} has no value for column `{key}`"))
        })?;
        args.push(value.clone());
    }

    Ok(())
}
