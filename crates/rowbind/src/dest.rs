//! Destinations of a select.
//!
//! A destination is one of six shapes: a record, a `Vec` of records, a `Vec`
//! of boxed records, a single column value, a [`Map`] or a `Vec` of maps. The
//! shape is picked from the type of the `&mut` passed to
//! [`Table::select`](crate::Table::select); the marker parameter keeps the
//! implementations apart and is always inferred.

use crate::{scan, Map, PlanEntry};

use rowbind_core::{
    driver::{Cursor, Row},
    err,
    schema::EntityDescriptor,
    stmt::Type,
    Column, Error, Record, Result,
};

/// Shape markers.
pub mod marker {
    pub enum One {}
    pub enum Many {}
    pub enum Boxed {}
    pub enum Scalar {}
    pub enum Map {}
    pub enum Maps {}
}

/// What a destination or source binds to, as seen by the statement compiler.
#[derive(Debug)]
pub enum Target {
    Record(EntityDescriptor),
    Scalar(Type),
    Map,
}

pub trait Destination<M>: Send {
    /// `true` for sequence shapes, which read every row. Other shapes read
    /// at most one.
    const MANY: bool;

    fn target(field_name_fallback: bool) -> Target;

    /// Scans one row. Sequence shapes append a new element; other shapes
    /// overwrite in place.
    fn accept(&mut self, plan: &[PlanEntry], row: Row) -> Result<()>;
}

impl<R: Record> Destination<marker::One> for &mut R {
    const MANY: bool = false;

    fn target(fallback: bool) -> Target {
        Target::Record(EntityDescriptor::extract::<R>(fallback))
    }

    fn accept(&mut self, plan: &[PlanEntry], row: Row) -> Result<()> {
        scan_record(&mut **self, plan, row)
    }
}

impl<R: Record> Destination<marker::Many> for &mut Vec<R> {
    const MANY: bool = true;

    fn target(fallback: bool) -> Target {
        Target::Record(EntityDescriptor::extract::<R>(fallback))
    }

    fn accept(&mut self, plan: &[PlanEntry], row: Row) -> Result<()> {
        let mut record = R::default();
        scan_record(&mut record, plan, row)?;
        self.push(record);
        Ok(())
    }
}

impl<R: Record> Destination<marker::Boxed> for &mut Vec<Box<R>> {
    const MANY: bool = true;

    fn target(fallback: bool) -> Target {
        Target::Record(EntityDescriptor::extract::<R>(fallback))
    }

    fn accept(&mut self, plan: &[PlanEntry], row: Row) -> Result<()> {
        let mut record = Box::<R>::default();
        scan_record(&mut *record, plan, row)?;
        self.push(record);
        Ok(())
    }
}

impl<T: Column + Send> Destination<marker::Scalar> for &mut T {
    const MANY: bool = false;

    fn target(_: bool) -> Target {
        Target::Scalar(T::TYPE)
    }

    fn accept(&mut self, _: &[PlanEntry], row: Row) -> Result<()> {
        let value = row.values.into_iter().next().unwrap_or_default();
        scan::assign(self.slot_mut(), value)
    }
}

impl Destination<marker::Map> for &mut Map {
    const MANY: bool = false;

    fn target(_: bool) -> Target {
        Target::Map
    }

    fn accept(&mut self, _: &[PlanEntry], row: Row) -> Result<()> {
        scan_map(self, row);
        Ok(())
    }
}

impl Destination<marker::Maps> for &mut Vec<Map> {
    const MANY: bool = true;

    fn target(_: bool) -> Target {
        Target::Map
    }

    fn accept(&mut self, _: &[PlanEntry], row: Row) -> Result<()> {
        let mut map = Map::with_capacity(row.len());
        scan_map(&mut map, row);
        self.push(map);
        Ok(())
    }
}

fn scan_record<R: Record>(record: &mut R, plan: &[PlanEntry], row: Row) -> Result<()> {
    for (entry, value) in plan.iter().zip(row.values) {
        let PlanEntry::Field {
            column,
            accessor,
            ty,
        } = entry
        else {
            return Err(err!("map plan entry applied to a record"));
        };

        let Some(slot) = record.slot_mut(*accessor) else {
            return Err(err!("no field at accessor {accessor} for column `{column}`"));
        };
        debug_assert_eq!(slot.ty(), *ty);

        scan::assign(slot, value).map_err(|e| e.context(err!("column `{column}`")))?;
    }

    Ok(())
}

/// Maps keep the driver's values as-is.
fn scan_map(map: &mut Map, row: Row) {
    for (column, value) in row.columns.iter().zip(row.values) {
        map.insert(column.clone(), value);
    }
}

/// Reads every row of `cursor` into `dest`.
///
/// Stops at the first failing row; the error then carries the number of rows
/// already materialized (see [`Error::partial_count`]). The cursor is closed
/// on every path.
pub(crate) async fn materialize<D, M>(
    dest: &mut D,
    plan: &[PlanEntry],
    mut cursor: Box<dyn Cursor>,
) -> Result<usize>
where
    D: Destination<M>,
{
    let mut count = 0;

    let result = loop {
        match cursor.next().await {
            Ok(Some(row)) => match dest.accept(plan, row) {
                Ok(()) => count += 1,
                Err(err) => break Err(err),
            },
            Ok(None) => break Ok(()),
            Err(err) => break Err(err),
        }
    };

    let closed = cursor.close().await;

    match result {
        Ok(()) => closed.map(|()| count),
        Err(err) => Err(err.context(Error::partial_result(count))),
    }
}
