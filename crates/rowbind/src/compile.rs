//! Cold path: resolves columns and renders the SQL of one operation.

use crate::{dest::Target, CompiledBinding, Config, PlanEntry};

use rowbind_core::{schema::EntityDescriptor, Error, Result};
use rowbind_sql::{
    Clauses, Delete, Discard, Insert, Select, Serializer, Statement, Update,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Select,
    Insert,
    Update,
    Delete,
}

impl Op {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Op::Select => "select",
            Op::Insert => "insert",
            Op::Update => "update",
            Op::Delete => "delete",
        }
    }
}

pub(crate) fn select(table: &str, target: Target, clauses: &Clauses) -> Result<CompiledBinding> {
    reject_upsert(Op::Select, clauses)?;

    let (columns, plan) = match target {
        Target::Record(entity) => record_columns(table, &entity, clauses.fields())?,
        Target::Scalar(_) => match clauses.fields() {
            Some([column]) => (vec![column.as_str()], vec![]),
            _ => {
                return Err(Error::invalid_argument(
                    "a single column select needs exactly one column in `fields`",
                ))
            }
        },
        Target::Map => {
            let columns = clauses
                .fields()
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .collect();
            (columns, vec![])
        }
    };

    let stmt = Statement::Select(Select {
        table,
        columns,
        clauses,
    });

    Ok(finish(&stmt, plan))
}

pub(crate) fn insert(
    table: &str,
    config: &Config,
    target: Target,
    keys: Option<Vec<&str>>,
    rows: usize,
    clauses: &Clauses,
) -> Result<CompiledBinding> {
    if let Some(keyword) = clauses.row_clause() {
        return Err(Error::invalid_argument(format!(
            "`{keyword}` does not apply to insert"
        )));
    }

    let (columns, plan) = source_columns(table, target, keys, clauses)?;

    let stmt = Statement::Insert(Insert {
        table,
        columns,
        rows,
        mode: config.insert_mode,
        clauses,
    });

    Ok(finish(&stmt, plan))
}

pub(crate) fn update(
    table: &str,
    target: Target,
    keys: Option<Vec<&str>>,
    clauses: &Clauses,
) -> Result<CompiledBinding> {
    reject_upsert(Op::Update, clauses)?;
    require_filter(Op::Update, clauses)?;

    let (columns, plan) = source_columns(table, target, keys, clauses)?;

    let stmt = Statement::Update(Update {
        table,
        columns,
        clauses,
    });

    Ok(finish(&stmt, plan))
}

pub(crate) fn delete(table: &str, clauses: &Clauses) -> Result<CompiledBinding> {
    reject_upsert(Op::Delete, clauses)?;
    require_filter(Op::Delete, clauses)?;

    let stmt = Statement::Delete(Delete { table, clauses });

    Ok(finish(&stmt, vec![]))
}

fn finish(stmt: &Statement<'_>, plan: Vec<PlanEntry>) -> CompiledBinding {
    let sql = Serializer::new().serialize(stmt, &mut Discard);

    CompiledBinding {
        sql: sql.into(),
        plan: plan.into(),
    }
}

/// Columns of a record, narrowed to `fields` when given.
fn record_columns<'a>(
    table: &str,
    entity: &EntityDescriptor,
    fields: Option<&'a [String]>,
) -> Result<(Vec<&'a str>, Vec<PlanEntry>)> {
    let bindings = match fields {
        Some(fields) => fields
            .iter()
            .map(|name| {
                entity.field(name).ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "table `{table}` has no bound field for column `{name}`"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        None => entity.fields().iter().collect(),
    };

    if bindings.is_empty() {
        return Err(Error::invalid_argument(format!(
            "no columns to bind for table `{table}`"
        )));
    }

    let columns = bindings.iter().map(|field| field.column).collect();
    let plan = bindings
        .iter()
        .map(|field| PlanEntry::Field {
            column: field.column,
            accessor: field.accessor,
            ty: field.ty,
        })
        .collect();

    Ok((columns, plan))
}

/// Columns written by an insert or update.
///
/// Maps write their own keys, or the keys listed in `fields` that the map
/// has, in list order.
fn source_columns<'a>(
    table: &str,
    target: Target,
    keys: Option<Vec<&'a str>>,
    clauses: &'a Clauses,
) -> Result<(Vec<&'a str>, Vec<PlanEntry>)> {
    match target {
        Target::Record(entity) => record_columns(table, &entity, clauses.fields()),
        Target::Scalar(_) => Err(Error::invalid_argument(
            "a single value cannot be inserted or updated",
        )),
        Target::Map => {
            let keys = keys.unwrap_or_default();

            let columns: Vec<&str> = match clauses.fields() {
                Some(fields) => fields
                    .iter()
                    .map(String::as_str)
                    .filter(|name| keys.contains(name))
                    .collect(),
                None => keys,
            };

            if columns.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "no columns to bind for table `{table}`"
                )));
            }

            let plan = columns
                .iter()
                .map(|column| PlanEntry::Key((*column).into()))
                .collect();

            Ok((columns, plan))
        }
    }
}

fn reject_upsert(op: Op, clauses: &Clauses) -> Result<()> {
    if clauses.has_upsert() {
        return Err(Error::invalid_argument(format!(
            "`on_upsert` only applies to insert, not {}",
            op.as_str()
        )));
    }
    Ok(())
}

fn require_filter(op: Op, clauses: &Clauses) -> Result<()> {
    if !clauses.has_filter() {
        return Err(Error::invalid_argument(format!(
            "{} requires a `filter` clause",
            op.as_str()
        )));
    }
    Ok(())
}
