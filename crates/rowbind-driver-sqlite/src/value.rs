use rowbind_core::{stmt, time};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// A rowbind value bound as a SQLite parameter.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a stmt::Value);

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value::*;

        let integer = |v: i64| Ok(ToSqlOutput::Owned(SqlValue::Integer(v)));

        match self.0 {
            Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Bool(v) => integer(i64::from(*v)),
            I8(v) => integer(i64::from(*v)),
            I16(v) => integer(i64::from(*v)),
            I32(v) => integer(i64::from(*v)),
            I64(v) => integer(*v),
            U8(v) => integer(i64::from(*v)),
            U16(v) => integer(i64::from(*v)),
            U32(v) => integer(i64::from(*v)),
            // Stored as the same 64 bits; scanning back into a u64 restores it.
            U64(v) => integer(*v as i64),
            F32(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(f64::from(*v)))),
            F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            Time(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(time::format_epoch(
                time::epoch_secs(*v),
            )))),
        }
    }
}

/// Converts a column value read from SQLite. Values keep their storage
/// class; the scanner coerces them into the destination.
pub(crate) fn from_sql(value: ValueRef<'_>) -> rusqlite::Result<stmt::Value> {
    Ok(match value {
        ValueRef::Null => stmt::Value::Null,
        ValueRef::Integer(v) => stmt::Value::I64(v),
        ValueRef::Real(v) => stmt::Value::F64(v),
        ValueRef::Text(v) => match std::str::from_utf8(v) {
            Ok(text) => stmt::Value::String(text.to_string()),
            Err(err) => return Err(rusqlite::Error::Utf8Error(err)),
        },
        ValueRef::Blob(v) => stmt::Value::Bytes(v.to_vec()),
    })
}
