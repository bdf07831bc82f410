mod value;

use rowbind_core::{
    async_trait,
    driver::{Context, Cursor, Driver, Row, Rows},
    err,
    stmt::Value,
    Error, Result,
};
use rusqlite::{params_from_iter, Connection};
use url::Url;

use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

/// A [`Driver`] over one SQLite connection.
///
/// Statements run on the calling task; result sets are read in full before
/// the call returns.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<Connection>,
}

impl Sqlite {
    /// Opens a database from a `sqlite:` URL. `sqlite::memory:` opens a
    /// private in-memory database.
    pub fn new(url: impl Into<String>) -> Result<Sqlite> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_argument(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Sqlite::in_memory()
        } else {
            Sqlite::open(url.path())
        }
    }

    pub fn in_memory() -> Result<Sqlite> {
        let connection = Connection::open_in_memory().map_err(Error::driver)?;
        Ok(Sqlite::from_connection(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Sqlite> {
        let connection = Connection::open(path).map_err(Error::driver)?;
        Ok(Sqlite::from_connection(connection))
    }

    pub fn from_connection(connection: Connection) -> Sqlite {
        Sqlite {
            connection: Mutex::new(connection),
        }
    }

    /// Runs semicolon separated statements without parameters, e.g. schema
    /// setup.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.lock()?.execute_batch(sql).map_err(Error::driver)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| err!("sqlite connection poisoned by a panicking statement"))
    }

    fn check(cx: &Context, sql: &str) -> Result<()> {
        if cx.is_cancelled() {
            tracing::debug!(target: "rowbind::sqlite", sql, "cancelled before execution");
            return Err(err!("context cancelled"));
        }
        Ok(())
    }

    fn fetch(&self, sql: &str, args: &[Value], limit: Option<usize>) -> Result<Rows> {
        let connection = self.lock()?;
        let mut stmt = connection.prepare_cached(sql).map_err(Error::driver)?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();
        let mut buffered = Rows::new(columns);

        let mut rows = stmt
            .query(params_from_iter(args.iter().map(value::Value)))
            .map_err(Error::driver)?;

        while let Some(row) = rows.next().map_err(Error::driver)? {
            if limit.is_some_and(|limit| buffered.len() >= limit) {
                break;
            }

            let values = (0..width)
                .map(|index| row.get_ref(index).and_then(value::from_sql))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(Error::driver)?;

            buffered.push(values);
        }

        Ok(buffered)
    }
}

#[async_trait]
impl Driver for Sqlite {
    async fn query_row(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<Row> {
        Sqlite::check(cx, sql)?;

        self.fetch(sql, args, Some(1))?
            .pop_front()
            .ok_or_else(|| Error::record_not_found(format!("query returned no rows; sql={sql}")))
    }

    async fn query(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<Box<dyn Cursor>> {
        Sqlite::check(cx, sql)?;

        Ok(Box::new(self.fetch(sql, args, None)?))
    }

    async fn exec(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<u64> {
        Sqlite::check(cx, sql)?;

        let connection = self.lock()?;
        let mut stmt = connection.prepare_cached(sql).map_err(Error::driver)?;
        let count = stmt
            .execute(params_from_iter(args.iter().map(value::Value)))
            .map_err(Error::driver)?;

        Ok(count as u64)
    }
}

impl From<Connection> for Sqlite {
    fn from(connection: Connection) -> Sqlite {
        Sqlite::from_connection(connection)
    }
}
