use crate::{Exec, ExecLog};

use rowbind::{async_trait, Context, Cursor, Driver, Result, Row, Value};
use rowbind_driver_sqlite::Sqlite;

use std::sync::{Arc, Mutex};

/// Records every statement before handing it to SQLite.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Sqlite,

    /// Shared with every [`ExecLog`] handed out
    execs: Arc<Mutex<Vec<Exec>>>,
}

impl LoggingDriver {
    pub fn new(inner: Sqlite) -> Self {
        Self {
            inner,
            execs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.execs.clone())
    }

    fn record(&self, sql: &str, args: &[Value]) {
        self.execs.lock().unwrap().push(Exec {
            sql: sql.to_string(),
            args: args.to_vec(),
        });
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn query_row(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<Row> {
        self.record(sql, args);
        self.inner.query_row(cx, sql, args).await
    }

    async fn query(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<Box<dyn Cursor>> {
        self.record(sql, args);
        self.inner.query(cx, sql, args).await
    }

    async fn exec(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<u64> {
        self.record(sql, args);
        self.inner.exec(cx, sql, args).await
    }
}
