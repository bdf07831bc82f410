mod context;
pub use context::{Cancel, Context};

mod row;
pub use row::{Row, Rows};

use crate::{async_trait, stmt::Value, Result};

use std::fmt::Debug;

/// The database transport.
///
/// Every method receives the final SQL text, its positional arguments and the
/// caller's [`Context`]. Implementations own pooling, transactions and
/// timeouts; callers of this trait never retry.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Runs a query expected to return at most one row.
    ///
    /// Returns [`Error::record_not_found`](crate::Error::record_not_found)
    /// when the result set is empty.
    async fn query_row(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<Row>;

    /// Runs a query returning any number of rows.
    async fn query(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<Box<dyn Cursor>>;

    /// Runs a statement, returning the number of affected rows.
    async fn exec(&self, cx: &Context, sql: &str, args: &[Value]) -> Result<u64>;
}

/// A forward-only row cursor.
#[async_trait]
pub trait Cursor: Send {
    async fn next(&mut self) -> Result<Option<Row>>;

    /// Releases the cursor. Called exactly once, whether or not iteration
    /// completed.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
