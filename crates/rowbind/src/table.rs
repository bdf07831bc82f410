use crate::{
    compile::{self, Op},
    dest::{self, Destination},
    mock::Outcome,
    CacheKey, Clauses, CompiledBinding, Config, Db, Reuse, Source,
};

use rowbind_core::{
    driver::{Context, Cursor, Row},
    stmt::Value,
    time, Error, Result,
};
use rowbind_sql::InsertMode;

use std::{future::Future, panic::Location, sync::Arc};

/// A named table of a [`Db`], carrying its own [`Config`].
///
/// Every operation records the source location it was called from. With
/// [`Reuse`] enabled that location keys the compiled statement, so the same
/// call site skips column resolution and SQL rendering on later calls. A call
/// site must then pass the same column list every time (or use
/// [`Reuse::Shape`]); a generic helper or a loop calling one site for several
/// tables must leave reuse off.
#[derive(Clone, Debug)]
pub struct Table {
    db: Db,
    name: Arc<str>,
    config: Config,
    cx: Context,
}

impl Table {
    pub(crate) fn new(db: Db, name: &str, config: Config) -> Table {
        Table {
            db,
            name: name.into(),
            config,
            cx: Context::background(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn with_config(mut self, config: Config) -> Table {
        self.config = config;
        self
    }

    pub fn reuse(mut self, reuse: Reuse) -> Table {
        self.config.reuse = reuse;
        self
    }

    pub fn debug(mut self, debug: bool) -> Table {
        self.config.debug = debug;
        self
    }

    pub fn field_name_fallback(mut self, fallback: bool) -> Table {
        self.config.field_name_fallback = fallback;
        self
    }

    pub fn insert_mode(mut self, mode: InsertMode) -> Table {
        self.config.insert_mode = mode;
        self
    }

    /// Shorthand for `insert_mode(InsertMode::Replace)`.
    pub fn replace_into(self) -> Table {
        self.insert_mode(InsertMode::Replace)
    }

    /// Shorthand for `insert_mode(InsertMode::Ignore)`.
    pub fn insert_ignore(self) -> Table {
        self.insert_mode(InsertMode::Ignore)
    }

    pub fn epoch_time(mut self, epoch_time: bool) -> Table {
        self.config.epoch_time = epoch_time;
        self
    }

    /// Context handed to the driver with every statement.
    pub fn context(mut self, cx: Context) -> Table {
        self.cx = cx;
        self
    }

    /// Reads rows into `dest`, returning the number of rows scanned.
    ///
    /// A single record, value or map destination reads at most one row and
    /// is left untouched when there is none (the count is then 0). `Vec`
    /// destinations have every row appended.
    ///
    /// ```no_run
    /// # async fn demo(users: rowbind::Table) -> rowbind::Result<()> {
    /// use rowbind::{eq, fields, filter};
    ///
    /// let mut name = String::new();
    /// users
    ///     .select(&mut name, [fields(["name"]), filter(eq("id", 1))])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[track_caller]
    pub fn select<'a, D, M, C>(
        &'a self,
        dest: D,
        clauses: C,
    ) -> impl Future<Output = Result<usize>> + 'a
    where
        D: Destination<M> + 'a,
        M: 'a,
        C: Into<Clauses> + 'a,
    {
        let site = Location::caller();
        async move { self.run_select(site, dest, clauses.into()).await }
    }

    /// Inserts every row of `source` with one statement, returning the
    /// affected row count.
    #[track_caller]
    pub fn insert<'a, S, M, C>(
        &'a self,
        source: S,
        clauses: C,
    ) -> impl Future<Output = Result<u64>> + 'a
    where
        S: Source<M> + 'a,
        M: 'a,
        C: Into<Clauses> + 'a,
    {
        let site = Location::caller();
        async move { self.run_insert(site, source, clauses.into()).await }
    }

    /// Writes the columns of one record or map to the rows matching the
    /// required `filter` clause.
    #[track_caller]
    pub fn update<'a, S, M, C>(
        &'a self,
        source: S,
        clauses: C,
    ) -> impl Future<Output = Result<u64>> + 'a
    where
        S: Source<M> + 'a,
        M: 'a,
        C: Into<Clauses> + 'a,
    {
        let site = Location::caller();
        async move { self.run_update(site, source, clauses.into()).await }
    }

    /// Deletes the rows matching the required `filter` clause.
    #[track_caller]
    pub fn delete<'a, C>(&'a self, clauses: C) -> impl Future<Output = Result<u64>> + 'a
    where
        C: Into<Clauses> + 'a,
    {
        let site = Location::caller();
        async move { self.run_delete(site, clauses.into()).await }
    }

    async fn run_select<D, M>(
        &self,
        site: &'static Location<'static>,
        mut dest: D,
        clauses: Clauses,
    ) -> Result<usize>
    where
        D: Destination<M>,
    {
        let fallback = self.config.field_name_fallback;
        let binding = self.binding(site, &clauses, 0, || {
            compile::select(&self.name, D::target(fallback), &clauses)
        })?;

        let mut args = vec![];
        clauses.collect_args(&mut args);
        self.finish_args(&mut args);
        self.log(Op::Select, &binding, &args);

        if D::MANY {
            let cursor: Box<dyn Cursor> = match self.mocked(site, Op::Select) {
                Some(Outcome::Rows(rows)) => Box::new(rows),
                Some(outcome) => return Err(self.mock_mismatch(Op::Select, outcome)),
                None => {
                    self.db
                        .driver()
                        .query(&self.cx, &binding.sql, &args)
                        .await?
                }
            };

            dest::materialize(&mut dest, &binding.plan, cursor).await
        } else {
            let row = match self.mocked(site, Op::Select) {
                Some(Outcome::Rows(mut rows)) => rows
                    .pop_front()
                    .ok_or_else(|| Error::record_not_found(format!("mocked select on `{}`", self.name))),
                Some(outcome) => return Err(self.mock_mismatch(Op::Select, outcome)),
                None => {
                    self.db
                        .driver()
                        .query_row(&self.cx, &binding.sql, &args)
                        .await
                }
            };

            self.accept_one(&mut dest, &binding, row)
        }
    }

    fn accept_one<D, M>(
        &self,
        dest: &mut D,
        binding: &CompiledBinding,
        row: Result<Row>,
    ) -> Result<usize>
    where
        D: Destination<M>,
    {
        match row {
            Ok(row) => {
                dest.accept(&binding.plan, row)?;
                Ok(1)
            }
            Err(err) if err.is_record_not_found() => Ok(0),
            Err(err) => Err(err),
        }
    }

    async fn run_insert<S, M>(
        &self,
        site: &'static Location<'static>,
        source: S,
        clauses: Clauses,
    ) -> Result<u64>
    where
        S: Source<M>,
    {
        if source.is_empty() {
            return Err(Error::invalid_argument(format!(
                "insert into `{}` needs at least one row",
                self.name
            )));
        }

        let rows = source.len();
        let fallback = self.config.field_name_fallback;
        let binding = self.binding(site, &clauses, rows, || {
            compile::insert(
                &self.name,
                &self.config,
                S::target(fallback),
                source.keys(),
                rows,
                &clauses,
            )
        })?;

        self.exec(site, Op::Insert, &binding, &source, &clauses)
            .await
    }

    async fn run_update<S, M>(
        &self,
        site: &'static Location<'static>,
        source: S,
        clauses: Clauses,
    ) -> Result<u64>
    where
        S: Source<M>,
    {
        if source.len() != 1 {
            return Err(Error::invalid_argument(format!(
                "update of `{}` takes exactly one row, got {}",
                self.name,
                source.len()
            )));
        }

        let fallback = self.config.field_name_fallback;
        let binding = self.binding(site, &clauses, 0, || {
            compile::update(&self.name, S::target(fallback), source.keys(), &clauses)
        })?;

        self.exec(site, Op::Update, &binding, &source, &clauses)
            .await
    }

    async fn run_delete(
        &self,
        site: &'static Location<'static>,
        clauses: Clauses,
    ) -> Result<u64> {
        let binding = self.binding(site, &clauses, 0, || {
            compile::delete(&self.name, &clauses)
        })?;

        let mut args = vec![];
        clauses.collect_args(&mut args);

        self.exec_args(site, Op::Delete, &binding, args).await
    }

    /// Binds the values of `source` followed by the clause arguments.
    async fn exec<S, M>(
        &self,
        site: &'static Location<'static>,
        op: Op,
        binding: &CompiledBinding,
        source: &S,
        clauses: &Clauses,
    ) -> Result<u64>
    where
        S: Source<M>,
    {
        let mut args = Vec::with_capacity(binding.plan.len() * source.len());
        source.push_args(&binding.plan, &mut args)?;
        clauses.collect_args(&mut args);

        self.exec_args(site, op, binding, args).await
    }

    async fn exec_args(
        &self,
        site: &'static Location<'static>,
        op: Op,
        binding: &CompiledBinding,
        mut args: Vec<Value>,
    ) -> Result<u64> {
        self.finish_args(&mut args);
        self.log(op, binding, &args);

        match self.mocked(site, op) {
            Some(Outcome::Affected(count)) => Ok(count),
            Some(outcome) => Err(self.mock_mismatch(op, outcome)),
            None => {
                self.db
                    .driver()
                    .exec(&self.cx, &binding.sql, &args)
                    .await
            }
        }
    }

    /// Returns the compiled binding for this call, from the store when the
    /// table reuses bindings.
    fn binding(
        &self,
        site: &'static Location<'static>,
        clauses: &Clauses,
        rows: usize,
        compile: impl FnOnce() -> Result<CompiledBinding>,
    ) -> Result<Arc<CompiledBinding>> {
        let key = match self.config.reuse {
            Reuse::Off => return compile().map(Arc::new),
            Reuse::CallSite => CacheKey {
                site,
                shape: None,
                rows,
            },
            Reuse::Shape => CacheKey {
                site,
                shape: clauses.fields().map(Into::into),
                rows,
            },
        };

        let store = self.db.store();

        if let Some(binding) = store.get(&key) {
            tracing::trace!(target: "rowbind", table = %self.name, %site, "binding cache hit");
            return Ok(binding);
        }

        tracing::trace!(target: "rowbind", table = %self.name, %site, "binding cache miss");

        let binding = Arc::new(compile()?);
        store.put(key, binding.clone());

        tracing::trace!(target: "rowbind", table = %self.name, %site, sql = %binding.sql, "binding stored");

        Ok(binding)
    }

    /// Times are bound as text, or as epoch seconds with `epoch_time`.
    fn finish_args(&self, args: &mut [Value]) {
        for arg in args {
            if let Value::Time(instant) = arg {
                let secs = time::epoch_secs(*instant);
                *arg = if self.config.epoch_time {
                    Value::I64(secs)
                } else {
                    Value::String(time::format_epoch(secs))
                };
            }
        }
    }

    fn log(&self, op: Op, binding: &CompiledBinding, args: &[Value]) {
        if self.config.debug {
            tracing::debug!(
                target: "rowbind",
                table = %self.name,
                op = op.as_str(),
                sql = %binding.sql,
                ?args,
                "statement"
            );
        }
    }

    fn mocked(&self, site: &Location<'_>, op: Op) -> Option<Outcome> {
        let outcome = self.db.mocks()?.take(&self.name, op.as_str(), site)?;

        tracing::trace!(target: "rowbind", table = %self.name, op = op.as_str(), %site, "mocked");

        Some(outcome)
    }

    fn mock_mismatch(&self, op: Op, outcome: Outcome) -> Error {
        match outcome {
            Outcome::Error(err) => err,
            outcome => Error::mock(format!(
                "{} on `{}` cannot return {outcome:?}",
                op.as_str(),
                self.name
            )),
        }
    }
}
