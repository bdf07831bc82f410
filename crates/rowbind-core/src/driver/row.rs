use super::Cursor;
use crate::{async_trait, stmt::Value, Result};

use std::{collections::VecDeque, sync::Arc};

/// One result row: column names shared across the result set plus the row's
/// values in select-list order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub columns: Arc<[String]>,
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Row {
        debug_assert_eq!(columns.len(), values.len());
        Row { columns, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.values.get(index)
    }
}

/// A fully buffered result set, usable as a [`Cursor`].
#[derive(Debug, Default)]
pub struct Rows {
    columns: Arc<[String]>,
    rows: VecDeque<Vec<Value>>,
}

impl Rows {
    pub fn new<I, S>(columns: I) -> Rows
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rows {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: VecDeque::new(),
        }
    }

    /// Appends a row. Panics if the row width does not match the columns.
    #[track_caller]
    pub fn push(&mut self, values: Vec<Value>) -> &mut Self {
        assert_eq!(
            self.columns.len(),
            values.len(),
            "row width does not match column count"
        );
        self.rows.push_back(values);
        self
    }

    pub fn with_row(mut self, values: Vec<Value>) -> Self {
        self.push(values);
        self
    }

    pub fn columns(&self) -> &Arc<[String]> {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes and returns the first row.
    pub fn pop_front(&mut self) -> Option<Row> {
        let values = self.rows.pop_front()?;
        Some(Row::new(self.columns.clone(), values))
    }
}

#[async_trait]
impl Cursor for Rows {
    async fn next(&mut self) -> Result<Option<Row>> {
        Ok(self.pop_front())
    }
}
