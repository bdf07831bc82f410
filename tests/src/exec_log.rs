use rowbind::Value;

use std::sync::{Arc, Mutex};

/// One statement as the driver received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Exec {
    pub sql: String,
    pub args: Vec<Value>,
}

/// A handle on the statements a [`LoggingDriver`](crate::LoggingDriver)
/// has seen.
#[derive(Debug, Clone)]
pub struct ExecLog {
    execs: Arc<Mutex<Vec<Exec>>>,
}

impl ExecLog {
    pub(crate) fn new(execs: Arc<Mutex<Vec<Exec>>>) -> Self {
        Self { execs }
    }

    pub fn len(&self) -> usize {
        self.execs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.execs.lock().unwrap().is_empty()
    }

    /// Removes and returns the oldest logged statement.
    #[track_caller]
    pub fn pop(&self) -> Exec {
        let mut execs = self.execs.lock().unwrap();
        assert!(!execs.is_empty(), "no statement was logged");
        execs.remove(0)
    }

    /// SQL text of the oldest logged statement, removing it.
    #[track_caller]
    pub fn pop_sql(&self) -> String {
        self.pop().sql
    }

    pub fn clear(&self) {
        self.execs.lock().unwrap().clear();
    }

    /// Number of logged statements whose SQL starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.execs
            .lock()
            .unwrap()
            .iter()
            .filter(|exec| exec.sql.starts_with(prefix))
            .count()
    }
}
