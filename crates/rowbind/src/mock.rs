//! Scripted outcomes for tests.
//!
//! A [`Mocks`] set installed on a [`Db`](crate::Db) is consulted before every
//! driver call. The first rule whose patterns match the table name, the
//! operation name and the caller's source location is consumed and its
//! outcome returned in place of the driver's. Calls no rule matches reach the
//! driver.

use crate::Rows;

use rowbind_core::{Error, Result};

use std::{
    collections::VecDeque,
    panic::Location,
    sync::{Arc, Mutex, PoisonError},
};

#[derive(Debug, Clone, Default)]
pub struct Mocks {
    rules: Arc<Mutex<VecDeque<Rule>>>,
}

/// One scripted outcome.
#[derive(Debug)]
pub struct Rule {
    table: String,
    op: String,
    caller: String,
    outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    /// Rows returned to a select. An empty set makes a single-row select
    /// report no record.
    Rows(Rows),

    /// Affected row count of an insert, update or delete
    Affected(u64),

    /// Returned as the operation's error
    Error(Error),
}

impl Rule {
    /// Matches `table` and `op` (`select`, `insert`, `update` or `delete`)
    /// against wildcard patterns, from any caller.
    pub fn new(table: impl Into<String>, op: impl Into<String>, outcome: Outcome) -> Rule {
        Rule {
            table: table.into(),
            op: op.into(),
            caller: "*".to_string(),
            outcome,
        }
    }

    /// Restricts the rule to callers whose `file:line:column` matches
    /// `pattern`.
    pub fn caller(mut self, pattern: impl Into<String>) -> Rule {
        self.caller = pattern.into();
        self
    }

    fn matches(&self, table: &str, op: &str, caller: &str) -> bool {
        wildcard(&self.table, table) && wildcard(&self.op, op) && wildcard(&self.caller, caller)
    }
}

impl Mocks {
    pub fn new() -> Mocks {
        Mocks::default()
    }

    pub fn push(&self, rule: Rule) -> &Self {
        self.lock().push_back(rule);
        self
    }

    /// Removes and returns the outcome of the first matching rule.
    pub fn take(&self, table: &str, op: &str, caller: &Location<'_>) -> Option<Outcome> {
        let caller = caller.to_string();
        let mut rules = self.lock();

        let index = rules
            .iter()
            .position(|rule| rule.matches(table, op, &caller))?;

        rules.remove(index).map(|rule| rule.outcome)
    }

    pub fn remaining(&self) -> usize {
        self.lock().len()
    }

    /// Fails if any rule was never consumed.
    pub fn verify(&self) -> Result<()> {
        let rules = self.lock();

        if rules.is_empty() {
            return Ok(());
        }

        let pending = rules
            .iter()
            .map(|rule| format!("{}/{}/{}", rule.table, rule.op, rule.caller))
            .collect::<Vec<_>>()
            .join(", ");

        Err(Error::mock(format!("unconsumed rules: {pending}")))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Rule>> {
        // A panicking test must not poison the rules of the next one.
        self.rules.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `*` matches any run of characters, everything else compares ASCII
/// case-insensitively.
fn wildcard(pattern: &str, text: &str) -> bool {
    let pattern = pattern.as_bytes();
    let text = text.as_bytes();

    let (mut p, mut t) = (0, 0);
    // Position of the last `*` seen and the text position it was tried at.
    let mut star = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p].eq_ignore_ascii_case(&text[t]) {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&b| b == b'*')
}
