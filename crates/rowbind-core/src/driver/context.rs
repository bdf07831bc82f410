use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Per-call context handed to the driver unchanged.
///
/// rowbind itself never inspects it; drivers may check
/// [`Context::is_cancelled`] before issuing a statement.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancelled: Option<Arc<AtomicBool>>,
}

/// Cancels the [`Context`] it was created with.
#[derive(Debug, Clone)]
pub struct Cancel(Arc<AtomicBool>);

impl Context {
    /// A context that is never cancelled.
    pub fn background() -> Context {
        Context::default()
    }

    /// A context paired with a handle that cancels it.
    pub fn cancellable() -> (Context, Cancel) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Context {
                cancelled: Some(flag.clone()),
            },
            Cancel(flag),
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }
}

impl Cancel {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}
