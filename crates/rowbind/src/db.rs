mod builder;
pub use builder::Builder;

use crate::{mock::Mocks, BindingStore, Config, SharedStore, Table};

use rowbind_core::Driver;

use std::sync::Arc;

/// Shared state between all `Db` clones.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) store: Box<dyn BindingStore>,
    pub(crate) mocks: Option<Mocks>,

    /// Configuration every new table starts from
    pub(crate) config: Config,
}

/// A database handle: a driver plus the binding store shared by every table
/// opened from it. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    /// A handle over `driver` with the default store and configuration.
    pub fn new(driver: impl Driver) -> Db {
        Db::builder().build(driver)
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Opens the table `name` with the handle's default configuration.
    pub fn table(&self, name: &str) -> Table {
        Table::new(self.clone(), name, self.shared.config.clone())
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub fn store(&self) -> &dyn BindingStore {
        &*self.shared.store
    }

    pub(crate) fn mocks(&self) -> Option<&Mocks> {
        self.shared.mocks.as_ref()
    }

    pub(crate) fn from_parts(
        driver: Arc<dyn Driver>,
        store: Option<Box<dyn BindingStore>>,
        mocks: Option<Mocks>,
        config: Config,
    ) -> Db {
        let store = store.unwrap_or_else(|| Box::new(SharedStore::new()));

        tracing::debug!(target: "rowbind", ?driver, ?store, mocked = mocks.is_some(), "db opened");

        Db {
            shared: Arc::new(Shared {
                driver,
                store,
                mocks,
                config,
            }),
        }
    }
}
