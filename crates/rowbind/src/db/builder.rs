use super::Db;
use crate::{mock::Mocks, BindingStore, Config};

use rowbind_core::Driver;

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    store: Option<Box<dyn BindingStore>>,
    mocks: Option<Mocks>,
    config: Config,
}

impl Builder {
    /// Replaces the default [`SharedStore`](crate::SharedStore).
    pub fn store(&mut self, store: impl BindingStore) -> &mut Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Consults `mocks` before every driver call.
    pub fn mocks(&mut self, mocks: Mocks) -> &mut Self {
        self.mocks = Some(mocks);
        self
    }

    /// Configuration tables opened from the handle start with.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn build(&mut self, driver: impl Driver) -> Db {
        self.build_shared(Arc::new(driver))
    }

    /// Like [`build`](Builder::build), for a driver already behind an `Arc`.
    pub fn build_shared(&mut self, driver: Arc<dyn Driver>) -> Db {
        Db::from_parts(
            driver,
            self.store.take(),
            self.mocks.take(),
            self.config.clone(),
        )
    }
}
