mod exec_log;
pub use exec_log::{Exec, ExecLog};

mod logging_driver;
pub use logging_driver::LoggingDriver;

pub mod schema;

use rowbind::{db, Db};
use rowbind_driver_sqlite::Sqlite;

use std::sync::Once;

/// A fresh in-memory database plus the log of every statement sent to it.
pub struct Setup {
    pub db: Db,
    pub log: ExecLog,
}

/// Opens an in-memory SQLite database, runs `schema` and wraps the driver in
/// a [`LoggingDriver`].
pub fn setup(schema: &str) -> Setup {
    setup_with(&mut Db::builder(), schema)
}

pub fn setup_with(builder: &mut db::Builder, schema: &str) -> Setup {
    init_tracing();

    let sqlite = Sqlite::in_memory().unwrap();
    sqlite.execute_batch(schema).unwrap();

    let driver = LoggingDriver::new(sqlite);
    let log = driver.log();

    Setup {
        db: builder.build(driver),
        log,
    }
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, once per process.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
