use crate::Reuse;

use rowbind_sql::InsertMode;

use serde::Deserialize;

/// Per-table settings.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// let config: rowbind::Config = serde_json::from_str(r#"{ "debug": true }"#).unwrap();
/// assert!(config.debug);
/// assert_eq!(config.reuse, rowbind::Reuse::Off);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Binding cache mode
    pub reuse: Reuse,

    /// Log every final SQL text and argument list at `DEBUG`
    pub debug: bool,

    /// Bind untagged record fields under their declared name
    pub field_name_fallback: bool,

    /// Insert, insert-ignore or replace
    pub insert_mode: InsertMode,

    /// Bind times as integer epoch seconds instead of
    /// `YYYY-MM-DD HH:MM:SS` text
    pub epoch_time: bool,
}
