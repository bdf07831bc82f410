mod column;
use column::Column;

mod error;
use error::ErrorSet;

mod field;
pub(crate) use field::{Field, FieldKind};

mod record;
pub(crate) use record::Record;
