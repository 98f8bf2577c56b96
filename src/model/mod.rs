//! Model instances and the hydrate / project pipeline
//!
//! raw JSON -> `Hydrator` (alias resolution, conversion, enum guard) ->
//! `Record` -> `Record::to_json` -> raw JSON

mod convert;
mod hydrate;
mod project;
mod record;
mod value;

pub use convert::{convert_value, json_type_name};
pub use hydrate::Hydrator;
pub use project::project;
pub use record::Record;
pub use value::FieldValue;
