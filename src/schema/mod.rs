//! Model schema subsystem
//!
//! Every model type is described by a `ModelDescriptor`: an ordered list of
//! fields, each pairing a canonical snake_case name with its wire key and a
//! declared `TypeTag`.
//!
//! # Design Principles
//!
//! - Descriptors are pure metadata
//! - Registered once, never mutated afterwards
//! - Enum policy is declared per field
//! - Polymorphic families resolve subtypes through a discriminator field

mod errors;
mod registry;
mod types;

pub use errors::{ModelError, ModelErrorCode, ModelResult, Severity};
pub use registry::ModelRegistry;
pub use types::{Discriminator, EnumPolicy, FieldDef, ModelDescriptor, TypeTag, UNKNOWN_ENUM_VALUE};
