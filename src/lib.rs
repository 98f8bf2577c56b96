//! sdkmodel - declarative data models for cloud SDK payloads
//!
//! - `schema`: model descriptors, type tags and the model registry
//! - `model`: records, hydration from wire JSON and projection back to it
//! - `catalog`: built-in descriptors (OCI KMS, OCI Operations Insights, Azure Authorization)
//! - `observability`: structured logging and decode diagnostics
//! - `cli`: the `sdkmodel` command line

pub mod catalog;
pub mod cli;
pub mod model;
pub mod observability;
pub mod schema;
