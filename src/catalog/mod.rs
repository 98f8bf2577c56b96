//! Built-in model catalog
//!
//! - `kms`: OCI Key Management
//! - `opsi`: OCI Operations Insights
//! - `authorization`: Azure role assignments and definitions

pub mod authorization;
mod endpoint;
pub mod kms;
pub mod opsi;

pub use endpoint::ResourceEndpoint;

/// Every built-in descriptor.
pub fn descriptors() -> Vec<crate::schema::ModelDescriptor> {
    let mut all = kms::descriptors();
    all.extend(opsi::descriptors());
    all.extend(authorization::descriptors());
    all
}

/// Every built-in resource endpoint.
pub fn endpoints() -> Vec<ResourceEndpoint> {
    vec![authorization::ROLE_ASSIGNMENTS, authorization::ROLE_DEFINITIONS]
}

/// Endpoints whose single or list model is `model`.
pub fn endpoints_for(model: &str) -> Vec<ResourceEndpoint> {
    endpoints()
        .into_iter()
        .filter(|endpoint| endpoint.model == model || endpoint.list_model == model)
        .collect()
}
