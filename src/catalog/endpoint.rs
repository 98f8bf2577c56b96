//! Resource endpoint descriptors
//!
//! A service is identified by its provider namespace and resource path.
//! Endpoints only build request paths; issuing requests is left to the
//! caller's HTTP client.

use serde::Serialize;

/// Provider-scoped REST collection and the models it exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceEndpoint {
    /// Provider namespace, e.g. `Microsoft.Authorization`
    pub provider: &'static str,
    /// Resource collection under the provider
    pub service: &'static str,
    pub api_version: &'static str,
    /// Model of a single resource
    pub model: &'static str,
    /// Model of a page of resources
    pub list_model: &'static str,
}

impl ResourceEndpoint {
    /// Path of the collection under `scope`, e.g. `/subscriptions/<id>`.
    pub fn collection_path(&self, scope: &str) -> String {
        format!(
            "{}/providers/{}/{}",
            scope.trim_end_matches('/'),
            self.provider,
            self.service
        )
    }

    /// Path of one named resource under `scope`.
    pub fn resource_path(&self, scope: &str, name: &str) -> String {
        format!("{}/{}", self.collection_path(scope), name)
    }

    /// Query string carrying the api version.
    pub fn query(&self) -> String {
        format!("api-version={}", self.api_version)
    }
}
