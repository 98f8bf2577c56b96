//! Model registry
//!
//! Holds every model descriptor by name. Descriptors come from the built-in
//! catalog, from direct registration, or from `*.json` files in a directory
//! (one descriptor per file). A registered descriptor is never replaced.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::errors::{ModelError, ModelResult};
use super::types::ModelDescriptor;
use crate::catalog;

/// In-memory table of model descriptors, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<ModelDescriptor>>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in catalog.
    pub fn builtin() -> ModelResult<Self> {
        let mut registry = Self::new();
        for descriptor in catalog::descriptors() {
            registry.register(descriptor)?;
        }
        registry.validate_references()?;
        Ok(registry)
    }

    /// Registers a descriptor after validating its structure.
    pub fn register(&mut self, descriptor: ModelDescriptor) -> ModelResult<()> {
        descriptor
            .validate_structure()
            .map_err(|e| ModelError::malformed(&descriptor.name, e))?;

        if self.models.contains_key(&descriptor.name) {
            return Err(ModelError::DescriptorImmutable(descriptor.name));
        }

        self.models
            .insert(descriptor.name.clone(), Arc::new(descriptor));
        Ok(())
    }

    /// Loads every `*.json` descriptor file in `dir`.
    ///
    /// Returns the number of descriptors loaded. A missing directory loads
    /// nothing.
    pub fn load_dir(&mut self, dir: &Path) -> ModelResult<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            ModelError::malformed(
                dir.display().to_string(),
                format!("Failed to read descriptor directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ModelError::malformed(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }

        // Directory order is platform dependent
        paths.sort();
        for path in &paths {
            self.load_file(path)?;
        }

        Ok(paths.len())
    }

    /// Loads a single descriptor file.
    pub fn load_file(&mut self, path: &Path) -> ModelResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            ModelError::malformed(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let descriptor: ModelDescriptor = serde_json::from_str(&content).map_err(|e| {
            ModelError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        self.register(descriptor)
    }

    /// Checks that every referenced model is registered.
    pub fn validate_references(&self) -> ModelResult<()> {
        for descriptor in self.models.values() {
            for name in descriptor.referenced_models() {
                if !self.models.contains_key(name) {
                    return Err(ModelError::UnknownModel(name.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Gets a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&Arc<ModelDescriptor>> {
        self.models.get(name)
    }

    /// Gets a descriptor by name, failing with `UnknownModel`.
    pub fn require(&self, name: &str) -> ModelResult<&Arc<ModelDescriptor>> {
        self.get(name)
            .ok_or_else(|| ModelError::UnknownModel(name.to_string()))
    }

    /// Checks if a model is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
