use std::sync::Arc;

use tracing::{debug, warn};

use super::Source;
use crate::error::{Error, Result};
use crate::request::RequestManager;

/// Adapters available to a host, looked up by `SourceInfo::id`.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the bundled adapters named in `ids`, sharing one executor.
    pub fn with_sources(ids: &[String], manager: Arc<dyn RequestManager>) -> Result<Self> {
        let mut registry = Self::new();
        for id in ids {
            registry.register(crate::sources::build(id, manager.clone())?);
        }
        debug!(count = registry.len(), "Built source registry");
        Ok(registry)
    }

    /// Adds a source, replacing any previous one with the same id.
    pub fn register(&mut self, source: Arc<dyn Source>) {
        let id = source.info().id.clone();
        if let Some(slot) = self.sources.iter_mut().find(|s| s.info().id == id) {
            warn!(source = %id, "Replacing already registered source");
            *slot = source;
        } else {
            self.sources.push(source);
        }
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn Source>> {
        self.sources
            .iter()
            .find(|s| s.info().id == id)
            .cloned()
            .ok_or_else(|| Error::UnknownIdentifier {
                kind: "source",
                id: id.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
