//! In-memory geometry source

use crate::domain::entities::GeometryHierarchy;
use crate::domain::errors::LoadError;
use crate::ports::outbound::GeometrySource;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves descriptions registered by file name.
#[derive(Debug, Default)]
pub struct InMemoryGeometrySource {
    files: RwLock<HashMap<String, GeometryHierarchy>>,
    loads: AtomicUsize,
}

impl InMemoryGeometrySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, file: impl Into<String>, hierarchy: GeometryHierarchy) -> Self {
        self.insert(file, hierarchy);
        self
    }

    pub fn insert(&self, file: impl Into<String>, hierarchy: GeometryHierarchy) {
        self.files.write().insert(file.into(), hierarchy);
    }

    pub fn remove(&self, file: &str) -> Option<GeometryHierarchy> {
        self.files.write().remove(file)
    }

    /// Number of `load` calls served so far, failed ones included.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl GeometrySource for InMemoryGeometrySource {
    fn load(&self, file: &str) -> Result<GeometryHierarchy, LoadError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        if file.is_empty() {
            return Err(LoadError::EmptyDescription);
        }
        self.files
            .read()
            .get(file)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                file: file.to_string(),
                search_path: "<memory>".to_string(),
            })
    }
}
