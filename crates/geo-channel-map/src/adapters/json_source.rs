//! JSON geometry descriptions on disk

use super::search_path::SearchPath;
use crate::domain::entities::GeometryHierarchy;
use crate::domain::errors::LoadError;
use crate::ports::outbound::GeometrySource;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads `GeometryHierarchy` JSON files found through a [`SearchPath`].
#[derive(Debug, Clone, Default)]
pub struct JsonGeometrySource {
    search_path: SearchPath,
}

impl JsonGeometrySource {
    pub fn new(search_path: SearchPath) -> Self {
        Self { search_path }
    }

    /// Source over `GEO_SEARCH_PATH`.
    pub fn from_env() -> Self {
        Self::new(SearchPath::from_env())
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Write `hierarchy` as pretty-printed JSON.
    pub fn write(path: impl AsRef<Path>, hierarchy: &GeometryHierarchy) -> Result<(), LoadError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(hierarchy).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

impl GeometrySource for JsonGeometrySource {
    fn load(&self, file: &str) -> Result<GeometryHierarchy, LoadError> {
        if file.is_empty() {
            return Err(LoadError::EmptyDescription);
        }
        let path = self
            .search_path
            .find_file(file)
            .ok_or_else(|| LoadError::NotFound {
                file: file.to_string(),
                search_path: self.search_path.to_string(),
            })?;

        debug!(path = %path.display(), "[geo] Reading geometry description");
        let content = fs::read_to_string(&path).map_err(|e| LoadError::Io {
            path: path.clone(),
            error: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| LoadError::Parse {
            path,
            error: e.to_string(),
        })
    }
}
