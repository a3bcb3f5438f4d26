//! Description search path
//!
//! Colon-separated directory list, read from `GEO_SEARCH_PATH` by default.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the default search path.
pub const SEARCH_PATH_ENV: &str = "GEO_SEARCH_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `dir1:dir2:...` list; empty entries are ignored.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(':').filter(|s| !s.is_empty()))
    }

    /// Search path from `GEO_SEARCH_PATH`; empty when unset.
    pub fn from_env() -> Self {
        env::var(SEARCH_PATH_ENV)
            .map(|list| Self::parse(&list))
            .unwrap_or_default()
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Locate `file`. Absolute paths are returned as-is when they exist;
    /// relative names are tried against each directory in order.
    pub fn find_file(&self, file: &str) -> Option<PathBuf> {
        let path = Path::new(file);
        if path.is_absolute() {
            return path.is_file().then(|| path.to_path_buf());
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dirs: Vec<_> = self.dirs.iter().map(|d| d.display().to_string()).collect();
        f.write_str(&dirs.join(":"))
    }
}
