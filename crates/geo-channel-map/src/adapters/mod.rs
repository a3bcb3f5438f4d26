//! Adapters for the channel map engine
//!
//! Geometry sources (JSON files, memory) and the synthetic detector generator.

pub mod in_memory;
pub mod json_source;
pub mod search_path;
pub mod synthetic;

pub use in_memory::InMemoryGeometrySource;
pub use json_source::JsonGeometrySource;
pub use search_path::{SearchPath, SEARCH_PATH_ENV};
pub use synthetic::SyntheticDetector;
