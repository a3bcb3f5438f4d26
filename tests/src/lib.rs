//! # Wire Geometry Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared detector and provider builders
//! └── integration/      # Cross-module scenarios
//!     ├── end_to_end.rs     # Load, sort, map, query
//!     ├── selection.rs      # Detector identity → channel map variant
//!     ├── reload.rs         # Run boundaries, atomic reloads, stale handles
//!     ├── determinism.rs    # Sibling order independence
//!     ├── concurrency.rs    # Readers during reloads
//!     └── json_pipeline.rs  # Descriptions on disk via the search path
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p geo-tests
//!
//! # By category
//! cargo test -p geo-tests integration::reload::
//!
//! # Benchmarks
//! cargo bench -p geo-tests
//! ```

pub mod fixtures;
