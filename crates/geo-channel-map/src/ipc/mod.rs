//! IPC module for run-boundary notifications

pub mod handler;
pub mod payloads;

pub use handler::RunBoundaryHandler;
pub use payloads::{RunBoundary, RunBoundaryResponse};
