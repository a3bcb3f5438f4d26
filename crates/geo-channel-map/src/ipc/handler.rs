//! Run-boundary handler
//!
//! Feeds detector-identity changes from the data stream into the geometry
//! provider. A failed reload is fatal only when no geometry is published.

use crate::domain::errors::GeometryError;
use crate::domain::value_objects::DetectorIdentityChanged;
use crate::ipc::payloads::{RunBoundary, RunBoundaryResponse};
use crate::ports::inbound::GeometryApi;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, error, info, warn};

pub struct RunBoundaryHandler<P: GeometryApi> {
    provider: Arc<P>,
}

impl<P: GeometryApi> RunBoundaryHandler<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Handle one run boundary.
    pub fn handle(&self, boundary: &RunBoundary) -> RunBoundaryResponse {
        debug!(run = boundary.run, detector = ?boundary.detector_name, "[geo] Run boundary");

        match self.provider.notify(DetectorIdentityChanged::from(boundary)) {
            Ok(outcome) => RunBoundaryResponse {
                run: boundary.run,
                success: true,
                outcome: Some(outcome),
                detector_name: self.provider.detector_name(),
                error: None,
            },
            Err(e) => {
                warn!(run = boundary.run, error = %e, "[geo] Run boundary handling failed");
                RunBoundaryResponse {
                    run: boundary.run,
                    success: false,
                    outcome: None,
                    detector_name: self.provider.detector_name(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

impl<P: GeometryApi + 'static> RunBoundaryHandler<P> {
    /// Handle boundaries until the channel closes. Returns the number of
    /// boundaries handled, or the first error that left the provider with
    /// no geometry.
    ///
    /// Reloads read and sort a whole description, so each one runs on the
    /// blocking pool; a reload that panics counts as a failed reload.
    pub async fn listen(&self, mut rx: mpsc::Receiver<RunBoundary>) -> Result<usize, GeometryError> {
        info!("[geo] Run boundary listener started");
        let mut handled = 0usize;

        while let Some(boundary) = rx.recv().await {
            let provider = Arc::clone(&self.provider);
            let event = DetectorIdentityChanged::from(&boundary);
            let result = task::spawn_blocking(move || provider.notify(event))
                .await
                .unwrap_or_else(|e| Err(GeometryError::ReloadTask(e.to_string())));

            match result {
                Ok(outcome) => {
                    debug!(run = boundary.run, ?outcome, "[geo] Run boundary handled");
                }
                Err(e) if self.provider.current().is_ok() => {
                    warn!(run = boundary.run, error = %e, "[geo] Reload failed; continuing with previous geometry");
                }
                Err(e) => {
                    error!(run = boundary.run, error = %e, "[geo] No geometry available; stopping listener");
                    return Err(e);
                }
            }
            handled += 1;
        }

        info!(handled, "[geo] Run boundary listener stopped");
        Ok(handled)
    }
}
