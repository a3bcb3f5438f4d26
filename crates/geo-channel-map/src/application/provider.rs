//! Geometry provider
//!
//! Owns the published geometry and channel map. Loads are serialized by a
//! reload lock; the new state is built completely before it replaces the
//! old one under the write lock, so readers see either the previous or the
//! new geometry, never a mix.

use crate::application::helper::StandardGeometryHelper;
use crate::config::GeometryConfig;
use crate::domain::errors::{ConfigError, GeometryError};
use crate::domain::value_objects::{
    DetectorIdentityChanged, GeometryDescription, ReloadOutcome, NO_DETECTOR_NAME,
};
use crate::ports::inbound::{ChannelMapHandle, GeometryApi, LoadedGeometry};
use crate::ports::outbound::{ExperimentHelper, GeometrySource};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct GeometryProvider {
    config: GeometryConfig,
    source: Arc<dyn GeometrySource>,
    helper: Arc<dyn ExperimentHelper>,
    state: RwLock<Option<Arc<LoadedGeometry>>>,
    reload: Mutex<()>,
    /// Generation of the published state; 0 before the first load
    live_generation: Arc<AtomicU64>,
}

impl GeometryProvider {
    /// Provider using the standard detector selector. Nothing is loaded yet.
    pub fn new(
        config: GeometryConfig,
        source: Arc<dyn GeometrySource>,
    ) -> Result<Self, GeometryError> {
        Self::with_helper(config, source, Arc::new(StandardGeometryHelper::new()))
    }

    pub fn with_helper(
        config: GeometryConfig,
        source: Arc<dyn GeometrySource>,
        helper: Arc<dyn ExperimentHelper>,
    ) -> Result<Self, GeometryError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            helper,
            state: RwLock::new(None),
            reload: Mutex::new(()),
            live_generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Provider with the configured detector already loaded.
    pub fn start(
        config: GeometryConfig,
        source: Arc<dyn GeometrySource>,
    ) -> Result<Self, GeometryError> {
        let provider = Self::new(config, source)?;
        provider.load_geometry(provider.config.initial_description())?;
        Ok(provider)
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.live_generation.load(Ordering::Acquire)
    }

    fn build(
        &self,
        description: &GeometryDescription,
        generation: u64,
    ) -> Result<LoadedGeometry, GeometryError> {
        let file = self.config.resolve_file(&description.file);
        let hierarchy = self.source.load(&file)?;
        if hierarchy.detector_name.to_lowercase() != description.detector_name {
            debug!(
                requested = %description.detector_name,
                described = %hierarchy.detector_name,
                "[geo] Description names a different detector"
            );
        }

        let selection =
            self.helper
                .configure(&description.detector_name, &self.config, &hierarchy)?;
        let (geometry, channel_map) = match selection {
            Some(selection) => (Some(selection.geometry), Some(selection.channel_map)),
            None if self.config.require_channel_map => {
                return Err(ConfigError::UnsupportedDetector {
                    detector: description.detector_name.clone(),
                }
                .into());
            }
            None => {
                warn!(
                    detector = %description.detector_name,
                    "[geo] No channel map for detector; continuing without channel mapping"
                );
                (None, None)
            }
        };

        Ok(LoadedGeometry {
            description: description.clone(),
            simulation_file: self.config.simulation_file(&description.file),
            hierarchy,
            geometry,
            channel_map,
            generation,
        })
    }
}

impl GeometryApi for GeometryProvider {
    fn load_geometry(
        &self,
        description: GeometryDescription,
    ) -> Result<Arc<LoadedGeometry>, GeometryError> {
        let _reload = self.reload.lock();
        let generation = self.generation() + 1;

        let loaded = match self.build(&description, generation) {
            Ok(loaded) => Arc::new(loaded),
            Err(source) => {
                let err = GeometryError::LoadFailed {
                    detector: description.detector_name.clone(),
                    file: description.file.clone(),
                    source: Box::new(source),
                };
                if self.state.read().is_some() {
                    warn!(error = %err, "[geo] Reload failed; previous geometry stays active");
                } else {
                    error!(error = %err, "[geo] Geometry load failed");
                }
                return Err(err);
            }
        };

        {
            let mut state = self.state.write();
            *state = Some(Arc::clone(&loaded));
            self.live_generation.store(generation, Ordering::Release);
        }

        info!(
            detector = %loaded.detector_name(),
            file = %description.file,
            generation,
            channel_map = loaded.channel_map.is_some(),
            "[geo] Geometry loaded"
        );
        Ok(loaded)
    }

    fn notify(&self, event: DetectorIdentityChanged) -> Result<ReloadOutcome, GeometryError> {
        if self.config.force_configured_only {
            debug!("[geo] Detector identity changes ignored by configuration");
            return Ok(ReloadOutcome::Skipped);
        }

        let Some(name) = event.detector_name else {
            warn!("[geo] Run boundary carries no detector identity; keeping current geometry");
            return Ok(ReloadOutcome::Skipped);
        };
        let name = name.to_lowercase();

        if name == NO_DETECTOR_NAME {
            warn!("[geo] Detector name not set ('{}'); keeping current geometry", NO_DETECTOR_NAME);
            return Ok(ReloadOutcome::Unchanged);
        }

        if self.detector_name().as_deref() == Some(name.as_str()) {
            return Ok(ReloadOutcome::Unchanged);
        }

        info!(detector = %name, "[geo] Detector identity changed; reloading geometry");
        let description = GeometryDescription::for_detector(&name, &self.config.file_extension);
        let loaded = self.load_geometry(description)?;
        Ok(ReloadOutcome::Reloaded {
            generation: loaded.generation,
        })
    }

    fn current(&self) -> Result<Arc<LoadedGeometry>, GeometryError> {
        self.state.read().clone().ok_or(GeometryError::NotReady)
    }

    fn channel_map(&self) -> Result<ChannelMapHandle, GeometryError> {
        let state = self.state.read();
        let loaded = state.as_ref().ok_or(GeometryError::NotReady)?;
        let map = loaded
            .channel_map
            .clone()
            .ok_or_else(|| GeometryError::NoChannelMap {
                detector: loaded.detector_name().to_string(),
            })?;
        Ok(ChannelMapHandle::new(
            map,
            loaded.generation,
            Arc::clone(&self.live_generation),
        ))
    }

    fn detector_name(&self) -> Option<String> {
        self.state
            .read()
            .as_ref()
            .map(|loaded| loaded.detector_name().to_string())
    }
}
