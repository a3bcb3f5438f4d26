//! Configuration for the geometry provider and channel map
//!
//! Loaded from TOML; every field has a default.
//!
//! ```toml
//! detector_name = "microboone"
//! relative_path = "uboone"
//! disable_wires = false
//! force_configured_only = false
//! require_channel_map = true
//! max_channels = 20000
//!
//! [channel_rule]
//! kind = "wrapped_induction"
//! period = 2400
//!
//! [sorting.wires]
//! axis = "z"
//! descending = false
//! ```

use crate::domain::errors::ConfigError;
use crate::domain::value_objects::GeometryDescription;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// World axis used as a sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAxis {
    X,
    Y,
    Z,
}

impl SortAxis {
    pub fn index(&self) -> usize {
        match self {
            SortAxis::X => 0,
            SortAxis::Y => 1,
            SortAxis::Z => 2,
        }
    }
}

/// Sort key: one axis of the world-frame center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisOrder {
    pub axis: SortAxis,
    #[serde(default)]
    pub descending: bool,
}

impl AxisOrder {
    pub const fn ascending(axis: SortAxis) -> Self {
        Self {
            axis,
            descending: false,
        }
    }
}

/// Sort keys of the standard sorter. Planes are always ordered along the
/// drift direction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortingParameters {
    pub cryostats: AxisOrder,
    pub tpcs: AxisOrder,
    pub wires: AxisOrder,
    pub op_dets: AxisOrder,
}

impl Default for SortingParameters {
    fn default() -> Self {
        Self {
            cryostats: AxisOrder::ascending(SortAxis::X),
            tpcs: AxisOrder::ascending(SortAxis::X),
            wires: AxisOrder::ascending(SortAxis::Z),
            op_dets: AxisOrder::ascending(SortAxis::Z),
        }
    }
}

/// How wires are assigned to channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelRule {
    /// Every wire has its own channel
    #[default]
    OneToOne,
    /// Induction wire `w` shares channel `w % period` of its plane;
    /// collection planes stay one-to-one
    WrappedInduction { period: u32 },
}

/// Geometry configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Detector identity used for the initial load and channel map selection
    pub detector_name: String,
    /// Description file; `<detector_name>.<file_extension>` when empty
    pub description: String,
    /// Directory prefix prepended to description names
    pub relative_path: String,
    pub file_extension: String,
    /// Hand the `_nowires` description to detector simulation
    pub disable_wires: bool,
    /// Ignore detector-identity changes at run boundaries
    pub force_configured_only: bool,
    /// Fail the load when no channel map matches the detector
    pub require_channel_map: bool,
    pub sorting: SortingParameters,
    pub channel_rule: ChannelRule,
    /// Upper bound on the number of channels
    pub max_channels: Option<u32>,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            detector_name: "lartpcdetector".to_string(),
            description: String::new(),
            relative_path: String::new(),
            file_extension: "json".to_string(),
            disable_wires: false,
            force_configured_only: false,
            require_channel_map: true,
            sorting: SortingParameters::default(),
            channel_rule: ChannelRule::default(),
            max_channels: None,
        }
    }
}

impl GeometryConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: GeometryConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detector_name.trim().is_empty() {
            return Err(invalid("detector_name", "must not be empty"));
        }
        if self.file_extension.trim().is_empty() {
            return Err(invalid("file_extension", "must not be empty"));
        }
        if self.file_extension.starts_with('.') {
            return Err(invalid("file_extension", "must not start with '.'"));
        }
        if self.max_channels == Some(0) {
            return Err(invalid("max_channels", "must be positive"));
        }
        Ok(())
    }

    /// Description of the configured detector.
    pub fn initial_description(&self) -> GeometryDescription {
        if self.description.is_empty() {
            GeometryDescription::for_detector(&self.detector_name, &self.file_extension)
        } else {
            GeometryDescription::new(&self.detector_name, self.description.clone())
        }
    }

    /// Description file requested from the source: `file` prefixed with
    /// `relative_path`.
    pub fn resolve_file(&self, file: &str) -> String {
        if self.relative_path.is_empty() {
            file.to_string()
        } else if self.relative_path.ends_with('/') {
            format!("{}{}", self.relative_path, file)
        } else {
            format!("{}/{}", self.relative_path, file)
        }
    }

    /// Description handed to detector simulation. Same as
    /// [`resolve_file`](Self::resolve_file), with `_nowires` inserted before
    /// the extension when wires are disabled.
    pub fn simulation_file(&self, file: &str) -> String {
        let resolved = self.resolve_file(file);
        if !self.disable_wires {
            return resolved;
        }
        let stem_start = resolved.rfind('/').map_or(0, |i| i + 1);
        match resolved[stem_start..].rfind('.') {
            Some(dot) => {
                let dot = stem_start + dot;
                format!("{}_nowires{}", &resolved[..dot], &resolved[dot..])
            }
            None => format!("{}_nowires", resolved),
        }
    }
}

fn invalid(option: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidOption {
        option: option.to_string(),
        reason: reason.to_string(),
    }
}
