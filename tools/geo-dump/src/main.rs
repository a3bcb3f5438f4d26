//! # geo-dump
//!
//! Print the sorted geometry and channel map of a detector description.
//!
//! ```text
//! geo-dump --file /data/geometry/microboone.json --first-channel 0 --last-channel 99
//! geo-dump --synthetic 1x2x3x20 --detector lariat --channel-to-wires false --wire-to-channel --verify
//! ```

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use geo_channel_map::{
    GeometryApi, GeometryConfig, GeometryProvider, GeometrySource, InMemoryGeometrySource,
    JsonGeometrySource, SearchPath, SyntheticDetector,
};
use geo_dump::report;
use geo_telemetry::{geo_span, init_logging, TelemetryConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "geo-dump")]
#[command(about = "Dump detector geometry and channel map")]
struct Args {
    /// Geometry configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Detector name, overriding the configuration
    #[arg(short, long)]
    detector: Option<String>,

    /// Description file to load (JSON hierarchy)
    #[arg(short, long, conflicts_with = "synthetic")]
    file: Option<PathBuf>,

    /// Build a synthetic detector of shape CxTxPxW instead of loading a file
    #[arg(short, long)]
    synthetic: Option<String>,

    /// Optical detectors per cryostat for the synthetic detector
    #[arg(long, default_value = "0")]
    op_dets: usize,

    /// Print the channel to wires map
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    channel_to_wires: bool,

    /// Print the wire to channel map
    #[arg(long)]
    wire_to_channel: bool,

    /// First channel to print
    #[arg(long)]
    first_channel: Option<u32>,

    /// Last channel to print
    #[arg(long)]
    last_channel: Option<u32>,

    /// Check that the channel map is dense and round-trips
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logging = init_logging(&TelemetryConfig::for_service("geo-dump"))?;

    let mut config = match &args.config {
        Some(path) => GeometryConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => GeometryConfig::default(),
    };
    if let Some(detector) = &args.detector {
        config.detector_name = detector.clone();
    }

    let source = source_for(&args, &mut config)?;
    let _span = geo_span!("geo_dump", detector = %config.detector_name).entered();
    let provider = GeometryProvider::start(config, source)?;
    let loaded = provider.current()?;
    info!(
        detector = %loaded.detector_name(),
        file = %loaded.description.file,
        "[geo] Geometry loaded"
    );

    print!("{}", report::summary(&loaded)?);

    let Some(map) = loaded.channel_map.as_ref() else {
        if args.channel_to_wires || args.wire_to_channel || args.verify {
            bail!("detector '{}' has no channel map", loaded.detector_name());
        }
        return Ok(());
    };

    if args.channel_to_wires {
        print!(
            "{}",
            report::channel_to_wires(
                map.as_ref(),
                loaded.detector_name(),
                args.first_channel,
                args.last_channel
            )?
        );
    }
    if args.wire_to_channel {
        print!("{}", report::wire_to_channel(map.as_ref(), loaded.detector_name())?);
    }
    if args.verify {
        let verification = report::verify(map.as_ref());
        println!(
            "round trip: {}, dense channels: {}",
            verification.round_trip, verification.dense
        );
        if !verification.passed() {
            bail!("channel map self-check failed");
        }
    }
    Ok(())
}

/// Pick the geometry source, pointing `config` at the file it will load.
fn source_for(args: &Args, config: &mut GeometryConfig) -> Result<Arc<dyn GeometrySource>> {
    if let Some(shape) = &args.synthetic {
        let detector = SyntheticDetector::from_shape(shape)
            .with_context(|| format!("invalid synthetic shape '{}', expected CxTxPxW", shape))?
            .with_op_dets_per_cryostat(args.op_dets);
        let description = config.initial_description();
        let file = config.resolve_file(&description.file);
        info!(
            shape = %shape,
            wires = detector.wire_count(),
            file = %file,
            "[geo] Using synthetic detector"
        );
        let hierarchy = detector.hierarchy(&config.detector_name);
        return Ok(Arc::new(InMemoryGeometrySource::new().with_file(file, hierarchy)));
    }

    if let Some(path) = &args.file {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("not a file path: {}", path.display()))?;
        let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
        if !config.relative_path.is_empty() {
            warn!(relative_path = %config.relative_path, "[geo] Ignoring relative_path for explicit file");
            config.relative_path.clear();
        }
        config.description = name.to_string();
        return Ok(Arc::new(JsonGeometrySource::new(SearchPath::new([dir]))));
    }

    Ok(Arc::new(JsonGeometrySource::from_env()))
}
