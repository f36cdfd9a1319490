//! Qibla compass demo
//!
//! Drives the orientation engine with mock providers: a fixed observer
//! position and a simulated magnetometer that sweeps the device through a
//! full turn.

use clap::{Parser, ValueEnum};
use qibla_compass::api::formatting::CSV_HEADER;
use qibla_compass::{
    CompassConfig, GeoPoint, MockLocationProvider, MockSensorProvider, OrientationOrchestrator,
    OutputFormat, SnapshotFormatter, SENSOR_INTERVAL_MS,
};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "qibla-compass", about = "Simulated Qibla compass")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Observer latitude in degrees
    #[arg(long, default_value_t = 40.7128, allow_hyphen_values = true)]
    lat: f64,

    /// Observer longitude in degrees
    #[arg(long, default_value_t = -74.0060, allow_hyphen_values = true)]
    lon: f64,

    /// Number of simulated sensor ticks
    #[arg(long, default_value_t = 8)]
    samples: u32,

    /// Simulate a device without a magnetometer
    #[arg(long)]
    no_sensor: bool,

    /// Simulate the user refusing location permission
    #[arg(long)]
    deny_permission: bool,

    /// Simulate a location fix that never succeeds
    #[arg(long)]
    no_fix: bool,

    /// Wait one sensor interval between ticks
    #[arg(long)]
    realtime: bool,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Decimal places for bearings and rotations
    #[arg(long, default_value_t = 1)]
    precision: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Compact,
    Json,
    PrettyJson,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Compact => OutputFormat::CompactText,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::PrettyJson => OutputFormat::PrettyJson,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CompassConfig::load_from_file(path)?,
        None => CompassConfig::default(),
    };
    if let Some(format) = args.format {
        config.output_format = format.into();
    }

    init_logging(&config);

    let observer = GeoPoint::new(args.lat, args.lon);
    let location = if args.deny_permission {
        MockLocationProvider::denied()
    } else if args.no_fix {
        MockLocationProvider::failing_fix("simulated fix failure")
    } else {
        MockLocationProvider::new(observer)
    };
    let sensor = if args.no_sensor {
        MockSensorProvider::unavailable()
    } else {
        MockSensorProvider::new()
    };

    let formatter = SnapshotFormatter::new(config.output_format).with_precision(args.precision);
    let mut engine = OrientationOrchestrator::new(
        Box::new(location),
        Box::new(sensor.clone()),
        config.clone(),
    );

    let lifecycle = engine.initialize()?;
    tracing::info!(%lifecycle, "initialization finished");
    if let Some(position) = engine.location_status().position() {
        tracing::info!(
            latitude = position.latitude,
            longitude = position.longitude,
            "observer position"
        );
    }

    if config.output_format == OutputFormat::Csv {
        println!("{}", CSV_HEADER);
    }

    if !lifecycle.is_ready() {
        println!("{}", formatter.format(&engine.snapshot())?);
        return Ok(());
    }

    let step = if args.samples == 0 { 0.0 } else { 360.0 / args.samples as f64 };
    for tick in 0..args.samples {
        sensor.emit_heading(tick as f64 * step);
        engine.process_pending();
        println!("{}", formatter.format(&engine.snapshot())?);

        if args.realtime {
            std::thread::sleep(Duration::from_millis(SENSOR_INTERVAL_MS as u64));
        }
    }

    engine.teardown();
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level applies
fn init_logging(config: &CompassConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
