use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::RecvTimeoutError;

use vibrolab::config::{CoordinateMode, PipelineConfig, SensorDelay};
use vibrolab::output::{OutputFormat, create_formatter};
use vibrolab::sensor::{SensorSource, open_source};
use vibrolab::session::{SensorSession, SessionEvent, StopReason};
use vibrolab::{Settings, VibroError};

/// Samples processed before auto-calibration, giving the filter time to settle
const AUTO_CALIBRATION_SAMPLES: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "vibrolab")]
#[command(about = "Live accelerometer readout with calibration and CSV export", long_about = None)]
struct Args {
    /// Replay a previously exported session file
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Use the built-in motion simulator as the sensor
    #[arg(long)]
    simulate: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Persisted user settings
    #[arg(long, default_value = "vibrolab-settings.toml")]
    settings: PathBuf,

    /// Sampling tier; overrides the saved setting
    #[arg(short = 'd', long, value_enum)]
    delay: Option<SensorDelay>,

    /// Coordinate system for displayed values; saved for the next run
    #[arg(short = 'm', long, value_enum)]
    mode: Option<CoordinateMode>,

    /// Readout format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Readout lines per second (0 prints every sample)
    #[arg(long, default_value_t = 10.0, value_parser = non_negative_f32)]
    output_rate: f32,

    /// Calibrate after this many samples
    #[arg(long)]
    calibrate_after: Option<u64>,

    /// Stop after this many seconds
    #[arg(long, value_parser = non_negative_f32)]
    duration: Option<f32>,

    /// Export the recorded session when sensing stops
    #[arg(short = 'e', long)]
    export: bool,

    /// Directory for exported sessions; overrides the configuration
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn non_negative_f32(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a non-negative number, got {}", s))
    }
}

/// Minimum spacing between printed lines; zero prints every sample
fn readout_interval(output_rate: f32) -> anyhow::Result<Duration> {
    if output_rate <= 0.0 {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f32(1.0 / output_rate)
        .with_context(|| format!("Output rate {} is out of range", output_rate))
}

fn run_deadline(duration: Option<f32>) -> anyhow::Result<Option<Instant>> {
    duration
        .map(|secs| {
            Duration::try_from_secs_f32(secs)
                .map(|d| Instant::now() + d)
                .with_context(|| format!("Duration {} is out of range", secs))
        })
        .transpose()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &args.export_dir {
        config.recorder.export_dir = dir.clone();
    }

    let mut settings = Settings::load(&args.settings).context("Failed to load settings")?;
    if let Some(mode) = args.mode
        && mode != settings.coordinate_mode
    {
        settings.coordinate_mode = mode;
        settings.save(&args.settings).context("Failed to save settings")?;
    }
    let delay = args.delay.unwrap_or(settings.sensor_delay);
    config.sensor.delay = delay;

    let source: Box<dyn SensorSource> = open_source(args.input.as_deref(), args.simulate, delay)
        .context("Cannot start sensing")?;

    let session = SensorSession::new(config)?;
    session.set_coordinate_mode(settings.coordinate_mode);
    let calibrate_after = args
        .calibrate_after
        .or(settings.auto_calibration.then_some(AUTO_CALIBRATION_SAMPLES));
    session.set_auto_calibration(calibrate_after);

    println!("=== vibrolab ===");
    println!("Sampling: {} ({:?} nominal)", delay, delay.interval());
    println!("Coordinates: {}", settings.coordinate_mode);
    println!(
        "Filter alpha: {}  Chart window: {}  Recorder capacity: {}",
        session.config().filter.alpha,
        session.config().chart.capacity,
        session.config().recorder.capacity
    );
    println!();

    let events = session.subscribe_events();
    session.start_session(source)?;

    run_readout(&session, &events, &args)?;
    session.stop_session()?;

    if let Some(summary) = session.summary() {
        println!();
        println!(
            "Recorded {} readings over {}  max |a|: {:.3}  mean |a|: {:.3} ± {:.3}",
            summary.count,
            summary.formatted_duration(),
            summary.max_magnitude,
            summary.mean_magnitude,
            summary.std_dev_magnitude
        );
    }

    if args.export {
        match session.export_session() {
            Ok(path) => println!("Exported session to {}", path.display()),
            Err(VibroError::NothingToExport) => println!("Nothing to export"),
            Err(e) => return Err(e).context("Export failed"),
        }
    }

    Ok(())
}

fn run_readout(
    session: &SensorSession,
    events: &crossbeam_channel::Receiver<SessionEvent>,
    args: &Args,
) -> anyhow::Result<()> {
    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let output_interval = readout_interval(args.output_rate)?;
    let deadline = run_deadline(args.duration)?;
    let mut last_output: Option<Instant> = None;

    loop {
        if let Some(deadline) = deadline
            && Instant::now() >= deadline
        {
            log::info!("Duration elapsed, stopping");
            break;
        }

        let event = match events.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match event {
            SessionEvent::Sample(display) => {
                let due = last_output.is_none_or(|t| t.elapsed() >= output_interval);
                if due {
                    println!("{}", formatter.format(&display));
                    last_output = Some(Instant::now());
                }
            }
            SessionEvent::Calibrated(offset) => {
                println!(
                    "Calibrated: offset ({:.3}, {:.3}, {:.3})",
                    offset.x, offset.y, offset.z
                );
            }
            SessionEvent::SourceError(message) => {
                eprintln!("Sensor error: {}", message);
            }
            SessionEvent::Stopped { samples, reason } => {
                if reason == StopReason::SourceExhausted {
                    log::info!("Source exhausted after {} samples", samples);
                }
                break;
            }
            SessionEvent::Started => {}
        }
    }

    if session.is_active() {
        log::debug!("Readout finished while session still active");
    }
    Ok(())
}
