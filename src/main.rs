//! Hand mouse control: replays hand detector output through the pointer controller.

use anyhow::{Context, Result};
use clap::Parser;
use hand_mouse_control::{
    app::{load_frame_records, FrameRecord, HandMouseSession, SessionSummary},
    config::Config,
    input::{InputSink, RecordingSink, X11InputSink},
    mapping::ScreenResolution,
    pose::PoseLabel,
    settings::{ControllerLayout, MotionMode},
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// YAML file with one record per camera frame
    #[arg(long, required_unless_present = "print_config")]
    replay: Option<PathBuf>,

    /// Print pointer actions instead of moving the real cursor
    #[arg(long)]
    dry_run: bool,

    /// Controller layout (front, vertical)
    #[arg(long)]
    layout: Option<ControllerLayout>,

    /// Pointer motion mode (relative, absolute)
    #[arg(long)]
    motion: Option<MotionMode>,

    /// Pointer sensitivity in [0, 1], 0.5 is neutral
    #[arg(short = 'S', long)]
    sensitivity: Option<f64>,

    /// Dead margin of the camera frame in [0, 1]
    #[arg(short = 'M', long)]
    margin: Option<f64>,

    /// Hand travel before scrolling starts, in [0, 1]
    #[arg(long)]
    scrolling_threshold: Option<f64>,

    /// Wheel ticks per scroll action
    #[arg(long)]
    scrolling_speed: Option<u32>,

    /// One Euro minimum cutoff
    #[arg(long)]
    min_cutoff_filter: Option<f64>,

    /// One Euro speed coefficient
    #[arg(long)]
    beta_filter: Option<f64>,

    /// Confidence a pose change must exceed, in [0, 1]
    #[arg(long)]
    minimum_prediction_confidence: Option<f64>,

    /// Comma separated poses that end the session, e.g. CLOSE,OPEN,CLOSE
    #[arg(long, value_delimiter = ',')]
    stop_sequence: Option<Vec<PoseLabel>>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        let controller = &mut config.controller;
        if let Some(layout) = self.layout {
            controller.layout = layout;
        }
        if let Some(motion) = self.motion {
            controller.motion = Some(motion);
        }
        if let Some(sensitivity) = self.sensitivity {
            controller.sensitivity = sensitivity;
        }
        if let Some(margin) = self.margin {
            controller.margin = margin;
        }
        if let Some(threshold) = self.scrolling_threshold {
            controller.scrolling_threshold = threshold;
        }
        if let Some(speed) = self.scrolling_speed {
            controller.scrolling_speed = speed;
        }
        if let Some(confidence) = self.minimum_prediction_confidence {
            controller.minimum_prediction_confidence = confidence;
        }
        if let Some(min_cutoff) = self.min_cutoff_filter {
            config.filter.min_cutoff = min_cutoff;
        }
        if let Some(beta) = self.beta_filter {
            config.filter.beta = beta;
        }
        if let Some(sequence) = &self.stop_sequence {
            config.session.stop_sequence.clone_from(sequence);
        }
    }
}

fn run_session<S: InputSink>(
    config: &Config,
    screen: ScreenResolution,
    sink: S,
    records: Vec<FrameRecord>,
) -> Result<(SessionSummary, S)> {
    let mut session = HandMouseSession::from_config(config, screen, sink)?;
    let summary = session.run(records)?;
    Ok((summary, session.into_controller().into_sink()))
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Mouse Control");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    if args.print_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let Some(replay) = &args.replay else {
        anyhow::bail!("No frame source given, pass --replay <FILE>");
    };
    let records = load_frame_records(replay)
        .with_context(|| format!("Failed to load frame records from {}", replay.display()))?;
    info!("Loaded {} frame records", records.len());

    let summary = if args.dry_run {
        let screen = config.screen_fallback()?;
        let (summary, sink) = run_session(&config, screen, RecordingSink::new(), records)?;
        for action in sink.actions() {
            println!("{action}");
        }
        summary
    } else {
        let sink = X11InputSink::new()?;
        let screen = sink.screen_resolution().or_else(|e| {
            warn!("Failed to read screen size: {}. Using configured fallback.", e);
            config.screen_fallback()
        })?;
        run_session(&config, screen, sink, records)?.0
    };

    info!(
        "Processed {} frames, skipped {}",
        summary.frames_processed, summary.frames_skipped
    );

    Ok(())
}
