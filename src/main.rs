//! Catpoint host entry point.
//!
//! Wires the stock adapters around the service core and replays a script
//! of JSON-lines steps against it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  FileStatusStore / MemoryStatusStore   (StatusStore)     │
//! │  FakeImageClassifier                   (ImageClassifier) │
//! │  LogStatusListener                     (StatusListener)  │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        SecurityService (pure logic)            │      │
//! │  │        AlarmFsm rules                          │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Script steps, one JSON object per line:
//!
//! ```text
//! {"op":"add_sensor","name":"Front door","type":"DOOR"}
//! {"op":"arm","status":"ARMED_AWAY"}
//! {"op":"sensor","name":"Front door","type":"DOOR","active":true}
//! {"op":"image","path":"frames/porch.jpg"}
//! ```

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use serde::Deserialize;

use catpoint::adapters::fake_classifier::FakeImageClassifier;
use catpoint::adapters::file_store::FileStatusStore;
use catpoint::adapters::log_listener::LogStatusListener;
use catpoint::adapters::memory_store::MemoryStatusStore;
use catpoint::app::commands::SecurityCommand;
use catpoint::config::SecurityConfig;
use catpoint::error::parse_enum;
use catpoint::{Image, SecurityService, Sensor, SensorType, StatusStore};

#[derive(Debug, Parser)]
#[command(name = "catpoint", version, about = "Replay sensor, camera and arming events through the alarm controller")]
struct Args {
    /// JSON config file
    #[arg(long, env = "CATPOINT_CONFIG")]
    config: Option<PathBuf>,

    /// JSON status store; overrides the config's `store_path`
    #[arg(long)]
    store: Option<PathBuf>,

    /// Script of JSON-lines steps; stdin when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seed for the fake image classifier
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// One script line.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ScriptStep {
    Arm {
        status: String,
    },
    AddSensor {
        name: String,
        #[serde(rename = "type")]
        sensor_type: String,
    },
    RemoveSensor {
        name: String,
        #[serde(rename = "type")]
        sensor_type: String,
    },
    Sensor {
        name: String,
        #[serde(rename = "type")]
        sensor_type: String,
        active: bool,
    },
    Image {
        path: PathBuf,
    },
}

impl ScriptStep {
    /// Translate into a service command.  Unknown enum names and unreadable
    /// frames are input errors.
    fn into_command(self) -> catpoint::Result<SecurityCommand> {
        let sensor = |name: String, raw: &str| -> catpoint::Result<Sensor> {
            let ty: SensorType = parse_enum("sensor type", raw)?;
            Ok(Sensor::new(name, ty))
        };
        Ok(match self {
            Self::Arm { status } => SecurityCommand::SetArmingStatus(parse_enum("arming status", &status)?),
            Self::AddSensor { name, sensor_type } => SecurityCommand::AddSensor(sensor(name, &sensor_type)?),
            Self::RemoveSensor { name, sensor_type } => {
                SecurityCommand::RemoveSensor(sensor(name, &sensor_type)?)
            }
            Self::Sensor {
                name,
                sensor_type,
                active,
            } => SecurityCommand::ChangeSensorActivation {
                sensor: sensor(name, &sensor_type)?,
                active,
            },
            Self::Image { path } => {
                let bytes = fs::read(&path).map_err(|e| {
                    catpoint::Error::InvalidInput(format!("frame {}: {e}", path.display()))
                })?;
                SecurityCommand::ProcessImage(Image::from_bytes(bytes))
            }
        })
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SecurityConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SecurityConfig::default(),
    }
    .apply_env()
    .context("applying environment overrides")?;
    if args.store.is_some() {
        config.store_path.clone_from(&args.store);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();
    info!("Catpoint v{}", env!("CARGO_PKG_VERSION"));

    let script: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            fs::File::open(path).with_context(|| format!("opening script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let classifier = FakeImageClassifier::seeded(args.seed);

    match config.store_path.clone() {
        Some(path) => {
            let store = FileStatusStore::open(&path)
                .with_context(|| format!("opening store {}", path.display()))?;
            run(store, classifier, &config, script)
        }
        None => run(MemoryStatusStore::new(), classifier, &config, script),
    }
}

fn run<S: StatusStore>(
    store: S,
    classifier: FakeImageClassifier,
    config: &SecurityConfig,
    script: Box<dyn BufRead>,
) -> Result<()> {
    let mut service = SecurityService::new(store, classifier, config);
    service.add_status_listener(Box::new(LogStatusListener::new()));

    for (idx, line) in script.lines().enumerate() {
        let line = line.context("reading script")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let step: ScriptStep = match serde_json::from_str(line) {
            Ok(step) => step,
            Err(e) => {
                warn!("line {}: skipped, not a valid step: {e}", idx + 1);
                continue;
            }
        };
        let cmd = match step.into_command() {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("line {}: skipped, {e}", idx + 1);
                continue;
            }
        };

        // Store failures end the run; persistence is the source of truth.
        if let Err(e) = service.handle_command(cmd) {
            error!("line {}: {e}", idx + 1);
            return Err(e).context("store failure");
        }
    }

    info!(
        "final: arming={} alarm={} active_sensors={}",
        service.arming_status()?,
        service.alarm_status()?,
        service.sensors()?.iter().filter(|s| s.is_active()).count()
    );
    Ok(())
}
