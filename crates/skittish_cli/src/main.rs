mod app;
mod render;
mod source;

use app::AppContext;
use clap::{Parser, ValueEnum};
use skittish_core::{
    LoudnessSource, Settings, SettingsPatch, SettingsRepository, StressMachine, Thresholds,
};
use skittish_store::JsonSettingsStore;
use source::{ScriptSource, SilentSource, SyntheticSource};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "A terminal cat that gets nervous when you are loud")]
struct Args {
    /// Path to the persisted settings file
    #[arg(long, default_value = "skittish.json")]
    settings: PathBuf,

    /// Frames per second for the tick loop (1-240)
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Where loudness samples come from
    #[arg(long, value_enum, default_value_t = SourceKind::Synthetic)]
    source: SourceKind,

    /// Loudness trace file, one value per line (with --source script)
    #[arg(long, required_if_eq("source", "script"))]
    script: Option<PathBuf>,

    /// Seed for the synthetic source
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Override: loudness-to-stress gain
    #[arg(long)]
    sensitivity: Option<f32>,

    /// Override: seconds to cross one mood band
    #[arg(long)]
    transition: Option<f32>,

    /// Override: loudness floor below which noise is ignored (0-255)
    #[arg(long)]
    volume_floor: Option<f32>,

    /// Override: the four mood boundaries, e.g. "10,30,60,90"
    #[arg(long, value_parser = parse_thresholds)]
    thresholds: Option<Thresholds>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    Synthetic,
    Silent,
    Script,
}

fn parse_thresholds(raw: &str) -> Result<Thresholds, String> {
    let parts: Vec<f32> = raw
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid threshold list {raw:?}: {e}"))?;
    let [calm, anxious, irritated, panicked] = parts[..] else {
        return Err(format!(
            "expected four comma-separated boundaries, got {}",
            parts.len()
        ));
    };
    Ok(Thresholds {
        calm,
        anxious,
        irritated,
        panicked,
    })
}

fn build_source(args: &Args) -> Box<dyn LoudnessSource> {
    match args.source {
        SourceKind::Silent => Box::new(SilentSource),
        SourceKind::Synthetic => Box::new(SyntheticSource::new(args.seed)),
        SourceKind::Script => {
            // clap guarantees the path is present for this variant
            let path = args.script.as_ref().expect("--script is required");
            match ScriptSource::new(path) {
                Ok(source) => Box::new(source),
                Err(e) => {
                    // One-time notice, then degrade: silence drives the cat to sleep.
                    warn!("loudness source unavailable ({e:#}), falling back to silence");
                    Box::new(SilentSource)
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let store = JsonSettingsStore::new(&args.settings);
    let mut settings = Settings::default();
    if let Some(patch) = store.load() {
        info!(path = %args.settings.display(), "applying persisted settings");
        settings.apply(&patch);
    }

    let mut machine = StressMachine::with_frame_rate(settings, args.fps.clamp(1, 240) as f32);

    // CLI overrides play the role of the settings panel: pushed through the
    // machine, then persisted.
    let overrides = SettingsPatch {
        sensitivity: args.sensitivity,
        transition_secs: args.transition,
        volume_floor: args.volume_floor,
        thresholds: args.thresholds,
    };
    if !overrides.is_empty() {
        machine.apply_settings(&overrides);
        store.save(machine.settings())?;
        info!("settings overridden and saved");
    }

    machine.on_transition(|d| {
        info!(mood = d.label, "the cat says: {}", d.caption);
    });

    let source = build_source(&args);
    let mut ctx = AppContext::new(machine, source, Box::new(store), args.fps);
    ctx.run().await
}
