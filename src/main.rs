//! Rockfall entry point
//!
//! Runs the game headless: the demo autopilot (or a recorded input script)
//! plays for a fixed amount of simulated time against the real persistence
//! and settings files, then a summary is printed. Set `RUST_LOG=debug` to
//! follow every event.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;

use rockfall::App;
use rockfall::audio::{AudioManager, LogAudio};
use rockfall::consts::SIM_DT;
use rockfall::persistence::JsonFileStore;
use rockfall::platform::{Autopilot, InputSource, ScriptedInput};
use rockfall::settings::{QualityPreset, SETTINGS_FILE, Settings};
use rockfall::tuning::Tuning;

#[derive(Parser, Debug)]
#[command(name = "rockfall", version, about = "Headless Rockfall demo runner")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// JSON tuning file overriding the default balance
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Directory for the high score and settings files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Quality preset override (low, medium, high)
    #[arg(long)]
    quality: Option<String>,

    /// Replay a JSON array of tick inputs instead of the autopilot
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write the effective tuning as JSON to this path and exit
    #[arg(long)]
    dump_tuning: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load_from_file(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Invalid tuning file {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    if let Some(path) = &args.dump_tuning {
        return match tuning.save_to_file(path) {
            Ok(()) => {
                log::info!("Tuning written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Could not write tuning to {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    let mut input: Box<dyn InputSource> = match &args.script {
        Some(path) => match load_script(path) {
            Ok(script) => {
                log::info!("Replaying {} scripted ticks", script.remaining());
                Box::new(script)
            }
            Err(e) => {
                log::error!("Invalid input script {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(Autopilot::new()),
    };

    let (store, settings_path) = match &args.data_dir {
        Some(dir) => (JsonFileStore::in_dir(dir), Some(dir.join(SETTINGS_FILE))),
        None => {
            let store = JsonFileStore::in_data_dir().unwrap_or_else(|e| {
                log::warn!("{}; keeping the high score in the working directory", e);
                JsonFileStore::in_dir(&PathBuf::from("."))
            });
            (store, Settings::default_path().ok())
        }
    };

    let mut settings = match &settings_path {
        Some(path) => Settings::load_from(path).unwrap_or_else(|e| {
            log::warn!("Could not load settings, using defaults: {}", e);
            Settings::default()
        }),
        None => Settings::default(),
    };
    if let Some(name) = &args.quality {
        match QualityPreset::parse(name) {
            Some(preset) => settings.quality = preset,
            None => log::warn!(
                "Unknown quality preset '{}', keeping {}",
                name,
                settings.quality.as_str()
            ),
        }
    }

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    log::info!("Rockfall (headless) starting...");
    log::debug!("High score file: {}", store.path().display());
    let audio = AudioManager::new(Box::new(LogAudio::default()));
    let mut app = App::new(seed, tuning, settings, store, audio);
    if let Some(path) = settings_path {
        app = app.with_settings_path(path);
    }

    let started = Instant::now();
    let frames = (args.seconds.max(0.0) / SIM_DT).round() as u64;
    for _ in 0..frames {
        app.update(SIM_DT, input.as_mut());
        if app.exit_requested() {
            log::info!("Exit requested, stopping early");
            break;
        }
    }

    let state = app.state();
    let stats = app.stats();
    println!("seed:              {}", seed);
    println!("ticks:             {}", stats.ticks);
    println!("sessions:          {}", stats.sessions);
    println!(
        "score:             {} (wave {}, {} lives)",
        state.score, state.wave, state.lives
    );
    println!(
        "high score:        {} (wave {})",
        state.best.score, state.best.wave
    );
    println!("shots fired:       {}", stats.shots);
    println!("hazards destroyed: {}", stats.hazards_destroyed);
    println!("ships lost:        {}", stats.ships_lost);
    println!("waves cleared:     {}", stats.waves_cleared);
    if app.settings().show_fps {
        let elapsed = started.elapsed().as_secs_f64().max(f64::EPSILON);
        println!("ticks/second:      {:.0}", stats.ticks as f64 / elapsed);
    }

    ExitCode::SUCCESS
}

fn load_script(path: &Path) -> Result<ScriptedInput, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(ScriptedInput::from_json(&json)?)
}
