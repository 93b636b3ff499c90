//! cadence: command-line front end for the harmonic engine

mod commands;
mod config;

use std::path::PathBuf;

use cadence_core::{ChordTexture, Mode, PitchClass, VoicingStyle};
use cadence_services::Vibe;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::Output;

#[derive(Parser)]
#[command(name = "cadence", version, about = "Scales, chords, degrees and voice leading")]
struct Cli {
    /// Config file (default: <config dir>/cadence/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the `[defaults]` config section
#[derive(Args, Debug, Clone, Copy, Default)]
struct ContextArgs {
    /// Key tonic (e.g. C, F#, Bb)
    #[arg(long)]
    key: Option<PitchClass>,

    /// Mode or makam (e.g. dorian, makam_hicaz)
    #[arg(long)]
    mode: Option<Mode>,

    /// triad, seventh or extended
    #[arg(long)]
    texture: Option<ChordTexture>,

    /// smooth, wide or shell
    #[arg(long)]
    style: Option<VoicingStyle>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scale of a key
    Scale {
        key: Option<PitchClass>,

        #[arg(long)]
        mode: Option<Mode>,
    },
    /// Chord stack built on a root
    Chord {
        /// Root as spelled (e.g. Ab, G#)
        #[arg(value_parser = parse_root)]
        root: String,

        #[arg(long)]
        mode: Option<Mode>,

        #[arg(long)]
        texture: Option<ChordTexture>,
    },
    /// Roman-numeral degree of a chord root in a key
    Degree {
        chord_root: PitchClass,

        #[arg(long)]
        key: Option<PitchClass>,

        #[arg(long)]
        mode: Option<Mode>,
    },
    /// Voice one chord against an optional previous voicing
    Voice {
        /// Chord pitch classes, bottom voice first
        #[arg(required = true)]
        chord: Vec<PitchClass>,

        /// Previous voicing (e.g. C4 E4 G4); malformed notes read as C5
        #[arg(long, num_args = 1..)]
        previous: Vec<String>,

        #[arg(long)]
        style: Option<VoicingStyle>,
    },
    /// Realize a progression of chord roots
    Progression {
        #[arg(required = true)]
        roots: Vec<PitchClass>,

        #[command(flatten)]
        context: ContextArgs,

        /// Include MIDI note events
        #[arg(long)]
        clip: bool,
    },
    /// Sample a progression for a vibe and realize it
    Generate {
        /// pop, cinematic or jazz
        vibe: Vibe,

        #[command(flatten)]
        context: ContextArgs,

        #[arg(long, default_value_t = 4)]
        length: usize,

        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        clip: bool,
    },
    /// Makam structure, seyir templates and modulation paths
    Makam {
        key: Option<PitchClass>,

        #[arg(long)]
        mode: Option<Mode>,
    },
    /// Borrowed chords and secondary dominants of a major key
    Harmony { key: Option<PitchClass> },
    /// Circle of fifths, diatonic keys marked
    Circle {
        #[arg(long)]
        key: Option<PitchClass>,

        #[arg(long)]
        mode: Option<Mode>,
    },
    /// Show the effective config
    Config {
        /// Write the effective config to the config path
        #[arg(long)]
        init: bool,
    },
}

fn parse_root(s: &str) -> Result<String, cadence_core::CadenceError> {
    PitchClass::parse(s)?;
    Ok(s.trim().to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let (app_config, config_error) = match config::load_config(&config_path) {
        Ok(c) => (c, None),
        Err(e) => (config::AppConfig::default(), Some(e)),
    };

    let default_filter = if cli.verbose {
        "cadence=debug".to_string()
    } else {
        app_config
            .logging
            .filter
            .clone()
            .unwrap_or_else(|| "cadence=info".to_string())
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter)))
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Using default config: {e:#}");
    }
    tracing::debug!(path = %config_path.display(), "Config resolved");

    let out = Output::new(cli.json);
    let defaults = app_config.defaults;

    match cli.command {
        Commands::Scale { key, mode } => commands::scale(
            &out,
            key.unwrap_or(defaults.key),
            mode.unwrap_or(defaults.mode),
        ),
        Commands::Chord { root, mode, texture } => commands::chord(
            &out,
            &root,
            mode.unwrap_or(defaults.mode),
            texture.unwrap_or(defaults.texture),
        ),
        Commands::Degree { chord_root, key, mode } => commands::degree(
            &out,
            key.unwrap_or(defaults.key),
            mode.unwrap_or(defaults.mode),
            chord_root,
        ),
        Commands::Voice { chord, previous, style } => {
            commands::voice(&out, &chord, &previous, style.unwrap_or(defaults.style))
        }
        Commands::Progression { roots, context, clip } => {
            let ctx = context.resolve(&app_config);
            let timing = clip.then(|| app_config.export.timing());
            commands::progression(&out, &ctx, &roots, timing)
        }
        Commands::Generate { vibe, context, length, seed, clip } => {
            let ctx = context.resolve(&app_config);
            let timing = clip.then(|| app_config.export.timing());
            commands::generate(&out, &ctx, vibe, length, seed, timing)
        }
        Commands::Makam { key, mode } => commands::makam(
            &out,
            key.unwrap_or(defaults.key),
            mode.unwrap_or(defaults.mode),
        ),
        Commands::Harmony { key } => commands::harmony(&out, key.unwrap_or(defaults.key)),
        Commands::Circle { key, mode } => commands::circle(
            &out,
            key.unwrap_or(defaults.key),
            mode.unwrap_or(defaults.mode),
        ),
        Commands::Config { init } => {
            if init {
                let written = config::init_config(&config_path)?;
                tracing::info!(path = %config_path.display(), "Config written");
                return commands::show_config(&out, &written);
            }
            commands::show_config(&out, &app_config)
        }
    }
}

impl ContextArgs {
    fn resolve(&self, config: &config::AppConfig) -> cadence_core::HarmonicContext {
        let defaults = &config.defaults;
        cadence_core::HarmonicContext {
            key: self.key.unwrap_or(defaults.key),
            mode: self.mode.unwrap_or(defaults.mode),
            texture: self.texture.unwrap_or(defaults.texture),
            style: self.style.unwrap_or(defaults.style),
        }
    }
}
