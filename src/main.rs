//! Headless session runner.
//!
//! Replays a recorded event log against a slice directory and writes the
//! resulting annotation table:
//!
//! ```text
//! chanloc-replay <slice-dir> <events.json> <output.csv|json> [config.json]
//! ```

use std::path::{Path, PathBuf};

use chanloc::export::{AnnotationTable, FormatRegistry};
use chanloc::{Controller, InputEvent, LocalizerConfig, LocalizerError, SliceStack};

const USAGE: &str = "usage: chanloc-replay <slice-dir> <events.json> <output> [config.json]";

struct Args {
    slice_dir: PathBuf,
    events: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> Option<Self> {
        let mut args = std::env::args_os().skip(1).map(PathBuf::from);
        let parsed = Self {
            slice_dir: args.next()?,
            events: args.next()?,
            output: args.next()?,
            config: args.next(),
        };
        args.next().is_none().then_some(parsed)
    }
}

fn load_config(path: Option<&Path>) -> Result<LocalizerConfig, LocalizerError> {
    match path {
        Some(path) => LocalizerConfig::load(path),
        None => Ok(LocalizerConfig::load_from_default_path()?.unwrap_or_default()),
    }
}

fn run(args: &Args, config: LocalizerConfig) -> Result<(), LocalizerError> {
    let slices = SliceStack::from_dir(&args.slice_dir, config.slice_offset)?;
    let events: Vec<InputEvent> = serde_json::from_str(&std::fs::read_to_string(&args.events)?)?;

    let registry = FormatRegistry::new();
    let format = registry.for_path(&args.output)?;

    let mut controller = Controller::new(config, slices)?;
    controller.replay(&events)?;

    let (placed, total) = controller.progress();
    log::info!("Replayed {} events: {}/{} channels placed", events.len(), placed, total);

    let result = format.export(&AnnotationTable::from_store(controller.store()), &args.output)?;
    log::info!("Wrote {} rows to {:?}", result.rows_exported, result.path);
    Ok(())
}

fn main() {
    let Some(args) = Args::parse() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Err(e) = run(&args, config) {
        log::error!("{}", e);
        eprintln!("Session error: {}", e);
        std::process::exit(1);
    }
}
