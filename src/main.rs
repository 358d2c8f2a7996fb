use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context};
use pacman_valentine::app::App;
use pacman_valentine::constants::LOOP_TIME;
use pacman_valentine::formatter::CustomFormatter;
use pacman_valentine::game::Game;
use pacman_valentine::map::builder::Map;
use pacman_valentine::time::MonotonicClock;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Command line options.
struct Options {
    /// Seed for rose placement; random when absent.
    seed: Option<u64>,
    frame_time: Duration,
    /// The terminal is taken over by the game, so logs go to a file.
    log_path: PathBuf,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Options> {
        let mut options = Options {
            seed: None,
            frame_time: LOOP_TIME,
            log_path: env::temp_dir().join("pacman-valentine.log"),
        };

        while let Some(arg) = args.next() {
            let mut value = || args.next().with_context(|| format!("{arg} expects a value"));
            match arg.as_str() {
                "--seed" => options.seed = Some(value()?.parse().context("--seed expects an unsigned integer")?),
                "--tick-ms" => {
                    let millis: u64 = value()?.parse().context("--tick-ms expects milliseconds")?;
                    if millis == 0 {
                        bail!("--tick-ms must be at least 1");
                    }
                    options.frame_time = Duration::from_millis(millis);
                }
                "--log" => options.log_path = PathBuf::from(value()?),
                other => bail!("Unknown argument: {other} (expected --seed, --tick-ms or --log)"),
            }
        }

        Ok(options)
    }
}

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Could not create log file {}", path.display()))?;

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .event_format(CustomFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")?;
    Ok(())
}

/// The main entry point of the application.
///
/// Sets up logging, builds the reference maze, and runs the terminal game loop.
pub fn main() -> anyhow::Result<()> {
    let options = Options::parse(env::args().skip(1))?;
    init_tracing(&options.log_path)?;

    let rng = match options.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    info!(seed = ?options.seed, frame_time = ?options.frame_time, "Starting");

    let map = Map::reference().context("Could not build the maze")?;
    let game = Game::new(map, MonotonicClock::new(), rng).context("Could not create game")?;

    App::new(game, options.frame_time).run().context("Game loop failed")?;
    Ok(())
}
