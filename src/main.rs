//! Wordle Stats - CLI
//!
//! Play Wordle at the terminal; each player's results are kept in a record
//! file under the data directory.

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wordle_stats::{
    config::{AppConfig, USERNAMES_FILENAME},
    console_app::{Console, ConsoleApp},
    players::MAX_NUM_GUESSES,
    wordlists::{load_dictionary_file, load_usernames_file},
};

#[derive(Parser)]
#[command(
    name = "wordle_stats",
    about = "Play Wordle in the terminal and track statistics per player",
    version,
    author
)]
struct Cli {
    /// Dictionary of five-letter words, one per line
    dictionary: PathBuf,

    /// Directory for player records
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Username list (default: <DATA_DIR>/users.txt)
    #[arg(short, long)]
    users: Option<PathBuf>,

    /// Seed for picking answers, for repeatable games
    #[arg(long)]
    seed: Option<u64>,

    /// Guesses allowed per game
    #[arg(short = 'g', long, default_value_t = MAX_NUM_GUESSES)]
    max_guesses: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        let mut config = AppConfig::new(self.dictionary);
        config.usernames_file = self
            .users
            .unwrap_or_else(|| self.data_dir.join(USERNAMES_FILENAME));
        config.data_dir = self.data_dir;
        config.max_guesses = self.max_guesses;
        config.seed = self.seed;
        config.color = !self.no_color;
        config
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "wordle_stats=debug" } else { "wordle_stats=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config();
    config.validate()?;

    let dictionary = load_dictionary_file(&config.dictionary)
        .with_context(|| format!("failed to read dictionary {}", config.dictionary.display()))?;
    if dictionary.is_empty() {
        bail!("dictionary {} has no five-letter words", config.dictionary.display());
    }

    let mut usernames = load_usernames_file(&config.usernames_file)
        .with_context(|| format!("failed to read usernames {}", config.usernames_file.display()))?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let console = Console::new(io::stdin().lock(), io::stdout().lock(), config.color);
    ConsoleApp::new(console, &config, &dictionary, &mut usernames, rng).run()
}
