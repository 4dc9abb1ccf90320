use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use twisted_snake::game::{DEFAULT_BOARD_SIZE, DEFAULT_SPEED, GameConfig};
use twisted_snake::modes::HumanMode;
use twisted_snake::storage::{
    DEFAULT_HIGH_SCORE_FILE, FileHighScoreStore, HighScoreStore, MemoryHighScoreStore,
};

#[derive(Parser)]
#[command(name = "twisted_snake")]
#[command(version, about = "Snake that grows at both ends and teleports when it eats")]
struct Cli {
    /// Width and height of the square board
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    board_size: usize,

    /// Game ticks per second
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: u32,

    /// Where the high score is kept
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_persist: bool,

    /// Log file (the terminal belongs to the game)
    #[arg(long, default_value = "twisted_snake.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(level, Config::default(), log_file).context("Failed to initialize logger")?;

    let config = GameConfig::new(cli.board_size, cli.speed);
    config.validate().context("Invalid game configuration")?;

    let store: Box<dyn HighScoreStore> = if cli.no_persist {
        info!("High score kept in memory only");
        Box::new(MemoryHighScoreStore::default())
    } else {
        let file_store = FileHighScoreStore::new(&cli.high_score_file);
        info!("High score file: {:?}", file_store.path());
        Box::new(file_store)
    };

    info!(
        "Starting Twisted Snake: board {}x{}, {} ticks/s",
        config.board_size, config.board_size, config.speed
    );

    let mut human_mode = HumanMode::new(config, store)?;
    human_mode.run().await?;

    info!("Bye");
    Ok(())
}
