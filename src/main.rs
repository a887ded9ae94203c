use anyhow::Result;
use clap::Parser;
use greedy_snake::game::GameConfig;
use greedy_snake::modes::HumanMode;
use greedy_snake::score::FileScoreStore;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "greedy_snake")]
#[command(version, about = "Grid snake game for the terminal")]
struct Cli {
    /// JSON file with game settings (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length; re-centers the snake for the new size
    #[arg(long)]
    board_size: Option<usize>,

    /// Where the best score is kept between runs
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Log file (the terminal is taken by the game)
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log level; RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    greedy_snake::logger::init(&cli.log_file, cli.log_level)?;

    // Build the game configuration from the file and CLI overrides
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = cli.board_size {
        let layout = GameConfig::for_board(size);
        config = GameConfig {
            board_size: size,
            initial_snake: layout.initial_snake,
            initial_food: layout.initial_food,
            ..config
        };
    }
    config.validate()?;
    log::info!("Starting with {:?}", config);

    let store = FileScoreStore::new(cli.high_score_file);
    let mut human_mode = HumanMode::new(config, store);
    human_mode.run().await?;

    Ok(())
}
