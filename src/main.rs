use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use snake::{config::Config, game::SnakeGame};

#[derive(Parser)]
#[command(name = "snake", about = "Snake on a wraparound grid")]
struct Args {
    /// YAML file with `grid_size` and `initial_speed_ms`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side
    #[arg(long)]
    grid_size: Option<i32>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    initial_speed: Option<u64>,

    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "snake=info".into()))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let mut config = match &args.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::default(),
    };
    if let Some(grid_size) = args.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(speed) = args.initial_speed {
        config.initial_speed_ms = speed;
    }
    config.validate()?;

    let mut game = SnakeGame::new(config)?;
    game.run()?;
    Ok(())
}
