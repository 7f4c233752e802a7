use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_agents::game::WorldConfig;
use snake_agents::modes::{RolloutConfig, RolloutMode, TrainConfig, TrainMode};

#[derive(Parser)]
#[command(name = "snake-agents")]
#[command(version, about = "Grid Snake simulation driven by interchangeable agents")]
struct Cli {
    /// Agent mode to run
    #[arg(long, default_value = "search")]
    mode: Mode,

    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Number of episodes to run
    #[arg(long, default_value = "100")]
    episodes: usize,

    /// Log progress every N episodes
    #[arg(long)]
    log_frequency: Option<usize>,

    /// Fixed seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Evaluate the A* search agent
    Search,
    /// Train the TD(0) learning agent
    Train,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let world_config = WorldConfig::new(cli.width, cli.height);

    match cli.mode {
        Mode::Search => {
            let mut config = RolloutConfig::new(cli.episodes);
            config.world_config = world_config;
            config.seed = cli.seed;
            if let Some(log_frequency) = cli.log_frequency {
                config.log_frequency = log_frequency;
            }
            RolloutMode::new(config)?.run()?;
        }
        Mode::Train => {
            let mut config = TrainConfig::new(cli.episodes);
            config.world_config = world_config;
            config.seed = cli.seed;
            if let Some(log_frequency) = cli.log_frequency {
                config.log_frequency = log_frequency;
            }
            TrainMode::new(config)?.run()?;
        }
    }

    Ok(())
}
