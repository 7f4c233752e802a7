//! Rollout mode: evaluate the A* search agent over many episodes.

use anyhow::Result;

use crate::agents::SearchAgent;
use crate::game::{GridWorld, WorldConfig};
use crate::metrics::RunStats;

/// Configuration for rollout mode.
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Number of episodes to run.
    pub num_episodes: usize,

    /// Step cap per episode; breaks cycles where the agent survives
    /// without ever reaching the food.
    pub max_steps_per_episode: usize,

    /// Log progress every N episodes.
    pub log_frequency: usize,

    /// World configuration (grid size, rewards).
    pub world_config: WorldConfig,

    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl RolloutConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            max_steps_per_episode: 10_000,
            log_frequency: 10,
            world_config: WorldConfig::default(),
            seed: None,
        }
    }
}

/// Runs the search agent episode by episode and reports statistics.
pub struct RolloutMode {
    world: GridWorld,
    agent: SearchAgent,
    stats: RunStats,
    config: RolloutConfig,
}

impl RolloutMode {
    pub fn new(config: RolloutConfig) -> Result<Self> {
        let (world, agent) = match config.seed {
            Some(seed) => (
                GridWorld::with_seed(config.world_config.clone(), seed)?,
                SearchAgent::with_seed(seed),
            ),
            None => (
                GridWorld::new(config.world_config.clone())?,
                SearchAgent::new(),
            ),
        };

        Ok(Self {
            world,
            agent,
            stats: RunStats::new(100),
            config,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for episode in 0..self.config.num_episodes {
            let (reward, steps, score) = self.run_episode()?;
            self.stats.record_episode(reward, steps, score);

            if (episode + 1) % self.config.log_frequency == 0 {
                println!(
                    "[Episode {}/{}] {}",
                    episode + 1,
                    self.config.num_episodes,
                    self.stats.format_summary()
                );
            }
        }

        println!("\nRollout complete.");
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Run one episode to termination or the step cap.
    fn run_episode(&mut self) -> Result<(f64, usize, u32)> {
        let mut state = self.world.reset()?;
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;

        loop {
            let action = self.agent.get_move(&state);
            let outcome = self.world.step(action)?;

            episode_reward += outcome.reward as f64;
            episode_steps += 1;
            state = outcome.state;

            if outcome.done || episode_steps >= self.config.max_steps_per_episode {
                break;
            }
        }

        Ok((episode_reward, episode_steps, state.score))
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("A* Search Rollout - Snake Agents");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.num_episodes);
        println!(
            "Grid: {}x{}",
            self.config.world_config.grid_width, self.config.world_config.grid_height
        );
        println!("Step cap: {}", self.config.max_steps_per_episode);
        println!("{}", "=".repeat(70));
        println!();
    }
}
