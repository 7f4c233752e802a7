//! Training mode for the linear TD learner.
//!
//! Runs episodes with the learning agent, feeding it every transition and
//! logging progress periodically. Weights live in memory for the duration
//! of the run; persisting them is out of scope.

use anyhow::{Context, Result};

use crate::agents::{LearnerConfig, LearningAgent};
use crate::game::{GridWorld, WorldConfig};
use crate::metrics::RunStats;

/// Configuration for training mode.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to train.
    pub num_episodes: usize,

    /// Step cap per episode, so an agent that learns to survive without
    /// eating cannot stall the run.
    pub max_steps_per_episode: usize,

    /// Log training progress every N episodes.
    pub log_frequency: usize,

    /// World configuration (grid size, rewards).
    pub world_config: WorldConfig,

    /// Learner hyperparameters.
    pub learner_config: LearnerConfig,

    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl TrainConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            max_steps_per_episode: 2_000,
            log_frequency: 100,
            world_config: WorldConfig::default(),
            learner_config: LearnerConfig::default(),
            seed: None,
        }
    }
}

/// Online training loop for the learning agent.
pub struct TrainMode {
    world: GridWorld,
    agent: LearningAgent,
    stats: RunStats,
    config: TrainConfig,
}

impl TrainMode {
    pub fn new(config: TrainConfig) -> Result<Self> {
        config
            .learner_config
            .validate()
            .context("invalid learner configuration")?;

        let (world, agent) = match config.seed {
            Some(seed) => (
                GridWorld::with_seed(config.world_config.clone(), seed)?,
                LearningAgent::with_seed(config.learner_config.clone(), seed),
            ),
            None => (
                GridWorld::new(config.world_config.clone())?,
                LearningAgent::new(config.learner_config.clone()),
            ),
        };

        Ok(Self {
            world,
            agent,
            stats: RunStats::new(100),
            config,
        })
    }

    /// Run the training loop.
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

        println!("\nTraining complete.");
        println!("{}", self.stats.format_summary());
        println!("Final weights: {:?}", self.agent.weights());

        Ok(())
    }

    /// Run one episode, updating the agent on every transition.
    fn run_episode(&mut self) -> Result<(f64, usize, u32)> {
        let mut state = self.world.reset()?;
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;

        loop {
            let action = self.agent.get_move(&state);
            let outcome = self.world.step(action)?;

            let delta = self
                .agent
                .update(&state, action, outcome.reward, &outcome.state, outcome.done);
            self.stats.record_td_error(delta);

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
        println!("TD(0) Training - Snake Agents");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.num_episodes);
        println!(
            "Grid: {}x{}",
            self.config.world_config.grid_width, self.config.world_config.grid_height
        );
        println!("Learner:");
        println!("  Epsilon: {}", self.config.learner_config.epsilon);
        println!("  Alpha: {}", self.config.learner_config.alpha);
        println!("  Gamma: {}", self.config.learner_config.gamma);
        println!("Logging: Every {} episodes", self.config.log_frequency);
        println!("{}", "=".repeat(70));
        println!();
    }
}
