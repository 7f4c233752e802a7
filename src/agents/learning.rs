use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SnakeError;
use crate::game::{Direction, Snapshot};

/// Number of features in the linear value model.
pub const FEATURE_COUNT: usize = 4;

/// Starting weights: bias, food distance (closer is better), adjacent free
/// space (more is better), danger (large penalty).
const INITIAL_WEIGHTS: [f64; FEATURE_COUNT] = [0.0, -2.0, 0.1, -100.0];

/// Hyperparameters for the TD(0) learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Exploration rate: probability of a uniformly random action.
    pub epsilon: f64,
    /// Learning rate for the weight update.
    pub alpha: f64,
    /// Discount factor for bootstrapped targets.
    pub gamma: f64,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            alpha: 0.01,
            gamma: 0.9,
        }
    }
}

impl LearnerConfig {
    /// Check that all hyperparameters are in valid ranges.
    pub fn validate(&self) -> Result<(), SnakeError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(SnakeError::InvalidConfig("epsilon must be in [0, 1]"));
        }
        if self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(SnakeError::InvalidConfig("alpha must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(SnakeError::InvalidConfig("gamma must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Linear-model reinforcement learner.
///
/// Estimates Q(state, action) as a dot product of a small hand-designed
/// feature vector with learned weights, picks actions epsilon-greedily,
/// and adjusts the weights online with one-step semi-gradient TD(0). The
/// weights live as long as the agent value; a driver that wants fresh
/// weights creates a fresh agent.
pub struct LearningAgent {
    weights: [f64; FEATURE_COUNT],
    config: LearnerConfig,
    rng: StdRng,
}

impl LearningAgent {
    pub fn new(config: LearnerConfig) -> Self {
        Self {
            weights: INITIAL_WEIGHTS,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed constructor for reproducible exploration.
    pub fn with_seed(config: LearnerConfig, seed: u64) -> Self {
        Self {
            weights: INITIAL_WEIGHTS,
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Feature vector for the position `action` would produce, without
    /// mutating anything.
    ///
    /// The danger feature checks the full current body, tail included.
    /// That is stricter than the world's own collision rule and stays
    /// that way: the learner gets a pessimistic safety signal.
    pub fn features(state: &Snapshot, action: Direction) -> [f64; FEATURE_COUNT] {
        let next = state.head().moved(action);
        let danger = !state.in_bounds(next) || state.occupied(next);

        let food_distance = next.manhattan(state.food) as f64;
        let free_space = if danger {
            0.0
        } else {
            Direction::ALL
                .into_iter()
                .filter(|d| {
                    let neighbor = next.moved(*d);
                    state.in_bounds(neighbor) && !state.occupied(neighbor)
                })
                .count() as f64
        };

        [1.0, food_distance, free_space, if danger { 1.0 } else { 0.0 }]
    }

    /// Linear value estimate for a (state, action) pair.
    pub fn q_value(&self, state: &Snapshot, action: Direction) -> f64 {
        Self::features(state, action)
            .iter()
            .zip(&self.weights)
            .map(|(f, w)| f * w)
            .sum()
    }

    /// Epsilon-greedy action selection.
    ///
    /// Exploration ignores the Q-values entirely; exploitation breaks ties
    /// uniformly at random among all maximizing actions.
    pub fn get_move(&mut self, state: &Snapshot) -> Direction {
        if self.rng.gen::<f64>() < self.config.epsilon {
            return Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        }

        let q_values: [f64; 4] =
            Direction::ALL.map(|direction| self.q_value(state, direction));
        let max_q = q_values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let best: Vec<Direction> = Direction::ALL
            .into_iter()
            .zip(q_values)
            .filter(|(_, q)| *q == max_q)
            .map(|(direction, _)| direction)
            .collect();

        best[self.rng.gen_range(0..best.len())]
    }

    /// One-step semi-gradient TD(0) update from an observed transition.
    ///
    /// Returns the TD error, which drivers record as a learning-progress
    /// signal.
    pub fn update(
        &mut self,
        state: &Snapshot,
        action: Direction,
        reward: i32,
        next_state: &Snapshot,
        done: bool,
    ) -> f64 {
        let target = if done {
            reward as f64
        } else {
            let max_next = Direction::ALL
                .into_iter()
                .map(|d| self.q_value(next_state, d))
                .fold(f64::NEG_INFINITY, f64::max);
            reward as f64 + self.config.gamma * max_next
        };

        let delta = target - self.q_value(state, action);
        let features = Self::features(state, action);
        for (weight, feature) in self.weights.iter_mut().zip(features) {
            *weight += self.config.alpha * delta * feature;
        }
        delta
    }

    /// Current weight vector, exposed for progress reporting.
    pub fn weights(&self) -> [f64; FEATURE_COUNT] {
        self.weights
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }
}
