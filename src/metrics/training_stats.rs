//! Episode statistics tracking for agent runs.

use std::collections::VecDeque;

/// Rolling-window statistics over episodes and learner updates.
///
/// Tracks episode-level metrics (reward, length, score) and, for learning
/// runs, the per-update TD error, smoothed over a rolling window.
///
/// # Example
///
/// ```rust
/// use snake_agents::metrics::RunStats;
///
/// let mut stats = RunStats::new(100);
/// stats.record_episode(12.0, 140, 4);
/// stats.record_td_error(-0.3);
///
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct RunStats {
    episode_rewards: VecDeque<f64>,
    episode_lengths: VecDeque<usize>,
    episode_scores: VecDeque<u32>,
    /// Absolute TD errors from learner updates (rolling window).
    td_errors: VecDeque<f64>,

    total_episodes: usize,
    total_steps: usize,
    best_score: u32,
    window_size: usize,
}

impl RunStats {
    /// Create a tracker keeping the last `window_size` values per metric.
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            td_errors: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record a finished episode: accumulated reward, step count, score.
    pub fn record_episode(&mut self, reward: f64, length: usize, score: u32) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        if score > self.best_score {
            self.best_score = score;
        }
    }

    /// Record the TD error of one learner update.
    pub fn record_td_error(&mut self, delta: f64) {
        Self::push_deque(&mut self.td_errors, delta.abs(), self.window_size);
    }

    pub fn mean_episode_reward(&self) -> f64 {
        Self::mean_f64(&self.episode_rewards)
    }

    pub fn mean_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f64 / self.episode_lengths.len() as f64
        }
    }

    pub fn mean_episode_score(&self) -> f64 {
        if self.episode_scores.is_empty() {
            0.0
        } else {
            self.episode_scores.iter().sum::<u32>() as f64 / self.episode_scores.len() as f64
        }
    }

    /// Mean absolute TD error over the window, 0.0 before any update.
    pub fn mean_td_error(&self) -> f64 {
        Self::mean_f64(&self.td_errors)
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary for periodic progress logging.
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Best: {} | Len: {:.1} | TD_Err: {:.4}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.best_score,
            self.mean_episode_length(),
            self.mean_td_error(),
        )
    }

    fn mean_f64(deque: &VecDeque<f64>) -> f64 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f64>() / deque.len() as f64
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
