//! Decision-making agents over the observable world state.
//!
//! Both agents consume [`crate::game::Snapshot`] values supplied by the
//! driver and return the next [`crate::game::Direction`]:
//! - [`SearchAgent`]: A* pathfinding with a safe-move fallback
//! - [`LearningAgent`]: linear Q-function trained online with TD(0)

pub mod learning;
pub mod search;

pub use learning::{LearnerConfig, LearningAgent, FEATURE_COUNT};
pub use search::SearchAgent;
