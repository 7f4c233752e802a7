//! Driver boundary: one world plus one agent per session.
//!
//! An external layer (web, CLI, tests) owns sessions through an explicit
//! [`SessionRegistry`] keyed by opaque handles; the agent flavor is a
//! tagged variant resolved once at session start. Raw wire action codes
//! enter through [`Direction::from_action`], so nothing past this boundary
//! sees an unvalidated integer.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::agents::{LearningAgent, SearchAgent, FEATURE_COUNT};
use crate::error::SnakeError;
use crate::game::{Direction, GridWorld, Snapshot, WorldConfig};

/// The decision source driving a session, fixed at session start.
pub enum AgentKind {
    /// A* pathfinding.
    Search(SearchAgent),
    /// Linear TD learner; fed every transition it generates.
    Learning(LearningAgent),
    /// Actions are supplied by the caller on each tick.
    Manual,
}

impl AgentKind {
    pub fn is_learning(&self) -> bool {
        matches!(self, AgentKind::Learning(_))
    }
}

/// One tick as reported to the external caller.
///
/// The wire fields of the post-step state are flattened in, alongside the
/// reward and the action actually applied. Weights are reported only for
/// learning sessions, for progress display.
#[derive(Debug, Clone, Serialize)]
pub struct TickOutcome {
    #[serde(flatten)]
    pub state: Snapshot,
    pub reward: i32,
    pub action: u8,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<[f64; FEATURE_COUNT]>,
}

/// A world/agent pair owned by exactly one driver.
pub struct Session {
    world: GridWorld,
    agent: AgentKind,
}

impl Session {
    pub fn new(config: WorldConfig, agent: AgentKind) -> Result<Self, SnakeError> {
        Ok(Self {
            world: GridWorld::new(config)?,
            agent,
        })
    }

    /// Assemble a session from an existing world, keeping its seed.
    pub fn from_parts(world: GridWorld, agent: AgentKind) -> Self {
        Self { world, agent }
    }

    pub fn state(&self) -> Snapshot {
        self.world.get_state()
    }

    /// Rehydrate the world from an externally held snapshot.
    pub fn restore(&mut self, state: Snapshot) {
        self.world.set_state(state);
    }

    /// Start a fresh episode.
    ///
    /// A learning agent keeps its weights across episodes; training
    /// continues where the previous game left off.
    pub fn reset(&mut self) -> Result<Snapshot, SnakeError> {
        self.world.reset()
    }

    pub fn agent(&self) -> &AgentKind {
        &self.agent
    }

    /// Advance the session one tick.
    ///
    /// Manual sessions apply `manual_action` (Right when the caller sent
    /// none, as the original driver does); agent sessions compute their
    /// own move from the pre-step snapshot and ignore `manual_action`.
    /// Learning sessions are fed the resulting transition before the
    /// outcome is reported.
    pub fn tick(&mut self, manual_action: Option<Direction>) -> Result<TickOutcome, SnakeError> {
        let before = self.world.get_state();

        let action = match &mut self.agent {
            AgentKind::Manual => manual_action.unwrap_or(Direction::Right),
            AgentKind::Search(agent) => agent.get_move(&before),
            AgentKind::Learning(agent) => agent.get_move(&before),
        };

        let outcome = self.world.step(action)?;

        if let AgentKind::Learning(agent) = &mut self.agent {
            agent.update(&before, action, outcome.reward, &outcome.state, outcome.done);
        }

        let weights = match &self.agent {
            AgentKind::Learning(agent) => Some(agent.weights()),
            _ => None,
        };

        Ok(TickOutcome {
            state: outcome.state,
            reward: outcome.reward,
            action: action.action(),
            done: outcome.done,
            weights,
        })
    }
}

/// Opaque session handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Registry of live sessions.
///
/// Replaces the original driver's ambient global dictionaries with owned
/// state and an explicit create/evict lifecycle. The registry itself does
/// no locking; a concurrent host wraps it.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    next_id: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and return its handle and initial state.
    pub fn create(
        &mut self,
        config: WorldConfig,
        agent: AgentKind,
    ) -> Result<(SessionId, Snapshot), SnakeError> {
        let session = Session::new(config, agent)?;
        let id = SessionId(self.next_id);
        self.next_id += 1;
        let state = session.state();
        self.sessions.insert(id, session);
        Ok((id, state))
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Evict a session, returning it so a caller can read a final score.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
