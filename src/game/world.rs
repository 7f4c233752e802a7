use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::action::Direction;
use super::config::WorldConfig;
use super::state::{Position, Snake, Snapshot};
use crate::error::SnakeError;

/// Type of collision that ended a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Snake hit a wall.
    Wall,
    /// Snake hit its own body.
    Body,
}

/// Additional information about a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step.
    pub ate_food: bool,
    /// Type of collision if one occurred.
    pub collision: Option<CollisionKind>,
}

/// Result of a world step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Observable state after the step.
    pub state: Snapshot,
    /// Reward for this step.
    pub reward: i32,
    /// Whether the episode has terminated.
    pub done: bool,
    /// Additional information about the step.
    pub info: StepInfo,
}

/// The deterministic world state machine.
///
/// Owns the grid, snake, food, and score for one simulation instance, and
/// advances exactly one tick per action. An instance belongs to a single
/// driver; it performs no internal synchronization.
pub struct GridWorld {
    config: WorldConfig,
    rng: StdRng,
    snake: Snake,
    food: Position,
    score: u32,
    steps: u32,
    game_over: bool,
    /// Cell the head would have entered on the lethal tick, kept for
    /// display only; the observable body never includes it.
    crash_site: Option<Position>,
}

impl GridWorld {
    /// Create a world seeded from entropy.
    pub fn new(config: WorldConfig) -> Result<Self, SnakeError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a world with a fixed seed for reproducible food placement.
    pub fn with_seed(config: WorldConfig, seed: u64) -> Result<Self, SnakeError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: WorldConfig, rng: StdRng) -> Result<Self, SnakeError> {
        config.validate()?;
        let mut world = Self {
            snake: Self::initial_snake(&config),
            food: Position::new(0, 0),
            score: 0,
            steps: 0,
            game_over: false,
            crash_site: None,
            config,
            rng,
        };
        world.food = world.place_food()?;
        Ok(world)
    }

    fn initial_snake(config: &WorldConfig) -> Snake {
        let center = Position::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        Snake::new(center, Direction::Right, config.initial_snake_length)
    }

    /// Reinitialize to the starting configuration and return the state.
    pub fn reset(&mut self) -> Result<Snapshot, SnakeError> {
        self.snake = Self::initial_snake(&self.config);
        self.score = 0;
        self.steps = 0;
        self.game_over = false;
        self.crash_site = None;
        self.food = self.place_food()?;
        Ok(self.snapshot())
    }

    /// Advance the world one tick.
    ///
    /// A terminal world is left untouched and reports reward 0, done=true.
    /// A requested 180-degree reversal is replaced by the current heading.
    /// The only error is [`SnakeError::NoFreeCell`], raised when eating
    /// leaves no cell to place food on.
    pub fn step(&mut self, action: Direction) -> Result<StepOutcome, SnakeError> {
        if self.game_over {
            return Ok(StepOutcome {
                state: self.snapshot(),
                reward: 0,
                done: true,
                info: StepInfo::default(),
            });
        }

        let direction = if action.is_opposite(self.snake.direction) {
            self.snake.direction
        } else {
            action
        };
        self.snake.direction = direction;
        self.steps += 1;

        let new_head = self.snake.head().moved(direction);

        if let Some(kind) = self.collision_at(new_head) {
            // Body and score stay at their pre-death values; only the
            // terminal flag and the crash site change.
            self.game_over = true;
            self.crash_site = Some(new_head);
            return Ok(StepOutcome {
                state: self.snapshot(),
                reward: self.config.death_penalty,
                done: true,
                info: StepInfo {
                    ate_food: false,
                    collision: Some(kind),
                },
            });
        }

        let ate_food = new_head == self.food;
        self.snake.advance(new_head, ate_food);

        let reward = if ate_food {
            self.score += 1;
            self.food = self.place_food()?;
            self.config.food_reward
        } else {
            self.config.step_reward
        };

        Ok(StepOutcome {
            state: self.snapshot(),
            reward,
            done: false,
            info: StepInfo {
                ate_food,
                collision: None,
            },
        })
    }

    /// Read-only snapshot of the observable state.
    pub fn get_state(&self) -> Snapshot {
        self.snapshot()
    }

    /// Replace the world state from an externally held snapshot.
    ///
    /// The travel direction is not part of the wire shape; it is
    /// reconstructed from the second segment's position relative to the
    /// head, defaulting to Right when the body is a single segment or the
    /// segments are not adjacent.
    pub fn set_state(&mut self, state: Snapshot) {
        self.config.grid_width = state.grid_width;
        self.config.grid_height = state.grid_height;

        let direction = if state.snake.len() > 1 {
            state.snake[1]
                .direction_to(state.snake[0])
                .unwrap_or(Direction::Right)
        } else {
            Direction::Right
        };

        self.snake = Snake {
            body: state.snake,
            direction,
        };
        self.food = state.food;
        self.score = state.score;
        self.game_over = state.game_over;
        self.crash_site = None;
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// The cell the head crashed into, if the game ended in a collision.
    pub fn crash_site(&self) -> Option<Position> {
        self.crash_site
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            snake: self.snake.body.clone(),
            food: self.food,
            score: self.score,
            game_over: self.game_over,
        }
    }

    fn collision_at(&self, pos: Position) -> Option<CollisionKind> {
        if pos.x < 0
            || pos.x >= self.config.grid_width as i32
            || pos.y < 0
            || pos.y >= self.config.grid_height as i32
        {
            return Some(CollisionKind::Wall);
        }
        if self.snake.blocks(pos) {
            return Some(CollisionKind::Body);
        }
        None
    }

    /// Draw a food position uniformly from the free cells.
    ///
    /// Rejection sampling over the whole grid; the occupancy guard keeps a
    /// fully occupied grid from looping forever.
    fn place_food(&mut self) -> Result<Position, SnakeError> {
        if self.snake.len() >= self.config.grid_width * self.config.grid_height {
            return Err(SnakeError::NoFreeCell);
        }
        loop {
            let pos = Position::new(
                self.rng.gen_range(0..self.config.grid_width) as i32,
                self.rng.gen_range(0..self.config.grid_height) as i32,
            );
            if !self.snake.occupies(pos) {
                return Ok(pos);
            }
        }
    }
}
