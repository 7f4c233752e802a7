use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid.
///
/// Serializes as a two-element `[x, y]` array, which is the shape external
/// callers exchange snapshots in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position one cell in a direction.
    pub fn moved(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to another position.
    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The direction that moves this position one cell onto `other`,
    /// if the two are 4-adjacent.
    pub fn direction_to(&self, other: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.moved(*d) == other)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, i32) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

/// The snake, body segments head-first.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0.
    pub body: Vec<Position>,
    /// Current direction of movement.
    pub direction: Direction,
}

impl Snake {
    /// Create a snake laid out behind the head, opposite to its direction
    /// of travel.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let mut body = vec![head];
        for i in 1..length {
            body.push(body[i - 1].moved(back));
        }
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Whether any live segment occupies `pos`.
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Whether a segment other than the current tail occupies `pos`.
    ///
    /// The tail cell vacates on the same tick the head would enter it, so
    /// it does not block motion.
    pub fn blocks(&self, pos: Position) -> bool {
        let live = self.body.len().saturating_sub(1);
        self.body[..live].contains(&pos)
    }

    /// Advance the head onto `new_head`, keeping the tail when growing.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }
}

/// Observable world state and the wire shape shared with external callers.
///
/// Field names are the stable contract: a driver, web layer, or persisted
/// score record addresses exactly these keys. Snapshots are owned values
/// with deep-copy semantics; mutating one never affects the world it came
/// from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Snake body as `[x, y]` pairs, head first.
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub game_over: bool,
}

impl Snapshot {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Whether any body segment occupies `pos`.
    pub fn occupied(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// Whether entering `pos` would collide, under the world rule that the
    /// current tail cell is already vacated.
    pub fn blocks_snake(&self, pos: Position) -> bool {
        let live = self.snake.len().saturating_sub(1);
        self.snake[..live].contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_moved() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved(Direction::Right), Position::new(6, 5));
        assert_eq!(pos.moved(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved(Direction::Left), Position::new(4, 5));
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(Position::new(0, 0).manhattan(Position::new(3, 4)), 7);
        assert_eq!(Position::new(3, 4).manhattan(Position::new(0, 0)), 7);
        assert_eq!(Position::new(2, 2).manhattan(Position::new(2, 2)), 0);
    }

    #[test]
    fn test_direction_between_adjacent_cells() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.direction_to(Position::new(6, 5)), Some(Direction::Right));
        assert_eq!(pos.direction_to(Position::new(4, 5)), Some(Direction::Left));
        assert_eq!(pos.direction_to(Position::new(5, 4)), Some(Direction::Up));
        assert_eq!(pos.direction_to(Position::new(5, 6)), Some(Direction::Down));
        assert_eq!(pos.direction_to(Position::new(7, 5)), None);
        assert_eq!(pos.direction_to(pos), None);
    }

    #[test]
    fn test_snake_creation_lays_body_behind_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
    }

    #[test]
    fn test_blocks_excludes_tail() {
        // Body: (5,5) (4,5) (3,5); the tail (3,5) vacates this tick.
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.blocks(Position::new(5, 5)));
        assert!(snake.blocks(Position::new(4, 5)));
        assert!(!snake.blocks(Position::new(3, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = Snapshot {
            grid_width: 10,
            grid_height: 10,
            snake: vec![Position::new(5, 5), Position::new(4, 5)],
            food: Position::new(7, 7),
            score: 2,
            game_over: false,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["grid_width"], 10);
        assert_eq!(json["grid_height"], 10);
        assert_eq!(json["snake"][0][0], 5);
        assert_eq!(json["snake"][0][1], 5);
        assert_eq!(json["food"][0], 7);
        assert_eq!(json["score"], 2);
        assert_eq!(json["game_over"], false);

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_snapshot_queries() {
        let snapshot = Snapshot {
            grid_width: 10,
            grid_height: 10,
            snake: vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
            ],
            food: Position::new(7, 7),
            score: 0,
            game_over: false,
        };

        assert_eq!(snapshot.head(), Position::new(5, 5));
        assert!(snapshot.in_bounds(Position::new(0, 0)));
        assert!(snapshot.in_bounds(Position::new(9, 9)));
        assert!(!snapshot.in_bounds(Position::new(-1, 0)));
        assert!(!snapshot.in_bounds(Position::new(10, 0)));

        assert!(snapshot.occupied(Position::new(3, 5)));
        assert!(!snapshot.blocks_snake(Position::new(3, 5)));
        assert!(snapshot.blocks_snake(Position::new(4, 5)));
    }
}
