use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::game::{Direction, Position, Snapshot};

/// Frontier entry, ordered so the default max-heap pops the lowest
/// f = g + h first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    f: i32,
    g: i32,
    pos: Position,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| self.pos.cmp(&other.pos))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pathfinding agent: A* from the head to the food.
///
/// Body segments other than the tail are obstacles; the tail cell vacates
/// by the time the snake could reach it, matching the world's own
/// collision rule. Carries no learned state, only an RNG for the fallback
/// choice when the food is unreachable.
pub struct SearchAgent {
    rng: StdRng,
}

impl SearchAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed constructor for reproducible fallback choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick the next move for the supplied state.
    ///
    /// Returns the first step of a shortest path to the food when one
    /// exists; otherwise any immediately safe direction uniformly at
    /// random; otherwise Right, a forced and likely lethal move.
    pub fn get_move(&mut self, state: &Snapshot) -> Direction {
        let start = state.head();
        let live = state.snake.len().saturating_sub(1);
        let obstacles: HashSet<Position> = state.snake[..live].iter().copied().collect();

        if let Some(path) = astar(start, state.food, &obstacles, state) {
            if path.len() > 1 {
                if let Some(direction) = start.direction_to(path[1]) {
                    return direction;
                }
            }
        }

        self.fallback_move(start, &obstacles, state)
    }

    /// Any in-bounds, obstacle-free direction, chosen uniformly among the
    /// safe ones; Right when every move is lethal.
    fn fallback_move(
        &mut self,
        head: Position,
        obstacles: &HashSet<Position>,
        state: &Snapshot,
    ) -> Direction {
        let safe: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| {
                let next = head.moved(*direction);
                state.in_bounds(next) && !obstacles.contains(&next)
            })
            .collect();

        safe.choose(&mut self.rng)
            .copied()
            .unwrap_or(Direction::Right)
    }
}

impl Default for SearchAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// A* shortest path over the 4-connected grid, unit step cost, Manhattan
/// heuristic. Returns the full path from `start` to `goal`, or None when
/// the goal is unreachable.
fn astar(
    start: Position,
    goal: Position,
    obstacles: &HashSet<Position>,
    state: &Snapshot,
) -> Option<Vec<Position>> {
    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_score: HashMap<Position, i32> = HashMap::new();

    g_score.insert(start, 0);
    open.push(Node {
        f: start.manhattan(goal),
        g: 0,
        pos: start,
    });

    while let Some(Node { g, pos, .. }) = open.pop() {
        if pos == goal {
            return Some(reconstruct_path(&came_from, pos));
        }
        // Stale queue entry superseded by a shorter route.
        if g > *g_score.get(&pos).unwrap_or(&i32::MAX) {
            continue;
        }

        for direction in Direction::ALL {
            let neighbor = pos.moved(direction);
            if !state.in_bounds(neighbor) || obstacles.contains(&neighbor) {
                continue;
            }
            let tentative = g + 1;
            if tentative < *g_score.get(&neighbor).unwrap_or(&i32::MAX) {
                came_from.insert(neighbor, pos);
                g_score.insert(neighbor, tentative);
                open.push(Node {
                    f: tentative + neighbor.manhattan(goal),
                    g: tentative,
                    pos: neighbor,
                });
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<Position, Position>, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(snake: Vec<Position>, food: Position) -> Snapshot {
        Snapshot {
            grid_width: 10,
            grid_height: 10,
            snake,
            food,
            score: 0,
            game_over: false,
        }
    }

    #[test]
    fn test_straight_corridor_returns_right() {
        let state = snapshot(vec![Position::new(0, 0)], Position::new(5, 0));
        let mut agent = SearchAgent::with_seed(3);
        assert_eq!(agent.get_move(&state), Direction::Right);
    }

    #[test]
    fn test_routes_around_own_body() {
        // A vertical wall of body directly to the right of the head; the
        // food sits behind it, so the first move must leave the row.
        let state = snapshot(
            vec![
                Position::new(4, 5),
                Position::new(5, 5),
                Position::new(5, 4),
                Position::new(5, 6),
                Position::new(5, 7),
            ],
            Position::new(6, 5),
        );
        let mut agent = SearchAgent::with_seed(3);
        let direction = agent.get_move(&state);

        // Any shortest detour starts by stepping off the blocked column.
        assert!(matches!(direction, Direction::Up | Direction::Down | Direction::Left));
    }

    #[test]
    fn test_path_length_is_shortest() {
        let state = snapshot(vec![Position::new(0, 0)], Position::new(3, 4));
        let obstacles = HashSet::new();
        let path = astar(Position::new(0, 0), Position::new(3, 4), &obstacles, &state).unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path[0], Position::new(0, 0));
        assert_eq!(*path.last().unwrap(), Position::new(3, 4));
    }

    #[test]
    fn test_unreachable_food_falls_back_to_safe_move() {
        // Food boxed into the corner by body segments; the head still has
        // free neighbors, so the fallback must pick a non-lethal one.
        let state = snapshot(
            vec![
                Position::new(5, 5),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(6, 5),
            ],
            Position::new(0, 0),
        );
        let mut agent = SearchAgent::with_seed(11);

        for _ in 0..32 {
            let direction = agent.get_move(&state);
            let next = state.head().moved(direction);
            assert!(state.in_bounds(next));
            assert!(!state.blocks_snake(next));
        }
    }

    #[test]
    fn test_no_safe_move_forces_right() {
        // Head trapped in the corner with both exits covered by live body.
        let state = snapshot(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ],
            Position::new(5, 5),
        );
        let mut agent = SearchAgent::with_seed(11);
        assert_eq!(agent.get_move(&state), Direction::Right);
    }

    #[test]
    fn test_tail_cell_is_not_an_obstacle() {
        // Food on the tail cell: reachable because the tail vacates.
        let state = snapshot(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
            ],
            Position::new(4, 5),
        );
        let mut agent = SearchAgent::with_seed(11);
        assert_eq!(agent.get_move(&state), Direction::Left);
    }
}
