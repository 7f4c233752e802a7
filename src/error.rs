use thiserror::Error;

/// Errors produced by the core simulation.
///
/// Unreachable food is deliberately absent: the search agent handles it
/// with its fallback policy, and a finished game signals through the
/// `game_over` flag rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakeError {
    /// An action code outside 0..=3 reached the boundary.
    #[error("invalid action code {0}, expected 0..=3")]
    InvalidAction(u8),

    /// Food placement failed because the snake occupies every cell.
    #[error("no free cell left on the grid to place food")]
    NoFreeCell,

    /// The configured grid cannot hold the initial snake layout.
    #[error("invalid world configuration: {0}")]
    InvalidConfig(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SnakeError::InvalidAction(7).to_string(),
            "invalid action code 7, expected 0..=3"
        );
        assert!(SnakeError::NoFreeCell.to_string().contains("no free cell"));
    }
}
