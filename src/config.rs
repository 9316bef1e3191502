use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_SEARCH_DEPTH: u8 = 4;
pub const MAX_SEARCH_DEPTH: u8 = 10;

/// Positional weights for an 8x8 board (corners are most valuable).
pub const STANDARD_WEIGHTS: [[i32; 8]; 8] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

/// Tunables for the computer player.
///
/// Deserializes from a partial object; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Plies searched below each root move.
    pub search_depth: u8,
    /// Square weight table used for boards of the same size. Other sizes fall
    /// back to corner/edge weights.
    pub position_weights: Vec<Vec<i32>>,
}

impl EngineConfig {
    pub fn with_depth(search_depth: u8) -> Self {
        Self {
            search_depth,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.search_depth > MAX_SEARCH_DEPTH {
            return Err(EngineError::InvalidConfig(format!(
                "searchDepth must be at most {MAX_SEARCH_DEPTH}, got {}",
                self.search_depth
            )));
        }

        validate_weights(&self.position_weights)
    }
}

/// Checks that a positional weight table is non-empty and square.
pub fn validate_weights(weights: &[Vec<i32>]) -> Result<(), EngineError> {
    let size = weights.len();
    if size == 0 {
        return Err(EngineError::InvalidConfig(
            "positionWeights must not be empty".to_string(),
        ));
    }
    if let Some(row) = weights.iter().position(|row| row.len() != size) {
        return Err(EngineError::InvalidConfig(format!(
            "positionWeights row {row} must have {size} entries"
        )));
    }
    Ok(())
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            position_weights: STANDARD_WEIGHTS.iter().map(|row| row.to_vec()).collect(),
        }
    }
}
