use crate::error::ConfigError;

/// No 8-puzzle instance needs more than 31 moves.
pub const DEFAULT_MAX_DEPTH: usize = 31;
pub const DEFAULT_MAX_EXPANSIONS: usize = 100_000;
/// Depth-limited search recurses once per level.
pub const MAX_SUPPORTED_DEPTH: usize = 80;

/// Search limits shared by both algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Deepest bound iterative deepening tries.
    pub max_depth: usize,
    /// A* gives up after expanding this many nodes.
    pub max_expansions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansions == 0 {
            return Err(ConfigError::ZeroExpansions);
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ConfigError::DepthTooLarge(
                self.max_depth,
                MAX_SUPPORTED_DEPTH,
            ));
        }
        Ok(())
    }
}
