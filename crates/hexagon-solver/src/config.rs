//! Run configuration: scramble, move set, depth bound and goal.
//!
//! Loaded from JSON or TOML (picked by file extension). Every key is
//! optional; a missing file section falls back to the defaults below.
//!
//! ```
//! use hexagon_solver::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     moveMagnitudes = [0, 3, -3, 6]
//!     maxDepth = 4
//!     scramble = [[3, 0], [-3, -3]]
//!
//!     [goal]
//!     type = "solved"
//! "#).unwrap();
//!
//! let solver = config.solver_config().unwrap();
//! assert_eq!(solver.max_depth, 4);
//! assert_eq!(config.scramble.len(), 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::goal::{Goal, PatternError};
use crate::moves::{Move, ParseMoveError};
use crate::slot::SLOTS_PER_ROW;
use crate::solver::SolverConfig;

/// Turn sizes that keep corners off the slice axis on at least one row.
pub const DEFAULT_MOVE_MAGNITUDES: [i32; 9] = [0, 3, 15, 6, 12, 9, 1, 17, 2];

/// Recursion bound; the root level is depth 0.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Scramble applied to the solved state when none is configured.
pub const DEFAULT_SCRAMBLE: [(i32, i32); 12] = [
    (0, 0),
    (3, 0),
    (-3, -3),
    (0, 3),
    (1, 0),
    (0, 0),
    (0, 0),
    (0, 0),
    (0, 0),
    (3, 0),
    (-3, -3),
    (0, 3),
];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid move sequence: {0}")]
    Moves(#[from] ParseMoveError),

    #[error("invalid goal pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Goal as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum GoalConfig {
    #[default]
    CubeShape,
    Solved,
    /// Piece layouts per row, e.g. `"c1a e1a xx e2a ..."`.
    Pattern { top: String, bottom: String },
}

impl GoalConfig {
    pub fn to_goal(&self) -> Result<Goal, ConfigError> {
        match self {
            GoalConfig::CubeShape => Ok(Goal::CubeShape),
            GoalConfig::Solved => Ok(Goal::Solved),
            GoalConfig::Pattern { top, bottom } => Ok(Goal::pattern(top, bottom)?),
        }
    }
}

/// A complete run: what to scramble and how to search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Legal single-row turn sizes tried at every node.
    pub move_magnitudes: Vec<i32>,
    pub max_depth: usize,
    /// Worker threads; `None` lets rayon decide.
    pub threads: Option<usize>,
    pub goal: GoalConfig,
    /// Moves applied to the solved state before searching.
    pub scramble: Vec<Move>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            move_magnitudes: DEFAULT_MOVE_MAGNITUDES.to_vec(),
            max_depth: DEFAULT_MAX_DEPTH,
            threads: None,
            goal: GoalConfig::default(),
            scramble: DEFAULT_SCRAMBLE.iter().copied().map(Move::from).collect(),
        }
    }
}

impl Config {
    /// Loads a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            other => Err(ConfigError::Invalid(format!(
                "unsupported config format {other:?}, expected .json or .toml"
            ))),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Validates the search settings.
    pub fn solver_config(&self) -> Result<SolverConfig, ConfigError> {
        if self.move_magnitudes.is_empty() {
            return Err(ConfigError::Invalid(
                "moveMagnitudes must list at least one turn size".to_string(),
            ));
        }
        let limit = SLOTS_PER_ROW as i32;
        if let Some(bad) = self
            .move_magnitudes
            .iter()
            .find(|m| !(-limit < **m && **m < limit))
        {
            return Err(ConfigError::Invalid(format!(
                "turn size {bad} is outside ({}, {limit})",
                -limit
            )));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::Invalid(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(SolverConfig {
            move_magnitudes: self.move_magnitudes.clone(),
            max_depth: self.max_depth,
            threads: self.threads,
            goal: self.goal.to_goal()?,
        })
    }
}
