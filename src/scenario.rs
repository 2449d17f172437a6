//! Scenario configuration: YAML files describing a playable setup.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::placement::MIN_CITY_SEPARATION;

fn default_cols() -> u32 {
    60
}

fn default_rows() -> u32 {
    36
}

fn default_snapshot_interval() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    /// Drives both terrain generation and the placement streams.
    pub seed: u64,
    #[serde(default = "default_cols")]
    pub cols: u32,
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default)]
    pub turns: Option<u64>,
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval_turns: u64,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario must define a non-empty name")]
    MissingName,
    #[error("grid dimensions must be non-zero, got {cols}x{rows}")]
    EmptyGrid { cols: u32, rows: u32 },
    #[error("a {cols}x{rows} grid cannot separate two cities by more than {min} tiles")]
    GridTooSmall { cols: u32, rows: u32, min: u32 },
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.name.trim().is_empty() {
            return Err(ScenarioError::MissingName);
        }
        if self.cols == 0 || self.rows == 0 {
            return Err(ScenarioError::EmptyGrid {
                cols: self.cols,
                rows: self.rows,
            });
        }
        // The farthest pair of tiles sits at Manhattan distance
        // (cols - 1) + (rows - 1); enemy placement needs strictly more
        // than the separation minimum.
        if (self.cols - 1) + (self.rows - 1) <= MIN_CITY_SEPARATION {
            return Err(ScenarioError::GridTooSmall {
                cols: self.cols,
                rows: self.rows,
                min: MIN_CITY_SEPARATION,
            });
        }
        Ok(())
    }

    pub fn turns(&self, override_turns: Option<u64>) -> u64 {
        override_turns.or(self.turns).unwrap_or(40)
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}
