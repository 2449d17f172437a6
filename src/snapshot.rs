//! Periodic JSON dumps of the world state.
//!
//! Snapshots are write-only diagnostics for inspection and tooling;
//! nothing in the simulation reads them back.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::world::{World, WorldSnapshot};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct SnapshotFile {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    state: WorldSnapshot,
}

pub struct SnapshotWriter {
    output_dir: PathBuf,
    interval_turns: u64,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>, interval_turns: u64) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            interval_turns,
        }
    }

    /// Interval 0 disables snapshotting entirely.
    pub fn should_write(&self, turn: u64) -> bool {
        self.interval_turns != 0 && turn % self.interval_turns == 0
    }

    pub fn maybe_write(
        &self,
        turn: u64,
        scenario_name: &str,
        world: &World,
    ) -> Result<Option<PathBuf>, SnapshotError> {
        if !self.should_write(turn) {
            return Ok(None);
        }
        let dir = self.output_dir.join(scenario_name);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("turn_{turn:06}.json"));
        let file = SnapshotFile {
            generated_at: Utc::now(),
            state: world.snapshot(scenario_name),
        };
        fs::write(&path, serde_json::to_string_pretty(&file)?)?;
        Ok(Some(path))
    }
}
