//! The turn engine: owns the world, drives the fixed turn pipeline, and
//! exposes the command surface and read accessors the view layer uses.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

use crate::commands::{self, CommandOutcome};
use crate::facilities::Facility;
use crate::map::{TileGrid, TilePos};
use crate::placement::{self, PlacementError};
use crate::rng::{RngManager, SystemRng};
use crate::snapshot::{SnapshotError, SnapshotWriter};
use crate::systems::{EnemyMovementSystem, EnemyProductionSystem, GrowthSystem};
use crate::world::{UnitId, World, WorldSnapshot};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub cols: u32,
    pub rows: u32,
    pub snapshot_interval_turns: u64,
    pub snapshot_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("system '{name}' failed: {source}")]
    System { name: String, source: anyhow::Error },
}

pub struct SystemContext<'a> {
    pub turn: u64,
    pub scenario_name: &'a str,
}

/// One stage of the turn pipeline. Stages run in registration order every
/// turn; the order is part of the simulation contract.
pub trait System: Send {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// The standard turn pipeline: growth, then enemy production, then
    /// enemy movement.
    pub fn with_default_systems(self) -> Self {
        self.with_system(GrowthSystem::new())
            .with_system(EnemyProductionSystem::new())
            .with_system(EnemyMovementSystem::new())
    }

    /// Generate the map, place both cities, and assemble the engine.
    pub fn build(self) -> Result<Engine, EngineError> {
        let mut rng = RngManager::new(self.settings.seed);
        let grid = TileGrid::generate(
            self.settings.cols,
            self.settings.rows,
            self.settings.seed as f64,
        );
        let player_city = placement::place_city(&grid, &mut rng.stream("placement"))?;
        let enemy_city =
            placement::place_enemy_city(&grid, player_city, &mut rng.stream("placement"))?;
        let world = World::new(grid, player_city, enemy_city);
        Ok(self.assemble(world, rng))
    }

    /// Assemble the engine around a prebuilt world, skipping generation
    /// and placement. Used by tests and embedders with bespoke maps.
    pub fn build_with_world(self, world: World) -> Engine {
        let rng = RngManager::new(self.settings.seed);
        self.assemble(world, rng)
    }

    fn assemble(self, world: World, rng: RngManager) -> Engine {
        let snapshot_writer = SnapshotWriter::new(
            &self.settings.snapshot_dir,
            self.settings.snapshot_interval_turns,
        );
        Engine {
            world,
            rng,
            systems: self.systems,
            snapshot_writer,
            settings: self.settings,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnSummary {
    pub turn: u64,
    pub player_population: u32,
    pub enemy_units: usize,
    pub snapshot_path: Option<PathBuf>,
}

pub struct Engine {
    world: World,
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    snapshot_writer: SnapshotWriter,
    settings: EngineSettings,
}

impl Engine {
    /// Advance the simulation one turn: clear per-turn state, bump the
    /// counter, then run the pipeline.
    pub fn advance_turn(&mut self) -> Result<TurnSummary, EngineError> {
        self.world.begin_turn();
        let turn = self.world.turn();
        for system in &mut self.systems {
            let ctx = SystemContext {
                turn,
                scenario_name: &self.settings.scenario_name,
            };
            let mut rng = self.rng.stream(system.name());
            system
                .run(&ctx, &mut self.world, &mut rng)
                .map_err(|source| EngineError::System {
                    name: system.name().to_string(),
                    source,
                })?;
        }
        let snapshot_path =
            self.snapshot_writer
                .maybe_write(turn, &self.settings.scenario_name, &self.world)?;
        Ok(TurnSummary {
            turn,
            player_population: self.world.player().city.population,
            enemy_units: self.world.enemy().units.len(),
            snapshot_path,
        })
    }

    pub fn run(&mut self, turns: u64) -> Result<(), EngineError> {
        for _ in 0..turns {
            self.advance_turn()?;
        }
        Ok(())
    }

    pub fn submit_build(&mut self, facility: Facility) -> CommandOutcome {
        commands::build_facility(&mut self.world, facility)
    }

    pub fn submit_produce(&mut self) -> CommandOutcome {
        commands::produce_unit(&mut self.world)
    }

    pub fn submit_select(&mut self, x: u32, y: u32) -> CommandOutcome {
        commands::select_unit(&mut self.world, TilePos::new(x, y))
    }

    pub fn submit_move(&mut self, x: u32, y: u32) -> CommandOutcome {
        commands::move_selected(&mut self.world, TilePos::new(x, y))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn turn(&self) -> u64 {
        self.world.turn()
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.world.selected()
    }

    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot(&self.settings.scenario_name)
    }
}
