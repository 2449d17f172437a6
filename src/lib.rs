pub mod commands;
pub mod engine;
pub mod facilities;
pub mod map;
pub mod noise;
pub mod placement;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod web;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, TurnSummary};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::World;
