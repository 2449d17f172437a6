use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    map::{Terrain, TilePos},
    rng::SystemRng,
    world::{FactionId, UnitId, World},
};

/// Greedy single-step chase toward the player city, eight-directional.
///
/// Units are processed in creation order against live occupancy, so an
/// earlier unit's move can block or unblock a later one within the same
/// turn. A unit whose candidate tile is out of bounds, ocean, or occupied
/// simply stays put; no alternative step is tried, and a boxed-in unit can
/// stay stuck forever. That blocking is observable gameplay, kept as is.
pub struct EnemyMovementSystem;

impl EnemyMovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnemyMovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for EnemyMovementSystem {
    fn name(&self) -> &str {
        "enemy_movement"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let target = world.player().city.pos;
        let ids: Vec<UnitId> = world.enemy().units.iter().map(|unit| unit.id).collect();
        for id in ids {
            let pos = world.enemy().unit(id).expect("enemy unit exists").pos;
            let step_x = (i64::from(target.x) - i64::from(pos.x)).signum();
            let step_y = (i64::from(target.y) - i64::from(pos.y)).signum();
            let candidate_x = i64::from(pos.x) + step_x;
            let candidate_y = i64::from(pos.y) + step_y;
            if candidate_x < 0 || candidate_y < 0 {
                continue;
            }
            let candidate = TilePos::new(candidate_x as u32, candidate_y as u32);
            if !world
                .grid()
                .terrain(candidate)
                .map_or(false, Terrain::passable)
            {
                continue;
            }
            if world.enemy().has_unit_at(candidate) || world.player().has_unit_at(candidate) {
                continue;
            }
            world.move_unit(FactionId::Enemy, id, candidate);
        }
        Ok(())
    }
}
