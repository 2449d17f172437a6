use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{FactionId, World},
};

/// Enemy training: one warrior per turn, as long as the city tile holds no
/// enemy unit. A player unit on the tile does not block it.
pub struct EnemyProductionSystem;

impl EnemyProductionSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnemyProductionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for EnemyProductionSystem {
    fn name(&self) -> &str {
        "enemy_production"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let city_pos = world.enemy().city.pos;
        if !world.enemy().has_unit_at(city_pos) {
            world.spawn_unit(FactionId::Enemy, city_pos);
        }
        Ok(())
    }
}
