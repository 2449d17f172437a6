use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    facilities::Facility,
    rng::SystemRng,
    world::{FactionId, World},
};

/// Player city growth: +1 population each turn, one more with a farm.
pub struct GrowthSystem;

impl GrowthSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GrowthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for GrowthSystem {
    fn name(&self) -> &str {
        "growth"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let mut gain = 1;
        if world.player().city.has_facility(Facility::Farm) {
            gain += 1;
        }
        world.faction_mut(FactionId::Player).city.population += gain;
        Ok(())
    }
}
