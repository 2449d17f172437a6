//! Random start-tile selection for both cities.

use rand::Rng;
use thiserror::Error;

use crate::map::{Terrain, TileGrid, TilePos};

/// Sampling gives up after this many draws instead of spinning forever on
/// terrain with no qualifying tile.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// The enemy city must sit strictly farther than this Manhattan distance
/// from the player city.
pub const MIN_CITY_SEPARATION: u32 = 15;

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("no suitable start tile found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Pick a uniformly random non-ocean tile for the player city.
pub fn place_city(grid: &TileGrid, rng: &mut impl Rng) -> Result<TilePos, PlacementError> {
    sample(grid, rng, |_| true)
}

/// Pick a non-ocean tile for the enemy city, strictly farther than
/// [`MIN_CITY_SEPARATION`] from the player city.
pub fn place_enemy_city(
    grid: &TileGrid,
    player_city: TilePos,
    rng: &mut impl Rng,
) -> Result<TilePos, PlacementError> {
    sample(grid, rng, |pos| {
        pos.manhattan_distance(player_city) > MIN_CITY_SEPARATION
    })
}

fn sample(
    grid: &TileGrid,
    rng: &mut impl Rng,
    accept: impl Fn(TilePos) -> bool,
) -> Result<TilePos, PlacementError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = TilePos::new(rng.gen_range(0..grid.cols()), rng.gen_range(0..grid.rows()));
        let habitable = grid.terrain(pos).map_or(false, Terrain::passable);
        if habitable && accept(pos) {
            return Ok(pos);
        }
    }
    Err(PlacementError::Exhausted {
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngManager;

    fn all_plain(cols: u32, rows: u32) -> TileGrid {
        TileGrid::from_tiles(cols, rows, vec![Terrain::Plain; cols as usize * rows as usize])
    }

    #[test]
    fn placement_lands_on_passable_tiles() {
        for seed in 0..10 {
            let grid = TileGrid::generate(60, 36, seed as f64);
            let mut rng = RngManager::new(seed);
            let pos = place_city(&grid, &mut rng.stream("placement")).expect("tile found");
            assert!(grid.terrain(pos).expect("in bounds").passable());
        }
    }

    #[test]
    fn placement_is_reproducible_for_a_seed() {
        let grid = TileGrid::generate(60, 36, 0.0);
        let mut rng_a = RngManager::new(11);
        let mut rng_b = RngManager::new(11);
        let a = place_city(&grid, &mut rng_a.stream("placement")).unwrap();
        let b = place_city(&grid, &mut rng_b.stream("placement")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn enemy_city_keeps_its_distance() {
        let grid = all_plain(40, 40);
        let player = TilePos::new(0, 0);
        let mut rng = RngManager::new(3);
        for _ in 0..50 {
            let pos = place_enemy_city(&grid, player, &mut rng.stream("placement")).unwrap();
            assert!(pos.manhattan_distance(player) > MIN_CITY_SEPARATION);
        }
    }

    #[test]
    fn all_ocean_grid_exhausts_attempts() {
        let grid = TileGrid::from_tiles(8, 8, vec![Terrain::Ocean; 64]);
        let mut rng = RngManager::new(0);
        let err = place_city(&grid, &mut rng.stream("placement")).unwrap_err();
        assert!(matches!(err, PlacementError::Exhausted { .. }));
    }
}
