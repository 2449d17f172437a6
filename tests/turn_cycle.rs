use std::path::PathBuf;

use palisade::{
    engine::{Engine, EngineBuilder, EngineSettings},
    facilities::Facility,
    map::{Terrain, TileGrid, TilePos},
    world::{FactionId, World},
};

fn settings() -> EngineSettings {
    EngineSettings {
        scenario_name: "open-field".into(),
        seed: 0,
        cols: 20,
        rows: 20,
        snapshot_interval_turns: 0,
        snapshot_dir: PathBuf::from("snapshots_turn_tests"),
    }
}

fn open_grid() -> TileGrid {
    TileGrid::from_tiles(20, 20, vec![Terrain::Plain; 400])
}

fn engine_with(world: World) -> Engine {
    EngineBuilder::new(settings())
        .with_default_systems()
        .build_with_world(world)
}

fn open_engine(player: TilePos, enemy: TilePos) -> Engine {
    engine_with(World::new(open_grid(), player, enemy))
}

#[test]
fn advance_turn_increments_counter_once() {
    let mut engine = open_engine(TilePos::new(1, 1), TilePos::new(18, 18));
    assert_eq!(engine.turn(), 1);
    let summary = engine.advance_turn().unwrap();
    assert_eq!(summary.turn, 2);
    assert_eq!(engine.turn(), 2);
    engine.advance_turn().unwrap();
    assert_eq!(engine.turn(), 3);
}

#[test]
fn population_grows_by_one_per_turn_without_farm() {
    let mut engine = open_engine(TilePos::new(1, 1), TilePos::new(18, 18));
    engine.run(5).unwrap();
    assert_eq!(engine.world().player().city.population, 6);
}

#[test]
fn farm_doubles_population_growth() {
    let mut engine = open_engine(TilePos::new(1, 1), TilePos::new(18, 18));
    engine.advance_turn().unwrap();
    assert!(engine.submit_build(Facility::Farm).applied());
    engine.run(5).unwrap();
    // 2 after the first turn, then +2 for each of the five farmed turns.
    assert_eq!(engine.world().player().city.population, 12);
}

#[test]
fn transient_state_clears_at_turn_start() {
    let mut engine = open_engine(TilePos::new(1, 1), TilePos::new(18, 18));
    engine.run(3).unwrap();
    assert!(engine.submit_build(Facility::Barracks).applied());
    assert!(engine.submit_produce().applied());
    let id = engine.world().player().units[0].id;
    assert!(engine.submit_select(1, 1).applied());
    assert!(engine.submit_move(2, 1).applied());
    assert!(engine.world().has_moved(id));
    assert!(engine.submit_select(2, 1).applied());
    assert!(engine.selected().is_some());

    engine.advance_turn().unwrap();
    assert_eq!(engine.selected(), None);
    assert!(!engine.world().has_moved(id));
}

#[test]
fn enemy_trains_a_warrior_whenever_its_city_tile_is_free() {
    let mut engine = open_engine(TilePos::new(1, 1), TilePos::new(18, 18));
    let summary = engine.advance_turn().unwrap();
    assert_eq!(summary.enemy_units, 1);
    // The fresh warrior immediately steps toward the player city.
    assert_eq!(engine.world().enemy().units[0].pos, TilePos::new(17, 17));

    engine.advance_turn().unwrap();
    let units = &engine.world().enemy().units;
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].pos, TilePos::new(16, 16));
    assert_eq!(units[1].pos, TilePos::new(17, 17));
}

#[test]
fn enemy_production_pauses_while_a_unit_is_parked_on_the_city() {
    // Ocean on the only chase step out of the enemy city pins the first
    // warrior in place, which in turn stalls production.
    let mut tiles = vec![Terrain::Plain; 400];
    tiles[17 * 20 + 17] = Terrain::Ocean;
    let world = World::new(
        TileGrid::from_tiles(20, 20, tiles),
        TilePos::new(1, 1),
        TilePos::new(18, 18),
    );
    let mut engine = engine_with(world);
    engine.run(3).unwrap();
    let units = &engine.world().enemy().units;
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].pos, TilePos::new(18, 18));
}

#[test]
fn player_unit_on_the_enemy_city_does_not_block_production() {
    let mut world = World::new(open_grid(), TilePos::new(1, 1), TilePos::new(18, 18));
    world.spawn_unit(FactionId::Player, TilePos::new(18, 18));
    let mut engine = engine_with(world);
    engine.advance_turn().unwrap();
    assert_eq!(engine.world().enemy().units.len(), 1);
}

#[test]
fn earlier_mover_blocks_a_later_unit_in_the_same_turn() {
    let mut world = World::new(open_grid(), TilePos::new(0, 5), TilePos::new(19, 19));
    let a = world.spawn_unit(FactionId::Enemy, TilePos::new(2, 5));
    let b = world.spawn_unit(FactionId::Enemy, TilePos::new(2, 6));
    let mut engine = engine_with(world);
    engine.advance_turn().unwrap();
    let world = engine.world();
    // Both chase (0, 5) and want (1, 5); a is processed first and wins.
    assert_eq!(world.enemy().unit(a).unwrap().pos, TilePos::new(1, 5));
    assert_eq!(world.enemy().unit(b).unwrap().pos, TilePos::new(2, 6));
}

#[test]
fn vacated_tile_unblocks_a_later_unit_in_the_same_turn() {
    let mut world = World::new(open_grid(), TilePos::new(0, 5), TilePos::new(19, 19));
    let a = world.spawn_unit(FactionId::Enemy, TilePos::new(2, 5));
    let b = world.spawn_unit(FactionId::Enemy, TilePos::new(3, 5));
    let mut engine = engine_with(world);
    engine.advance_turn().unwrap();
    let world = engine.world();
    assert_eq!(world.enemy().unit(a).unwrap().pos, TilePos::new(1, 5));
    assert_eq!(world.enemy().unit(b).unwrap().pos, TilePos::new(2, 5));
}

#[test]
fn player_unit_blocks_enemy_movement() {
    let mut world = World::new(open_grid(), TilePos::new(0, 5), TilePos::new(19, 19));
    world.spawn_unit(FactionId::Player, TilePos::new(1, 5));
    let a = world.spawn_unit(FactionId::Enemy, TilePos::new(2, 5));
    let mut engine = engine_with(world);
    engine.advance_turn().unwrap();
    assert_eq!(engine.world().enemy().unit(a).unwrap().pos, TilePos::new(2, 5));
}

#[test]
fn enemy_does_not_try_an_alternative_around_ocean() {
    let mut tiles = vec![Terrain::Plain; 400];
    tiles[5 * 20 + 1] = Terrain::Ocean;
    let mut world = World::new(
        TileGrid::from_tiles(20, 20, tiles),
        TilePos::new(0, 5),
        TilePos::new(19, 19),
    );
    let a = world.spawn_unit(FactionId::Enemy, TilePos::new(2, 5));
    let mut engine = engine_with(world);
    engine.run(3).unwrap();
    assert_eq!(engine.world().enemy().unit(a).unwrap().pos, TilePos::new(2, 5));
}

#[test]
fn enemy_standing_on_the_player_city_stays_put() {
    let mut world = World::new(open_grid(), TilePos::new(0, 5), TilePos::new(19, 19));
    let a = world.spawn_unit(FactionId::Enemy, TilePos::new(0, 5));
    let mut engine = engine_with(world);
    engine.advance_turn().unwrap();
    assert_eq!(engine.world().enemy().unit(a).unwrap().pos, TilePos::new(0, 5));
}

#[test]
fn turn_summary_reports_current_state() {
    let mut engine = open_engine(TilePos::new(1, 1), TilePos::new(18, 18));
    let summary = engine.advance_turn().unwrap();
    assert_eq!(summary.player_population, 2);
    assert_eq!(summary.enemy_units, 1);
    assert_eq!(summary.snapshot_path, None);
}
