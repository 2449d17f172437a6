//! Player command validation.
//!
//! Every entry point returns a [`CommandOutcome`]; a rejected command is a
//! silent no-op, never an error. Only the turn systems and these functions
//! mutate faction state between turns.

use serde::Serialize;

use crate::facilities::{self, Facility};
use crate::map::TilePos;
use crate::world::{FactionId, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    Rejected { reason: RejectReason },
}

impl CommandOutcome {
    pub fn applied(self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }

    fn rejected(reason: RejectReason) -> Self {
        CommandOutcome::Rejected { reason }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    AlreadyBuilt,
    PopulationTooLow,
    MissingBarracks,
    CityTileOccupied,
    SelectionPending,
    NoUnitAtTile,
    NoUnitSelected,
    OutOfBounds,
    NotAdjacent,
    ImpassableTerrain,
    DestinationOccupied,
    AlreadyMoved,
}

/// Build `facility` in the player city if it is new and affordable.
pub fn build_facility(world: &mut World, facility: Facility) -> CommandOutcome {
    let city = &world.player().city;
    if city.has_facility(facility) {
        return CommandOutcome::rejected(RejectReason::AlreadyBuilt);
    }
    if city.population < facilities::definition(facility).required_population {
        return CommandOutcome::rejected(RejectReason::PopulationTooLow);
    }
    world
        .faction_mut(FactionId::Player)
        .city
        .facilities
        .push(facility);
    CommandOutcome::Applied
}

/// Train a warrior on the player city tile. Requires a barracks and a free
/// city tile.
pub fn produce_unit(world: &mut World) -> CommandOutcome {
    let city_pos = world.player().city.pos;
    if !world.player().city.has_facility(Facility::Barracks) {
        return CommandOutcome::rejected(RejectReason::MissingBarracks);
    }
    if world.player().has_unit_at(city_pos) {
        return CommandOutcome::rejected(RejectReason::CityTileOccupied);
    }
    world.spawn_unit(FactionId::Player, city_pos);
    CommandOutcome::Applied
}

/// Select the player unit standing on `pos`. Only valid while nothing is
/// selected; the view routes the follow-up click to [`move_selected`].
pub fn select_unit(world: &mut World, pos: TilePos) -> CommandOutcome {
    if world.selected().is_some() {
        return CommandOutcome::rejected(RejectReason::SelectionPending);
    }
    match world.player().unit_at(pos) {
        Some(unit) => {
            let id = unit.id;
            world.select(id);
            CommandOutcome::Applied
        }
        None => CommandOutcome::rejected(RejectReason::NoUnitAtTile),
    }
}

/// Move the selected unit one orthogonal step to `target`. The selection
/// is consumed whether or not the move succeeds.
pub fn move_selected(world: &mut World, target: TilePos) -> CommandOutcome {
    let Some(id) = world.selected() else {
        return CommandOutcome::rejected(RejectReason::NoUnitSelected);
    };
    world.clear_selection();

    let origin = world.player().unit(id).expect("selected unit exists").pos;
    let terrain = match world.grid().terrain(target) {
        Some(terrain) => terrain,
        None => return CommandOutcome::rejected(RejectReason::OutOfBounds),
    };
    if origin.manhattan_distance(target) != 1 {
        return CommandOutcome::rejected(RejectReason::NotAdjacent);
    }
    if !terrain.passable() {
        return CommandOutcome::rejected(RejectReason::ImpassableTerrain);
    }
    if world.player().has_unit_at(target) {
        return CommandOutcome::rejected(RejectReason::DestinationOccupied);
    }
    if world.has_moved(id) {
        return CommandOutcome::rejected(RejectReason::AlreadyMoved);
    }

    world.move_unit(FactionId::Player, id, target);
    world.mark_moved(id);
    CommandOutcome::Applied
}
