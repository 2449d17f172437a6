//! Simulation state: the terrain grid, both factions, and per-turn
//! bookkeeping. The view layer only ever reads this through accessors or
//! the serializable snapshot; every mutation goes through the engine's
//! command surface or the turn systems.

use std::collections::HashSet;

use serde::Serialize;

use crate::facilities::{self, Facility, CATALOG};
use crate::map::{Terrain, TileGrid, TilePos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UnitId(u64);

impl UnitId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Warrior,
}

impl UnitKind {
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Warrior => "warrior",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub pos: TilePos,
    pub kind: UnitKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct City {
    pub pos: TilePos,
    pub population: u32,
    /// Insertion-ordered; each facility appears at most once.
    pub facilities: Vec<Facility>,
}

impl City {
    fn new(pos: TilePos) -> Self {
        Self {
            pos,
            population: 1,
            facilities: Vec::new(),
        }
    }

    pub fn has_facility(&self, facility: Facility) -> bool {
        self.facilities.contains(&facility)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionId {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize)]
pub struct Faction {
    pub city: City,
    /// Creation order; the enemy movement pass depends on it.
    pub units: Vec<Unit>,
}

impl Faction {
    fn new(city: City) -> Self {
        Self {
            city,
            units: Vec::new(),
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn unit_at(&self, pos: TilePos) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.pos == pos)
    }

    pub fn has_unit_at(&self, pos: TilePos) -> bool {
        self.unit_at(pos).is_some()
    }

    fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }
}

pub struct World {
    grid: TileGrid,
    player: Faction,
    enemy: Faction,
    turn: u64,
    moved: HashSet<UnitId>,
    selected: Option<UnitId>,
    next_unit: u64,
}

impl World {
    /// Assemble the initial state. Both city tiles must be passable; a
    /// caller handing over an ocean tile is a defect, not user input.
    pub fn new(grid: TileGrid, player_city: TilePos, enemy_city: TilePos) -> Self {
        for pos in [player_city, enemy_city] {
            assert!(
                grid.terrain(pos).map_or(false, Terrain::passable),
                "city tile {pos:?} must be passable"
            );
        }
        let player = Faction::new(City::new(player_city));
        let mut enemy = Faction::new(City::new(enemy_city));
        enemy.city.facilities.push(Facility::Barracks);
        Self {
            grid,
            player,
            enemy,
            turn: 1,
            moved: HashSet::new(),
            selected: None,
            next_unit: 0,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn player(&self) -> &Faction {
        &self.player
    }

    pub fn enemy(&self) -> &Faction {
        &self.enemy
    }

    pub fn faction(&self, id: FactionId) -> &Faction {
        match id {
            FactionId::Player => &self.player,
            FactionId::Enemy => &self.enemy,
        }
    }

    pub(crate) fn faction_mut(&mut self, id: FactionId) -> &mut Faction {
        match id {
            FactionId::Player => &mut self.player,
            FactionId::Enemy => &mut self.enemy,
        }
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    pub fn has_moved(&self, id: UnitId) -> bool {
        self.moved.contains(&id)
    }

    /// Spawn a warrior for `faction` at `pos` and return its id.
    pub fn spawn_unit(&mut self, faction: FactionId, pos: TilePos) -> UnitId {
        let id = UnitId(self.next_unit);
        self.next_unit += 1;
        self.faction_mut(faction).units.push(Unit {
            id,
            pos,
            kind: UnitKind::Warrior,
        });
        id
    }

    pub(crate) fn move_unit(&mut self, faction: FactionId, id: UnitId, pos: TilePos) {
        let unit = self
            .faction_mut(faction)
            .unit_mut(id)
            .expect("moved unit exists");
        unit.pos = pos;
    }

    pub(crate) fn select(&mut self, id: UnitId) {
        self.selected = Some(id);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub(crate) fn mark_moved(&mut self, id: UnitId) {
        self.moved.insert(id);
    }

    /// Start-of-turn bookkeeping: forget which units moved, drop any
    /// pending selection, advance the counter.
    pub(crate) fn begin_turn(&mut self) {
        self.moved.clear();
        self.selected = None;
        self.turn += 1;
    }

    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let city = &self.player.city;
        let build_options = CATALOG
            .iter()
            .map(|def| BuildOption {
                facility: def.facility,
                display: def.display,
                required_population: def.required_population,
                effect: def.effect,
                owned: city.has_facility(def.facility),
                affordable: city.population >= def.required_population,
            })
            .collect();
        let can_produce =
            city.has_facility(Facility::Barracks) && !self.player.has_unit_at(city.pos);
        WorldSnapshot {
            scenario: scenario.to_string(),
            turn: self.turn,
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            terrain: self.grid.tiles().iter().map(|tile| tile.label()).collect(),
            player: self.faction_snapshot(FactionId::Player),
            enemy: self.faction_snapshot(FactionId::Enemy),
            selected: self.selected.map(UnitId::raw),
            build_options,
            can_produce,
        }
    }

    fn faction_snapshot(&self, id: FactionId) -> FactionSnapshot {
        let faction = self.faction(id);
        FactionSnapshot {
            city: CitySnapshot {
                x: faction.city.pos.x,
                y: faction.city.pos.y,
                population: faction.city.population,
                facilities: faction
                    .city
                    .facilities
                    .iter()
                    .map(|facility| facilities::definition(*facility).display)
                    .collect(),
            },
            units: faction
                .units
                .iter()
                .map(|unit| UnitSnapshot {
                    id: unit.id.raw(),
                    x: unit.pos.x,
                    y: unit.pos.y,
                    kind: unit.kind.label(),
                    moved: self.has_moved(unit.id),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub turn: u64,
    pub cols: u32,
    pub rows: u32,
    /// Row-major terrain labels.
    pub terrain: Vec<&'static str>,
    pub player: FactionSnapshot,
    pub enemy: FactionSnapshot,
    pub selected: Option<u64>,
    pub build_options: Vec<BuildOption>,
    pub can_produce: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactionSnapshot {
    pub city: CitySnapshot,
    pub units: Vec<UnitSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitySnapshot {
    pub x: u32,
    pub y: u32,
    pub population: u32,
    pub facilities: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitSnapshot {
    pub id: u64,
    pub x: u32,
    pub y: u32,
    pub kind: &'static str,
    pub moved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildOption {
    pub facility: Facility,
    pub display: &'static str,
    pub required_population: u32,
    pub effect: &'static str,
    pub owned: bool,
    pub affordable: bool,
}
