use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::components::{Building, Feature, PopulationKind, Resource, Source, Tile};
use crate::config::{ConfigError, GameConfig, TileWeight};
use crate::ledger::Ledger;

/// The tile grid. Shared between snapshots until a transition explores a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    pub(crate) total_explored_tiles: u64,
    pub(crate) tiles: Vec<Vec<Tile>>,
    pub(crate) start: (usize, usize),
    pub(crate) tile_weights: Vec<TileWeight>,
}

impl MapState {
    /// Wraps an already generated grid. Rows must be non-empty and equally wide.
    pub fn from_tiles(
        tiles: Vec<Vec<Tile>>,
        start: (usize, usize),
        tile_weights: Vec<TileWeight>,
    ) -> Result<Self, ConfigError> {
        let height = tiles.len();
        let width = tiles.first().map_or(0, Vec::len);
        if width == 0 || tiles.iter().any(|row| row.len() != width) {
            return Err(ConfigError::EmptyMap { width, height });
        }
        let total_explored_tiles = tiles
            .iter()
            .flatten()
            .filter(|tile| tile.explored)
            .count() as u64;
        Ok(Self {
            total_explored_tiles,
            tiles,
            start,
            tile_weights,
        })
    }

    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.tiles.get(row).and_then(|cells| cells.get(col))
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn total_explored_tiles(&self) -> u64 {
        self.total_explored_tiles
    }

    /// Cell the home tile was forced onto at generation.
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    pub fn tile_weights(&self) -> &[TileWeight] {
        &self.tile_weights
    }

    pub fn explored_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().flatten().filter(|tile| tile.explored)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationMeta {
    pub max_pop: u64,
    pub civilian_growth_probability: f64,
    pub max_random_growth: f64,
}

/// One immutable snapshot of the game. Transitions never modify a state in
/// place; they build the next one and hand it back.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) config: Arc<GameConfig>,
    pub(crate) map: Arc<MapState>,
    pub(crate) resources: Ledger,
    pub(crate) buildings: BTreeMap<Building, u64>,
    pub(crate) populations: BTreeMap<PopulationKind, u64>,
    pub(crate) population_meta: PopulationMeta,
    pub(crate) locks: BTreeMap<Feature, bool>,
    pub(crate) multipliers: BTreeMap<Source, f64>,
}

impl GameState {
    /// Fresh world around `map`: one home building, no population, every
    /// feature locked, balances from `config.starting_resources`.
    pub fn new(config: Arc<GameConfig>, map: MapState) -> Self {
        let mut buildings: BTreeMap<Building, u64> =
            Building::ALL.iter().map(|building| (*building, 0)).collect();
        buildings.insert(Building::Home, 1);
        let population = config.population;
        Self {
            map: Arc::new(map),
            resources: Ledger::from_balances(&config.starting_resources),
            buildings,
            populations: BTreeMap::from([(PopulationKind::Civilians, 0)]),
            population_meta: PopulationMeta {
                max_pop: population.max_pop,
                civilian_growth_probability: population.civilian_growth_probability,
                max_random_growth: population.max_random_growth,
            },
            locks: Feature::ALL.iter().map(|feature| (*feature, false)).collect(),
            multipliers: config.multipliers.clone(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    pub fn resources(&self) -> &Ledger {
        &self.resources
    }

    pub fn resource(&self, resource: Resource) -> f64 {
        self.resources.balance(resource)
    }

    pub fn buildings(&self) -> &BTreeMap<Building, u64> {
        &self.buildings
    }

    pub fn building(&self, building: Building) -> u64 {
        self.buildings.get(&building).copied().unwrap_or(0)
    }

    pub fn populations(&self) -> &BTreeMap<PopulationKind, u64> {
        &self.populations
    }

    pub fn population(&self, kind: PopulationKind) -> u64 {
        self.populations.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_population(&self) -> u64 {
        self.populations.values().sum()
    }

    pub fn population_meta(&self) -> &PopulationMeta {
        &self.population_meta
    }

    pub fn max_pop(&self) -> u64 {
        self.population_meta.max_pop
    }

    pub fn locks(&self) -> &BTreeMap<Feature, bool> {
        &self.locks
    }

    pub fn is_unlocked(&self, feature: Feature) -> bool {
        self.locks.get(&feature).copied().unwrap_or(false)
    }

    pub fn multipliers(&self) -> &BTreeMap<Source, f64> {
        &self.multipliers
    }

    /// Balances a display should show. Locks only hide; they never stop accrual.
    pub fn visible_resources(&self) -> Vec<(Resource, f64)> {
        self.resources
            .iter()
            .filter(|(resource, _)| *resource != Resource::Metals || self.is_unlocked(Feature::Metals))
            .collect()
    }

    pub fn visible_buildings(&self) -> Vec<(Building, u64)> {
        self.buildings
            .iter()
            .filter(|(building, _)| building.lock().map_or(true, |lock| self.is_unlocked(lock)))
            .map(|(building, count)| (*building, *count))
            .collect()
    }

    pub fn summary(&self) -> StateSummary {
        StateSummary {
            resources: self.visible_resources().into_iter().collect(),
            buildings: self.visible_buildings().into_iter().collect(),
            populations: self.populations.clone(),
            max_pop: self.population_meta.max_pop,
            explored_tiles: self.map.total_explored_tiles,
            map_size: (self.map.width(), self.map.height()),
            unlocked: self
                .locks
                .iter()
                .filter(|(_, open)| **open)
                .map(|(feature, _)| *feature)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSummary {
    pub resources: BTreeMap<Resource, f64>,
    pub buildings: BTreeMap<Building, u64>,
    pub populations: BTreeMap<PopulationKind, u64>,
    pub max_pop: u64,
    pub explored_tiles: u64,
    pub map_size: (usize, usize),
    pub unlocked: Vec<Feature>,
}
