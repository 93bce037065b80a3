//! Static game tables, validated once at startup and never mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{Building, Cost, Feature, Item, Resource, Source, TileKind};

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub costs: CostTable,
    pub multipliers: BTreeMap<Source, f64>,
    pub production: BTreeMap<Source, Vec<Resource>>,
    pub housing: BTreeMap<Building, u64>,
    pub tile_weights: Vec<TileWeight>,
    pub population: PopulationSettings,
    pub timing: TimingConfig,
    pub unlock_rules: Vec<UnlockRule>,
    pub starting_resources: Cost,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    #[serde(default)]
    pub buildings: BTreeMap<Building, Cost>,
}

impl CostTable {
    pub fn unit_cost(&self, item: Item) -> Option<&Cost> {
        match item {
            Item::Building(building) => self.buildings.get(&building),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileWeight {
    pub kind: TileKind,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationSettings {
    pub max_pop: u64,
    pub civilian_growth_probability: f64,
    pub max_random_growth: f64,
}

impl Default for PopulationSettings {
    fn default() -> Self {
        Self {
            max_pop: 5,
            civilian_growth_probability: 1.0,
            max_random_growth: 5.0,
        }
    }
}

/// Cadence and cooldowns, in milliseconds. Only the scheduler reads these;
/// the transitions themselves are untimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub production_interval_ms: u64,
    pub growth_interval_ms: u64,
    pub gather_cooldowns: BTreeMap<Resource, u64>,
    pub build_cooldowns: BTreeMap<Building, u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            production_interval_ms: 100,
            growth_interval_ms: 1_000,
            gather_cooldowns: BTreeMap::from([
                (Resource::Food, 1_000),
                (Resource::Wood, 1_000),
                (Resource::Metals, 3_000),
            ]),
            build_cooldowns: BTreeMap::from([
                (Building::Houses, 5_000),
                (Building::Mines, 8_000),
                (Building::Farms, 4_000),
                (Building::Tenements, 1_200),
            ]),
        }
    }
}

/// Open `feature` once total population exceeds `population_above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnlockRule {
    pub feature: Feature,
    pub population_above: u64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tile weight for {kind:?} is {weight}, expected a value in [0, 1]")]
    TileWeightOutOfRange { kind: TileKind, weight: f64 },
    #[error("tile weights sum to {0}, expected 1")]
    TileWeightsUnbalanced(f64),
    #[error("cost of {building} lists {resource} at {amount}, expected a finite non-negative amount")]
    InvalidCost {
        building: Building,
        resource: Resource,
        amount: f64,
    },
    #[error("multiplier for {producer:?} is {value}, expected a positive rate")]
    InvalidMultiplier { producer: Source, value: f64 },
    #[error("civilian growth probability {0} is outside [0, 1]")]
    GrowthProbability(f64),
    #[error("max random growth {0} must be positive")]
    MaxRandomGrowth(f64),
    #[error("{0} cadence must be greater than zero")]
    ZeroCadence(&'static str),
    #[error("starting {resource} balance {amount} must be finite and non-negative")]
    StartingBalance { resource: Resource, amount: f64 },
    #[error("map must be at least 1x1, got {width}x{height}")]
    EmptyMap { width: usize, height: usize },
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            costs: CostTable {
                buildings: BTreeMap::from([
                    (Building::Houses, Cost::new().with(Resource::Wood, 10.0)),
                    (
                        Building::Tenements,
                        Cost::new()
                            .with(Resource::Wood, 20.0)
                            .with(Resource::Metals, 5.0),
                    ),
                ]),
            },
            multipliers: BTreeMap::from([
                (Source::Home, 0.15),
                (Source::Forests, 0.15),
                (Source::Water, 0.1),
                (Source::Farms, 0.25),
                (Source::Mines, 0.2),
                (Source::Houses, 1.0),
                (Source::Tenements, 1.0),
                (Source::Factories, 1.0),
            ]),
            production: BTreeMap::from([
                (Source::Home, vec![Resource::Food, Resource::Wood]),
                (Source::Farms, vec![Resource::Food]),
                (Source::Mines, vec![Resource::Metals]),
                (Source::Forests, vec![Resource::Wood, Resource::Food]),
                (Source::Water, vec![Resource::Food]),
                (Source::Empty, Vec::new()),
                (Source::Outposts, Vec::new()),
                (Source::Houses, Vec::new()),
                (Source::Tenements, Vec::new()),
                (Source::Factories, Vec::new()),
            ]),
            housing: BTreeMap::from([(Building::Houses, 5), (Building::Tenements, 15)]),
            tile_weights: vec![
                TileWeight {
                    kind: TileKind::Empty,
                    weight: 0.7,
                },
                TileWeight {
                    kind: TileKind::Forests,
                    weight: 0.12,
                },
                TileWeight {
                    kind: TileKind::Water,
                    weight: 0.1,
                },
                TileWeight {
                    kind: TileKind::Mines,
                    weight: 0.08,
                },
            ],
            population: PopulationSettings::default(),
            timing: TimingConfig::default(),
            unlock_rules: vec![
                UnlockRule {
                    feature: Feature::Mines,
                    population_above: 50,
                },
                UnlockRule {
                    feature: Feature::Metals,
                    population_above: 50,
                },
                UnlockRule {
                    feature: Feature::Tenements,
                    population_above: 100,
                },
                UnlockRule {
                    feature: Feature::Factories,
                    population_above: 200,
                },
            ],
            starting_resources: Cost::zero(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut total = 0.0;
        for entry in &self.tile_weights {
            if !(0.0..=1.0).contains(&entry.weight) {
                return Err(ConfigError::TileWeightOutOfRange {
                    kind: entry.kind,
                    weight: entry.weight,
                });
            }
            total += entry.weight;
        }
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::TileWeightsUnbalanced(total));
        }

        for (building, cost) in &self.costs.buildings {
            for (resource, amount) in cost.iter() {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(ConfigError::InvalidCost {
                        building: *building,
                        resource,
                        amount,
                    });
                }
            }
        }

        for (source, value) in &self.multipliers {
            if !value.is_finite() || *value <= 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    producer: *source,
                    value: *value,
                });
            }
        }

        let probability = self.population.civilian_growth_probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::GrowthProbability(probability));
        }
        let max_growth = self.population.max_random_growth;
        if !max_growth.is_finite() || max_growth <= 0.0 {
            return Err(ConfigError::MaxRandomGrowth(max_growth));
        }

        if self.timing.production_interval_ms == 0 {
            return Err(ConfigError::ZeroCadence("production"));
        }
        if self.timing.growth_interval_ms == 0 {
            return Err(ConfigError::ZeroCadence("growth"));
        }

        for (resource, amount) in self.starting_resources.iter() {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ConfigError::StartingBalance { resource, amount });
            }
        }
        Ok(())
    }

    /// Population capacity granted per unit of `building`; zero for non-housing.
    pub fn capacity_grant(&self, building: Building) -> u64 {
        self.housing.get(&building).copied().unwrap_or(0)
    }
}
