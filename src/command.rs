use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    components::{Feature, Item, Resource},
    error::Rejection,
    systems,
    world::GameState,
};

/// Every way the game state can change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddResource { resource: Resource, amount: f64 },
    Purchase { item: Item, quantity: u32 },
    ExploreTile { row: usize, col: usize },
    Tick,
    GrowPopulation,
    Unlock { feature: Feature },
}

impl Command {
    /// Stable name, used for the rng stream and log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddResource { .. } => "add_resource",
            Command::Purchase { .. } => "purchase",
            Command::ExploreTile { .. } => "explore_tile",
            Command::Tick => "tick",
            Command::GrowPopulation => "population",
            Command::Unlock { .. } => "unlock",
        }
    }

    pub fn apply(&self, state: &GameState, rng: &mut impl Rng) -> Result<GameState, Rejection> {
        match *self {
            Command::AddResource { resource, amount } => {
                systems::add_resource(state, resource, amount)
            }
            Command::Purchase { item, quantity } => systems::purchase(state, item, quantity),
            Command::ExploreTile { row, col } => systems::explore_tile(state, row, col),
            Command::Tick => Ok(systems::tick(state)),
            Command::GrowPopulation => Ok(systems::grow_population(state, rng)),
            Command::Unlock { feature } => Ok(systems::unlock(state, feature)),
        }
    }
}
