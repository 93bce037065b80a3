use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    components::{Resource, Source},
    world::GameState,
};

/// How many units of each source are producing right now: one per explored
/// tile of that kind plus the building count.
pub fn active_sources(state: &GameState) -> BTreeMap<Source, u64> {
    let mut counts: BTreeMap<Source, u64> = BTreeMap::new();
    for tile in state.map.explored_tiles() {
        if let Some(source) = tile.kind.source() {
            *counts.entry(source).or_default() += 1;
        }
    }
    for (building, count) in &state.buildings {
        if *count > 0 {
            *counts.entry(building.source()).or_default() += count;
        }
    }
    counts
}

/// Per-tick increment for every resource. Each resource a source feeds gets
/// the full `multiplier * count`; nothing is split.
pub fn yield_per_tick(state: &GameState) -> BTreeMap<Resource, f64> {
    let mut increments: BTreeMap<Resource, f64> = BTreeMap::new();
    for (source, count) in active_sources(state) {
        let Some(resources) = state.config.production.get(&source) else {
            debug!(?source, "no production entry, skipping");
            continue;
        };
        if resources.is_empty() {
            continue;
        }
        let Some(multiplier) = state.multipliers.get(&source) else {
            debug!(?source, "no multiplier, skipping");
            continue;
        };
        let increment = multiplier * count as f64;
        for resource in resources {
            *increments.entry(*resource).or_default() += increment;
        }
    }
    increments
}

/// Production accrual. Only balances change.
pub fn tick(state: &GameState) -> GameState {
    let increments = yield_per_tick(state);
    GameState {
        resources: state.resources.accrue(&increments),
        ..state.clone()
    }
}
