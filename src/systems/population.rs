use rand::Rng;

use crate::{components::PopulationKind, world::GameState};

/// One growth step: a single bernoulli draw, then a random number of new
/// civilians, never past `max_pop`. An unlucky draw leaves the state as is.
pub fn grow_population(state: &GameState, rng: &mut impl Rng) -> GameState {
    let meta = state.population_meta;
    if !rng.gen_bool(meta.civilian_growth_probability) {
        return state.clone();
    }
    let available = meta.max_pop.saturating_sub(state.total_population());
    if available == 0 {
        return state.clone();
    }
    let drawn: f64 = rng.gen_range(0.0..meta.max_random_growth);
    let growth = drawn.min(available as f64).trunc() as u64;
    if growth == 0 {
        return state.clone();
    }

    let mut populations = state.populations.clone();
    *populations.entry(PopulationKind::Civilians).or_default() += growth;
    GameState {
        populations,
        ..state.clone()
    }
}
