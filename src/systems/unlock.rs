use tracing::info;

use crate::{components::Feature, config::UnlockRule, world::GameState};

/// Opens `feature`. Already-open features stay open; nothing ever re-locks.
pub fn unlock(state: &GameState, feature: Feature) -> GameState {
    if state.is_unlocked(feature) {
        return state.clone();
    }
    info!(%feature, "feature unlocked");
    let mut locks = state.locks.clone();
    locks.insert(feature, true);
    GameState {
        locks,
        ..state.clone()
    }
}

/// Features whose population threshold has been crossed but are still closed.
/// Deciding when to unlock belongs to the caller; this only evaluates the rules.
pub fn due_unlocks(state: &GameState, rules: &[UnlockRule]) -> Vec<Feature> {
    let population = state.total_population();
    let mut due: Vec<Feature> = rules
        .iter()
        .filter(|rule| population > rule.population_above && !state.is_unlocked(rule.feature))
        .map(|rule| rule.feature)
        .collect();
    due.sort();
    due.dedup();
    due
}
