use crate::{
    command::Command,
    components::{Building, Feature, Item, Resource},
    scheduler::Player,
    systems,
    world::GameState,
};

/// A greedy scripted player: build housing whenever it can, push the map
/// outward through the cheapest frontier tile, and otherwise gather whatever
/// it has least of.
#[derive(Debug, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    fn cheapest_frontier(state: &GameState) -> Option<Command> {
        systems::frontier(state)
            .into_iter()
            .filter_map(|(row, col)| {
                let tile = state.map().tile(row, col)?;
                state
                    .resources()
                    .can_afford(&tile.cost)
                    .then(|| (tile.cost.get(Resource::Food), row, col))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, row, col)| Command::ExploreTile { row, col })
    }
}

impl Player for Autopilot {
    fn candidates(&mut self, state: &GameState) -> Vec<Command> {
        let mut wishes = Vec::new();
        if state.is_unlocked(Feature::Tenements) {
            wishes.push(Command::Purchase {
                item: Item::Building(Building::Tenements),
                quantity: 1,
            });
        }
        wishes.push(Command::Purchase {
            item: Item::Building(Building::Houses),
            quantity: 1,
        });
        if let Some(explore) = Self::cheapest_frontier(state) {
            wishes.push(explore);
        }

        let mut gather = vec![Resource::Food, Resource::Wood];
        if state.is_unlocked(Feature::Metals) {
            gather.push(Resource::Metals);
        }
        gather.sort_by(|a, b| state.resource(*a).total_cmp(&state.resource(*b)));
        wishes.extend(gather.into_iter().map(|resource| Command::AddResource {
            resource,
            amount: 1.0,
        }));
        wishes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GameConfig,
        engine::{EngineBuilder, EngineSettings},
        scheduler::Scheduler,
    };

    #[test]
    fn gathers_scarcest_resource_first() {
        let engine = EngineBuilder::new(EngineSettings {
            seed: 9,
            width: 5,
            height: 5,
        })
        .build()
        .unwrap();
        let state = engine.state();
        let wishes = Autopilot::new().candidates(&state);
        assert_eq!(
            wishes.first(),
            Some(&Command::Purchase {
                item: Item::Building(Building::Houses),
                quantity: 1
            })
        );
        assert!(wishes
            .iter()
            .all(|c| !matches!(c, Command::AddResource { resource: Resource::Metals, .. })));
    }

    #[test]
    fn a_long_session_grows_the_town() {
        let engine = EngineBuilder::new(EngineSettings {
            seed: 9,
            width: 10,
            height: 10,
        })
        .with_config(GameConfig::default())
        .build()
        .unwrap();
        let mut scheduler = Scheduler::new(engine);
        scheduler.run(600, &mut Autopilot::new());
        let state = scheduler.engine().state();
        assert!(state.building(Building::Houses) > 0);
        assert!(state.map().total_explored_tiles() > 1);
        assert!(state.total_population() <= state.max_pop());
        assert!(state.resources().iter().all(|(_, amount)| amount >= 0.0));
    }
}
