use std::sync::Arc;

use tracing::debug;

use crate::{
    command::Command,
    config::{ConfigError, GameConfig},
    error::Rejection,
    rng::RngManager,
    systems,
    world::GameState,
};

pub struct EngineSettings {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    config: GameConfig,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            config: GameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the tables and draws the map. Bad configuration stops here.
    pub fn build(self) -> Result<Engine, ConfigError> {
        let mut rng = RngManager::new(self.settings.seed);
        let state = systems::create_initial_state(
            self.settings.width,
            self.settings.height,
            Arc::new(self.config),
            rng.stream("mapgen"),
        )?;
        Ok(Engine {
            rng,
            state: Arc::new(state),
            applied: 0,
            rejected: 0,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Sole owner of the current snapshot. Commands are applied one at a time in
/// submission order; readers get cheap `Arc` clones they cannot mutate.
pub struct Engine {
    rng: RngManager,
    state: Arc<GameState>,
    applied: u64,
    rejected: u64,
}

impl Engine {
    pub fn submit(&mut self, command: Command) -> Outcome {
        let rng = self.rng.stream(command.name());
        match command.apply(&self.state, rng) {
            Ok(next) => {
                debug!(command = command.name(), "applied");
                self.state = Arc::new(next);
                self.applied += 1;
                Outcome::Applied
            }
            Err(reason) => {
                debug!(command = command.name(), %reason, "rejected");
                self.rejected += 1;
                Outcome::Rejected(reason)
            }
        }
    }

    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Building, Item, Resource};

    fn engine() -> Engine {
        EngineBuilder::new(EngineSettings {
            seed: 5,
            width: 5,
            height: 5,
        })
        .build()
        .unwrap()
    }

    #[test]
    fn rejection_keeps_the_same_snapshot() {
        let mut engine = engine();
        let before = engine.state();
        let outcome = engine.submit(Command::Purchase {
            item: Item::Building(Building::Houses),
            quantity: 1,
        });
        assert!(matches!(
            outcome,
            Outcome::Rejected(Rejection::InsufficientResources { .. })
        ));
        assert!(Arc::ptr_eq(&before, &engine.state()));
        assert_eq!(engine.rejected(), 1);
    }

    #[test]
    fn applied_command_replaces_the_snapshot() {
        let mut engine = engine();
        let before = engine.state();
        let outcome = engine.submit(Command::AddResource {
            resource: Resource::Food,
            amount: 1.0,
        });
        assert!(outcome.is_applied());
        assert_eq!(before.resource(Resource::Food), 0.0);
        assert_eq!(engine.state().resource(Resource::Food), 1.0);
    }

    #[test]
    fn bad_config_fails_the_build() {
        let mut config = GameConfig::default();
        config.population.max_random_growth = 0.0;
        let result = EngineBuilder::new(EngineSettings {
            seed: 1,
            width: 3,
            height: 3,
        })
        .with_config(config)
        .build();
        assert!(matches!(result, Err(ConfigError::MaxRandomGrowth(_))));
    }
}
