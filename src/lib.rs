//! Deterministic core of an incremental settlement game: one immutable
//! [`GameState`] snapshot, the pure transitions that produce the next one, and
//! a headless [`Scheduler`] that drives them the way a UI loop would.

pub mod autopilot;
pub mod command;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod rng;
pub mod scenario;
pub mod scheduler;
pub mod systems;
pub mod world;

pub use command::Command;
pub use config::{ConfigError, GameConfig};
pub use engine::{Engine, EngineBuilder, EngineSettings, Outcome};
pub use error::Rejection;
pub use scheduler::Scheduler;
pub use systems::{
    add_resource, create_initial_state, explore_tile, grow_population, purchase, tick, unlock,
};
pub use world::GameState;
