//! Headless stand-in for the UI loop. It owns the clock the core does not
//! have: production and growth cadences, per-action cooldowns, and the
//! population thresholds that trigger unlocks.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    command::Command,
    components::{Building, Item, Resource},
    config::{TimingConfig, UnlockRule},
    engine::{Engine, Outcome},
    systems,
    world::GameState,
};

const DECISION_INTERVAL_MS: u64 = 100;
const REPORT_INTERVAL_MS: u64 = 1_000;

/// Player-initiated actions that carry a cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Gather(Resource),
    Build(Building),
    Explore,
}

impl Action {
    pub fn of(command: &Command) -> Option<Self> {
        match command {
            Command::AddResource { resource, .. } => Some(Action::Gather(*resource)),
            Command::Purchase {
                item: Item::Building(building),
                ..
            } => Some(Action::Build(*building)),
            Command::ExploreTile { .. } => Some(Action::Explore),
            Command::Tick | Command::GrowPopulation | Command::Unlock { .. } => None,
        }
    }

    fn cooldown_ms(self, timing: &TimingConfig) -> u64 {
        match self {
            Action::Gather(resource) => timing.gather_cooldowns.get(&resource).copied(),
            Action::Build(building) => timing.build_cooldowns.get(&building).copied(),
            Action::Explore => None,
        }
        .unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct Cooldowns {
    ready_at: HashMap<Action, u64>,
}

impl Cooldowns {
    pub fn is_ready(&self, action: Action, now_ms: u64) -> bool {
        self.ready_at.get(&action).map_or(true, |ready| now_ms >= *ready)
    }

    pub fn start(&mut self, action: Action, now_ms: u64, timing: &TimingConfig) {
        let cooldown = action.cooldown_ms(timing);
        if cooldown > 0 {
            self.ready_at.insert(action, now_ms + cooldown);
        }
    }
}

/// Decides what to try next. Candidates are tried in order; the first one
/// that is off cooldown and accepted by the engine is the turn's action.
pub trait Player {
    fn candidates(&mut self, state: &GameState) -> Vec<Command>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub production_ticks: u64,
    pub growth_steps: u64,
    pub unlocks: u64,
    pub player_actions: u64,
    pub player_rejections: u64,
    pub throttled: u64,
}

pub struct SecondReport<'a> {
    pub second: u64,
    pub state: &'a GameState,
}

pub struct Scheduler {
    engine: Engine,
    timing: TimingConfig,
    rules: Vec<UnlockRule>,
    cooldowns: Cooldowns,
    now_ms: u64,
    next_production: u64,
    next_growth: u64,
    next_decision: u64,
    next_report: u64,
    stats: SessionStats,
}

impl Scheduler {
    pub fn new(engine: Engine) -> Self {
        let config = engine.state().config().clone();
        let timing = config.timing;
        Self {
            next_production: timing.production_interval_ms,
            next_growth: timing.growth_interval_ms,
            next_decision: DECISION_INTERVAL_MS,
            next_report: REPORT_INTERVAL_MS,
            timing,
            rules: config.unlock_rules,
            cooldowns: Cooldowns::default(),
            now_ms: 0,
            stats: SessionStats::default(),
            engine,
        }
    }

    pub fn run(&mut self, seconds: u64, player: &mut impl Player) -> SessionStats {
        self.run_with_hook(seconds, player, |_| {})
    }

    /// Advances the simulated clock by `seconds`, calling `hook` once at the
    /// end of every simulated second.
    pub fn run_with_hook<F>(
        &mut self,
        seconds: u64,
        player: &mut impl Player,
        mut hook: F,
    ) -> SessionStats
    where
        F: FnMut(SecondReport<'_>),
    {
        let end = self.now_ms + seconds * 1_000;
        loop {
            let now = self
                .next_production
                .min(self.next_growth)
                .min(self.next_decision)
                .min(self.next_report);
            if now > end {
                break;
            }
            self.now_ms = now;

            if now == self.next_production {
                self.engine.submit(Command::Tick);
                self.stats.production_ticks += 1;
                self.next_production += self.timing.production_interval_ms;
            }
            if now == self.next_growth {
                self.engine.submit(Command::GrowPopulation);
                self.stats.growth_steps += 1;
                self.apply_unlock_rules();
                self.next_growth += self.timing.growth_interval_ms;
            }
            if now == self.next_decision {
                self.take_turn(player);
                self.next_decision += DECISION_INTERVAL_MS;
            }
            if now == self.next_report {
                let state = self.engine.state();
                hook(SecondReport {
                    second: now / 1_000,
                    state: &state,
                });
                self.next_report += REPORT_INTERVAL_MS;
            }
        }
        self.now_ms = end;
        self.stats
    }

    fn apply_unlock_rules(&mut self) {
        let state = self.engine.state();
        for feature in systems::due_unlocks(&state, &self.rules) {
            if self.engine.submit(Command::Unlock { feature }).is_applied() {
                info!(
                    %feature,
                    population = state.total_population(),
                    at_ms = self.now_ms,
                    "threshold crossed"
                );
                self.stats.unlocks += 1;
            }
        }
    }

    fn take_turn(&mut self, player: &mut impl Player) {
        let state = self.engine.state();
        for command in player.candidates(&state) {
            let action = Action::of(&command);
            if let Some(action) = action {
                if !self.cooldowns.is_ready(action, self.now_ms) {
                    self.stats.throttled += 1;
                    continue;
                }
            }
            match self.engine.submit(command) {
                Outcome::Applied => {
                    if let Some(action) = action {
                        self.cooldowns.start(action, self.now_ms, &self.timing);
                    }
                    self.stats.player_actions += 1;
                    return;
                }
                Outcome::Rejected(reason) => {
                    debug!(command = command.name(), %reason, "player command refused");
                    self.stats.player_rejections += 1;
                }
            }
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}
