use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use homestead::{
    components::{Building, Cost, Feature, Item, Resource},
    create_initial_state, Command, EngineBuilder, EngineSettings, GameConfig, GameState, Outcome,
    Rejection,
};

fn config_with(balances: Cost) -> GameConfig {
    GameConfig {
        starting_resources: balances,
        ..GameConfig::default()
    }
}

fn initial(config: GameConfig, seed: u64) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    create_initial_state(5, 5, Arc::new(config), &mut rng).unwrap()
}

fn random_command(rng: &mut ChaCha8Rng) -> Command {
    match rng.gen_range(0..7) {
        0 => Command::AddResource {
            resource: [Resource::Wood, Resource::Food, Resource::Metals][rng.gen_range(0..3)],
            amount: rng.gen_range(-3.0..6.0),
        },
        1 => Command::Purchase {
            item: Item::Building(
                [Building::Houses, Building::Tenements, Building::Farms][rng.gen_range(0..3)],
            ),
            quantity: rng.gen_range(0..3),
        },
        2 => Command::ExploreTile {
            row: rng.gen_range(0..7),
            col: rng.gen_range(0..7),
        },
        3 => Command::GrowPopulation,
        4 => Command::Unlock {
            feature: Feature::ALL[rng.gen_range(0..4)],
        },
        _ => Command::Tick,
    }
}

#[test]
fn random_sessions_keep_every_invariant() {
    let mut script = ChaCha8Rng::seed_from_u64(2024);
    for seed in 0..8 {
        let mut engine = EngineBuilder::new(EngineSettings {
            seed,
            width: 6,
            height: 6,
        })
        .build()
        .unwrap();
        for _ in 0..1_500 {
            let before = engine.state();
            let command = random_command(&mut script);
            let outcome = engine.submit(command);
            let after = engine.state();

            assert!(after.resources().iter().all(|(_, amount)| amount >= 0.0));
            assert!(after.total_population() <= after.max_pop());
            assert!(after.map().total_explored_tiles() >= before.map().total_explored_tiles());
            for feature in Feature::ALL {
                assert!(!before.is_unlocked(feature) || after.is_unlocked(feature));
            }
            for building in Building::ALL {
                assert!(after.building(building) >= before.building(building));
            }
            if let Outcome::Rejected(_) = outcome {
                assert!(Arc::ptr_eq(&before, &after));
            }
        }
    }
}

#[test]
fn house_purchase_with_enough_wood() {
    let state = initial(config_with(Cost::new().with(Resource::Wood, 15.0)), 1);
    let next = homestead::purchase(&state, Item::Building(Building::Houses), 1).unwrap();
    assert_eq!(next.resource(Resource::Wood), 5.0);
    assert_eq!(next.building(Building::Houses), state.building(Building::Houses) + 1);
    assert_eq!(next.max_pop(), state.max_pop() + 5);
}

#[test]
fn house_purchase_without_enough_wood_changes_nothing() {
    let mut engine = EngineBuilder::new(EngineSettings {
        seed: 4,
        width: 5,
        height: 5,
    })
    .with_config(config_with(Cost::new().with(Resource::Wood, 5.0)))
    .build()
    .unwrap();
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
    assert_eq!(*before, *engine.state());
}

#[test]
fn tenement_short_on_metals_keeps_wood() {
    let state = initial(
        config_with(
            Cost::new()
                .with(Resource::Wood, 50.0)
                .with(Resource::Metals, 1.0),
        ),
        2,
    );
    let err = homestead::purchase(&state, Item::Building(Building::Tenements), 1).unwrap_err();
    assert!(matches!(err, Rejection::InsufficientResources { .. }));
    assert_eq!(state.resource(Resource::Wood), 50.0);
    assert_eq!(state.resource(Resource::Metals), 1.0);
}

#[test]
fn home_tile_starts_explored_and_free() {
    for seed in 0..20 {
        let state = initial(GameConfig::default(), seed);
        let (row, col) = state.map().start();
        let home = state.map().tile(row, col).unwrap();
        assert!(home.explored);
        assert_eq!(home.cost, Cost::zero());
        assert_eq!(state.map().total_explored_tiles(), 1);
    }
}

#[test]
fn exploring_home_again_is_rejected() {
    let state = initial(config_with(Cost::new().with(Resource::Food, 50.0)), 3);
    let (row, col) = state.map().start();
    assert_eq!(
        homestead::explore_tile(&state, row, col).unwrap_err(),
        Rejection::AlreadyExplored { row, col }
    );
}

#[test]
fn unlock_twice_equals_unlock_once() {
    let state = initial(GameConfig::default(), 5);
    let once = homestead::unlock(&state, Feature::Mines);
    assert_eq!(homestead::unlock(&once, Feature::Mines), once);
}

#[test]
fn locked_metals_still_accrue() {
    let mut config = GameConfig::default();
    config.starting_resources = Cost::new().with(Resource::Wood, 10.0).with(Resource::Metals, 0.0);
    config
        .costs
        .buildings
        .insert(Building::Mines, Cost::new().with(Resource::Wood, 10.0));
    let state = initial(config, 6);
    let state = homestead::purchase(&state, Item::Building(Building::Mines), 1).unwrap();
    let state = homestead::tick(&state);
    assert!(!state.is_unlocked(Feature::Metals));
    assert!(state.resource(Resource::Metals) > 0.0);
    assert!(!state.summary().resources.contains_key(&Resource::Metals));
}
