use crate::{components::Item, error::Rejection, world::GameState};

/// Buys `quantity` units of `item`. The whole price is checked before anything
/// is charged. Housing also raises `max_pop` by its capacity grant.
pub fn purchase(state: &GameState, item: Item, quantity: u32) -> Result<GameState, Rejection> {
    if quantity == 0 {
        return Err(Rejection::InvalidQuantity);
    }
    let unit_cost = state
        .config
        .costs
        .unit_cost(item)
        .ok_or(Rejection::UnknownEntity(item))?;
    let resources = state.resources.debit(&unit_cost.scaled(f64::from(quantity)))?;

    let Item::Building(building) = item;
    let quantity = u64::from(quantity);
    let mut buildings = state.buildings.clone();
    *buildings.entry(building).or_default() += quantity;
    let mut population_meta = state.population_meta;
    population_meta.max_pop += quantity * state.config.capacity_grant(building);

    Ok(GameState {
        resources,
        buildings,
        population_meta,
        ..state.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::{Building, Cost, Resource},
        config::GameConfig,
        world::fixtures::*,
    };

    fn state_with_balances(wood: f64, metals: f64) -> GameState {
        let mut config = GameConfig::default();
        config.starting_resources = Cost::new()
            .with(Resource::Wood, wood)
            .with(Resource::Metals, metals);
        state_with(config, flat_map(3, 3, (1, 1)))
    }

    #[test]
    fn affordable_house_raises_capacity() {
        let state = state_with_balances(15.0, 0.0);
        let next = purchase(&state, Item::Building(Building::Houses), 1).unwrap();
        assert_eq!(next.resource(Resource::Wood), 5.0);
        assert_eq!(next.building(Building::Houses), 1);
        assert_eq!(next.max_pop(), state.max_pop() + 5);
    }

    #[test]
    fn unaffordable_house_is_rejected() {
        let state = state_with_balances(5.0, 0.0);
        let err = purchase(&state, Item::Building(Building::Houses), 1).unwrap_err();
        assert!(matches!(err, Rejection::InsufficientResources { .. }));
    }

    #[test]
    fn partial_affordability_charges_nothing() {
        let state = state_with_balances(100.0, 4.0);
        let err = purchase(&state, Item::Building(Building::Tenements), 1).unwrap_err();
        assert_eq!(
            err,
            Rejection::InsufficientResources {
                cost: Cost::new()
                    .with(Resource::Wood, 20.0)
                    .with(Resource::Metals, 5.0),
                shortfall: Cost::new().with(Resource::Metals, 1.0),
            }
        );
    }

    #[test]
    fn quantity_multiplies_cost_and_capacity() {
        let state = state_with_balances(100.0, 20.0);
        let next = purchase(&state, Item::Building(Building::Tenements), 3).unwrap();
        assert_eq!(next.resource(Resource::Wood), 40.0);
        assert_eq!(next.resource(Resource::Metals), 5.0);
        assert_eq!(next.building(Building::Tenements), 3);
        assert_eq!(next.max_pop(), state.max_pop() + 45);
    }

    #[test]
    fn buildings_without_cost_are_unknown() {
        let state = state_with_balances(100.0, 100.0);
        assert_eq!(
            purchase(&state, Item::Building(Building::Factories), 1).unwrap_err(),
            Rejection::UnknownEntity(Item::Building(Building::Factories))
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let state = state_with_balances(100.0, 0.0);
        assert_eq!(
            purchase(&state, Item::Building(Building::Houses), 0).unwrap_err(),
            Rejection::InvalidQuantity
        );
    }

    #[test]
    fn non_housing_leaves_capacity_alone() {
        let mut config = GameConfig::default();
        config
            .costs
            .buildings
            .insert(Building::Farms, Cost::new().with(Resource::Wood, 3.0));
        config.starting_resources = Cost::new().with(Resource::Wood, 3.0);
        let state = state_with(config, flat_map(2, 2, (0, 0)));
        let next = purchase(&state, Item::Building(Building::Farms), 1).unwrap();
        assert_eq!(next.building(Building::Farms), 1);
        assert_eq!(next.max_pop(), state.max_pop());
        assert_eq!(next.resource(Resource::Wood), 0.0);
    }
}
