use crate::{components::Resource, error::Rejection, world::GameState};

/// Direct credit for one-shot gather actions. Negative amounts act as a free
/// spend and are refused if they would overdraw the balance.
pub fn add_resource(
    state: &GameState,
    resource: Resource,
    amount: f64,
) -> Result<GameState, Rejection> {
    let resources = state.resources.credit(resource, amount)?;
    Ok(GameState {
        resources,
        ..state.clone()
    })
}
