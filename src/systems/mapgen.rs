use std::sync::Arc;

use rand::Rng;

use crate::{
    components::{Cost, Resource, Tile, TileKind},
    config::{ConfigError, GameConfig, TileWeight},
    world::{GameState, MapState},
};

/// Builds the opening state: a freshly drawn map plus zeroed counters.
pub fn create_initial_state(
    width: usize,
    height: usize,
    config: Arc<GameConfig>,
    rng: &mut impl Rng,
) -> Result<GameState, ConfigError> {
    config.validate()?;
    let map = generate_map(width, height, &config.tile_weights, rng)?;
    Ok(GameState::new(config, map))
}

/// Draws a `height` x `width` grid. The start cell is picked first, then every
/// cell's kind is drawn independently; the start cell is then forced to an
/// explored, free home tile.
pub fn generate_map(
    width: usize,
    height: usize,
    weights: &[TileWeight],
    rng: &mut impl Rng,
) -> Result<MapState, ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::EmptyMap { width, height });
    }
    let start = (rng.gen_range(0..height), rng.gen_range(0..width));

    let mut tiles: Vec<Vec<Tile>> = (0..height)
        .map(|row| {
            (0..width)
                .map(|col| {
                    let kind = draw_tile_kind(weights, rng);
                    let distance = row.abs_diff(start.0) + col.abs_diff(start.1);
                    Tile::new(row, col, kind, tile_cost(distance))
                })
                .collect()
        })
        .collect();

    let home = &mut tiles[start.0][start.1];
    home.kind = TileKind::Home;
    home.cost = Cost::zero();
    home.explored = true;

    MapState::from_tiles(tiles, start, weights.to_vec())
}

/// Cumulative draw over `weights` in listed order. Rounding gaps fall back to
/// the first entry.
pub fn draw_tile_kind(weights: &[TileWeight], rng: &mut impl Rng) -> TileKind {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for entry in weights {
        cumulative += entry.weight;
        if roll <= cumulative {
            return entry.kind;
        }
    }
    weights.first().map_or(TileKind::Empty, |entry| entry.kind)
}

/// Exploration price by Manhattan distance from home. Wood is free within five
/// steps and metals within ten.
pub fn tile_cost(distance: usize) -> Cost {
    let distance = distance as f64;
    let wood = if distance <= 5.0 { 0.0 } else { 1.0 + 0.25 * distance };
    let metals = if distance <= 10.0 { 0.0 } else { 1.0 + 0.1 * distance };
    Cost::new()
        .with(Resource::Food, 1.0 + 0.5 * distance)
        .with(Resource::Wood, wood)
        .with(Resource::Metals, metals)
}
