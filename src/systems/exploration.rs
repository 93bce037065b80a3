use std::sync::Arc;

use crate::{error::Rejection, world::GameState};

/// Pays a tile's cost and marks it explored. Neighbours are untouched.
pub fn explore_tile(state: &GameState, row: usize, col: usize) -> Result<GameState, Rejection> {
    let tile = state
        .map
        .tile(row, col)
        .ok_or(Rejection::OutOfBounds { row, col })?;
    if tile.explored {
        return Err(Rejection::AlreadyExplored { row, col });
    }
    let resources = state.resources.debit(&tile.cost)?;

    let mut map = Arc::clone(&state.map);
    let grid = Arc::make_mut(&mut map);
    grid.tiles[row][col].explored = true;
    grid.total_explored_tiles += 1;

    Ok(GameState {
        map,
        resources,
        ..state.clone()
    })
}

/// Unexplored cells sharing an edge with explored land.
pub fn frontier(state: &GameState) -> Vec<(usize, usize)> {
    let map = &state.map;
    let mut cells = Vec::new();
    for (row, cells_in_row) in map.rows().iter().enumerate() {
        for (col, tile) in cells_in_row.iter().enumerate() {
            if tile.explored {
                continue;
            }
            let neighbours = [
                row.checked_sub(1).map(|r| (r, col)),
                Some((row + 1, col)),
                col.checked_sub(1).map(|c| (row, c)),
                Some((row, col + 1)),
            ];
            let touches_land = neighbours
                .into_iter()
                .flatten()
                .any(|(r, c)| map.tile(r, c).is_some_and(|t| t.explored));
            if touches_land {
                cells.push((row, col));
            }
        }
    }
    cells
}
