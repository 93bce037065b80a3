//! The pure transitions. Each takes the current snapshot by reference and
//! returns the next one; none of them mutates its input.

mod construction;
mod exploration;
mod gather;
mod mapgen;
mod population;
mod production;
mod unlock;

pub use construction::purchase;
pub use exploration::{explore_tile, frontier};
pub use gather::add_resource;
pub use mapgen::{create_initial_state, draw_tile_kind, generate_map, tile_cost};
pub use population::grow_population;
pub use production::{active_sources, tick, yield_per_tick};
pub use unlock::{due_unlocks, unlock};
