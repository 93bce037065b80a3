//! Why a transition was turned down. A rejection leaves the state untouched.

use thiserror::Error;

use crate::components::{Cost, Item, Resource};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("cannot afford {cost}, short by {shortfall}")]
    InsufficientResources { cost: Cost, shortfall: Cost },
    #[error("tile ({row}, {col}) is outside the map")]
    OutOfBounds { row: usize, col: usize },
    #[error("tile ({row}, {col}) is already explored")]
    AlreadyExplored { row: usize, col: usize },
    #[error("no cost is configured for {0}")]
    UnknownEntity(Item),
    #[error("quantity must be at least one")]
    InvalidQuantity,
    #[error("cannot credit {amount} {resource}")]
    InvalidAmount { resource: Resource, amount: f64 },
}
