//! Web layer for the route planner.
//!
//! Provides HTTP endpoints for routing between place names or coordinates.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
