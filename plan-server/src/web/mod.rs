//! Web layer for the plan parameter server.
//!
//! Decodes query strings and returns the resolved search requests.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, SharedClock};
