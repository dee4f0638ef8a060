//! Web layer for the bus timetable server.
//!
//! Provides HTTP endpoints for listing stops and groups and for their
//! timetables.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
