//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod page;
pub mod predict;
pub mod router;
pub mod state;
pub mod types;

pub use router::{create_router, RouterOptions};
pub use state::{AppState, PredictionServiceTrait};
