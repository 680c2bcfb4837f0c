//! Reply Bridge HTTP presentation layer
//!
//! This crate provides the webhook endpoints and the server binary.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{create_app, create_router};
pub use server::{ShutdownOutcome, serve_with_deadline};
pub use state::AppState;
