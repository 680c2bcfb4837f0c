//! Application layer - Use cases and orchestration
//!
//! Contains the webhook reply use case and the port definitions it
//! depends on. Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
