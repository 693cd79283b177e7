//! REST presentation adapter.
//!
//! Thin JSON surface over the engine for a charting front-end:
//! - simulation tables and per-strategy metrics
//! - impermanent-loss surfaces for 3D rendering
//! - the selectable token registry
//!
//! All math lives in the domain and engine crates; handlers only wire
//! requests to them.

/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// API request/response models.
pub mod models;
/// Server configuration and startup.
pub mod server;
/// Application state.
pub mod state;

pub use error::ApiError;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;
