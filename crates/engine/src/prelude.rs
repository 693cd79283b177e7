//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use farmdash_engine::prelude::*;
//! ```

// Composer
pub use crate::composer::{SimulationRow, SimulationTable, compose};

// Price path generators
pub use crate::price_path::{
    DeterministicPricePath, GeometricBrownianMotion, PricePathGenerator, into_daily_series,
};

// Simulator
pub use crate::simulator::{FarmConfig, FarmSimulation, SimulationError, simulate_farm};

// Surface
pub use crate::surface::{IlSurface, SurfaceConfig};
