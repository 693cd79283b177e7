//! LP farming simulation engine.
//!
//! Orchestrates the domain math over aligned price pairs: strategy
//! composition (buy-and-hold vs farming), performance statistics and the
//! impermanent-loss grid surface. All presentation layers go through
//! this crate rather than re-deriving the formulas.

pub mod composer;
pub mod price_path;
pub mod prelude;
pub mod simulator;
pub mod surface;

pub use composer::{SimulationRow, SimulationTable};
pub use simulator::{FarmConfig, FarmSimulation, SimulationError, simulate_farm};
pub use surface::{IlSurface, SurfaceConfig};
