pub mod impermanent_loss;
pub mod performance;
pub mod rewards;

pub use performance::PerformanceMetrics;
