//! Request and response payloads.

use chrono::{DateTime, Utc};
use farmdash_domain::Token;
use farmdash_domain::metrics::PerformanceMetrics;
use farmdash_engine::{IlSurface, SimulationRow, SimulationTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TokenListResponse {
    pub tokens: Vec<Token>,
}

/// Simulation request: a token pair, a window and farming terms.
///
/// The window is either explicit (`start`/`end`) or the last `days`
/// days; explicit bounds win when both are present.
#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub token_a: String,
    pub token_b: String,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default = "default_days")]
    pub days: u32,
    /// APR in percent points, e.g. 25.0 for 25%/year.
    pub apr_percent: Decimal,
    /// Daily risk-free rate for the Sharpe ratio.
    #[serde(default)]
    pub daily_risk_free: Decimal,
}

fn default_days() -> u32 {
    90
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub token_a: Token,
    pub token_b: Token,
    pub rows: Vec<SimulationRow>,
    pub buy_hold: PerformanceMetrics,
    pub farm: PerformanceMetrics,
}

impl SimulateResponse {
    pub fn new(
        token_a: Token,
        token_b: Token,
        table: &SimulationTable,
        buy_hold: PerformanceMetrics,
        farm: PerformanceMetrics,
    ) -> Self {
        Self {
            token_a,
            token_b,
            rows: table.rows().to_vec(),
            buy_hold,
            farm,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SurfaceRequest {
    pub base_price: Decimal,
    pub quote_price: Decimal,
    #[serde(default)]
    pub min_pct: Option<Decimal>,
    #[serde(default)]
    pub max_pct: Option<Decimal>,
    #[serde(default)]
    pub steps: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SurfaceResponse {
    pub surface: IlSurface,
}
