//! Request handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use farmdash_data::tokens;
use farmdash_domain::Token;
use farmdash_domain::value_objects::{DateWindow, Percentage, Price};
use farmdash_engine::{FarmConfig, SurfaceConfig, simulate_farm};
use tracing::info;

use crate::error::ApiError;
use crate::models::{
    HealthResponse, SimulateRequest, SimulateResponse, SurfaceRequest, SurfaceResponse,
    TokenListResponse,
};
use crate::state::AppState;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_tokens() -> Json<TokenListResponse> {
    Json(TokenListResponse {
        tokens: tokens::well_known(),
    })
}

/// Resolves a registry symbol, falling back to a raw CoinGecko id.
fn resolve_token(query: &str) -> Token {
    tokens::find(query)
        .unwrap_or_else(|| Token::new(query.to_lowercase(), query.to_uppercase(), query))
}

fn resolve_window(req: &SimulateRequest) -> Result<DateWindow, ApiError> {
    match (req.start, req.end) {
        (Some(start), Some(end)) => Ok(DateWindow::new(start, end)?),
        _ => Ok(DateWindow::last_days(Utc::now(), req.days)),
    }
}

pub async fn simulate(
    State(state): State<AppState>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let window = resolve_window(&req)?;
    let token_a = resolve_token(&req.token_a);
    let token_b = resolve_token(&req.token_b);

    info!(
        token_a = %token_a.coingecko_id,
        token_b = %token_b.coingecko_id,
        "running farm simulation"
    );

    let (series_a, series_b) = tokio::join!(
        state
            .provider
            .price_history(&token_a, &state.vs_currency, &window),
        state
            .provider
            .price_history(&token_b, &state.vs_currency, &window),
    );
    let (series_a, series_b) = (series_a?, series_b?);

    let config = FarmConfig::new(window, Percentage::from_percent(req.apr_percent))
        .with_daily_risk_free(req.daily_risk_free);
    let simulation = simulate_farm(&series_a, &series_b, &config)?;

    Ok(Json(SimulateResponse::new(
        token_a,
        token_b,
        &simulation.table,
        simulation.buy_hold,
        simulation.farm,
    )))
}

pub async fn surface(
    Json(req): Json<SurfaceRequest>,
) -> Result<Json<SurfaceResponse>, ApiError> {
    let mut config = SurfaceConfig::new(Price::new(req.base_price), Price::new(req.quote_price));
    if let (Some(min), Some(max)) = (req.min_pct, req.max_pct) {
        config = config.with_scan(min, max);
    }
    if let Some(steps) = req.steps {
        config = config.with_steps(steps);
    }

    let surface = config.generate()?;
    Ok(Json(SurfaceResponse { surface }))
}
