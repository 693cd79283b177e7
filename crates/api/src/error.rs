use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use farmdash_data::FetchError;
use farmdash_domain::errors::UsageError;
use farmdash_engine::SimulationError;
use serde::Serialize;
use thiserror::Error;

/// API-level error, mapped onto HTTP statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Bad input, detected at the boundary.
            Self::Usage(_) | Self::Simulation(SimulationError::Usage(_)) => StatusCode::BAD_REQUEST,
            // Valid request, no computable result.
            Self::Simulation(SimulationError::EmptyRange(_))
            | Self::Simulation(SimulationError::Domain(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            // Upstream let us down.
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use farmdash_domain::errors::{DomainError, EmptyRangeError};

    #[test]
    fn test_status_mapping() {
        let usage: ApiError = UsageError::TokenSelection { selected: 3 }.into();
        assert_eq!(usage.status_code(), StatusCode::BAD_REQUEST);

        let empty: ApiError = SimulationError::EmptyRange(EmptyRangeError {
            start: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap(),
        })
        .into();
        assert_eq!(empty.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let domain: ApiError = SimulationError::Domain(DomainError::EmptySeries).into();
        assert_eq!(domain.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let fetch: ApiError = FetchError::EmptyHistory {
            coin_id: "bitcoin".into(),
        }
        .into();
        assert_eq!(fetch.status_code(), StatusCode::BAD_GATEWAY);
    }
}
