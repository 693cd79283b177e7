use farmdash_domain::errors::DomainError;
use thiserror::Error;

/// Network or upstream API failure.
///
/// A failed fetch means absent input: the core never computes on a
/// partial series, and retries (if any) belong to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {code} for {coin_id}")]
    Status { coin_id: String, code: u16 },

    #[error("malformed market chart payload: {0}")]
    MalformedResponse(String),

    #[error("no price history returned for {coin_id}")]
    EmptyHistory { coin_id: String },

    #[error("fetched series failed validation: {0}")]
    InvalidSeries(#[from] DomainError),
}
