use thiserror::Error;

/// Failure talking to the weather API.
///
/// Screens never see this type; [`crate::WeatherClient`] logs it and reports
/// "no data" instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission not granted")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}
