use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a weather fetch. The display strings are the exact messages
/// shown to the user, so variants map one-to-one onto them.
///
/// Errors are classified once, at the fetch boundary. Normalization never
/// produces one.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was cut off before a response arrived.
    #[error("Request timeout - please try again")]
    Timeout,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Location not found")]
    LocationNotFound,

    #[error("Too many requests - please wait")]
    RateLimited,

    #[error("Server error - please try again later")]
    ServerError,

    /// Any other non-success HTTP status.
    #[error("An error occurred while fetching weather data")]
    Http { status: u16 },

    /// No HTTP response at all: DNS, connect or TLS failure.
    #[error("Network error - please check your connection")]
    Network,

    /// A success response whose body did not decode into the expected payload.
    #[error("Unexpected response from weather service: {detail}")]
    MalformedResponse { detail: String },
}

impl ApiError {
    /// Classify a non-success HTTP status.
    pub(crate) fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::InvalidApiKey,
            StatusCode::NOT_FOUND => ApiError::LocationNotFound,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            StatusCode::INTERNAL_SERVER_ERROR => ApiError::ServerError,
            other => ApiError::Http { status: other.as_u16() },
        }
    }

    /// Classify a transport failure, where no response was received.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        tracing::debug!(error = %err, "transport failure");
        if err.is_timeout() { ApiError::Timeout } else { ApiError::Network }
    }

    /// HTTP status of the failed exchange, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::InvalidApiKey => Some(401),
            ApiError::LocationNotFound => Some(404),
            ApiError::RateLimited => Some(429),
            ApiError::ServerError => Some(500),
            ApiError::Http { status } => Some(*status),
            ApiError::Timeout | ApiError::Network | ApiError::MalformedResponse { .. } => None,
        }
    }

    /// Short stable tag for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Timeout => "timeout",
            ApiError::InvalidApiKey => "auth",
            ApiError::LocationNotFound => "not_found",
            ApiError::RateLimited => "rate_limited",
            ApiError::ServerError => "server",
            ApiError::Http { .. } => "http",
            ApiError::Network => "network",
            ApiError::MalformedResponse { .. } => "malformed",
        }
    }
}

/// Failure to resolve the device position.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The lookup was refused or returned nothing usable.
    #[error("Unable to access your location")]
    Denied,

    /// No geolocation endpoint is configured for this environment.
    #[error("Geolocation is not supported in this environment")]
    Unsupported,
}
