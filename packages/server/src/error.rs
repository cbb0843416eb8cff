//! Error responses for the smart spray API.
//!
//! Every failure is rendered as an [`ApiErrorBody`]:
//!
//! | Variant | Status |
//! |---|---|
//! | [`ApiError::Validation`], [`ApiError::InvalidJson`] | 400 |
//! | [`ApiError::WeatherUnavailable`] | 502 |
//! | [`ApiError::Internal`] | 500 |

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use smart_spray_server_models::{ApiErrorBody, ValidationError};
use smart_spray_weather::WeatherError;
use thiserror::Error;

/// Errors returned by the API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The body is not a JSON object of the expected shape.
    #[error("Invalid JSON body")]
    InvalidJson(String),

    /// No weather provider could produce a reading.
    #[error("Weather service unavailable")]
    WeatherUnavailable(#[source] WeatherError),

    /// Anything else.
    #[error("Internal server error")]
    Internal(String),
}

impl From<WeatherError> for ApiError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::Unavailable { .. }
            | WeatherError::Http(_)
            | WeatherError::Status { .. }
            | WeatherError::CityNotFound { .. } => Self::WeatherUnavailable(e),
            WeatherError::Parse { .. } | WeatherError::MissingApiKey { .. } => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl ApiError {
    fn detail(&self) -> Option<String> {
        match self {
            Self::Validation(_) => None,
            Self::InvalidJson(detail) | Self::Internal(detail) => Some(detail.clone()),
            Self::WeatherUnavailable(e) => Some(e.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::WeatherUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            error: self.to_string(),
            detail: self.detail(),
        })
    }
}
