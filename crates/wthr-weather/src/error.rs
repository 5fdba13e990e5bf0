//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) if e.is_timeout() => "The request timed out. Please try again.",
            Self::Network(_) => "Unable to connect. Check your internet connection.",
            Self::Status { status: 401, .. } => "Weather API key is invalid. Check settings.",
            Self::Status { status: 404, .. } => "City not found. Check and try again.",
            Self::Status { status: 429, .. } => {
                "Too many weather requests. Please try again later."
            }
            Self::Status { status, .. } if *status >= 500 => {
                "Weather service unavailable. Please try again later."
            }
            Self::Status { .. } => "Weather service error. Please try again.",
            Self::Parse(_) => "Received an unexpected response. Please try again.",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = WeatherError::Status {
            status: 404,
            message: "city not found".into(),
        };
        assert!(err.user_message().starts_with("City not found"));
        assert!(err.is_not_found());

        let err = WeatherError::Status {
            status: 500,
            message: "internal".into(),
        };
        assert!(err.user_message().contains("unavailable"));
        assert!(!err.is_not_found());

        let err = WeatherError::Parse("missing field `main`".into());
        assert!(err.user_message().contains("unexpected"));
    }

    #[test]
    fn test_display() {
        let err = WeatherError::Status {
            status: 401,
            message: "Invalid API key".into(),
        };
        assert_eq!(err.to_string(), "API error 401: Invalid API key");
    }
}
