//! Centralized error types for the wthr application.
//!
//! Preference, favorites and localization operations never fail; they
//! degrade to defaults. What remains is setup (config, storage) and the
//! weather service, all of which convert into [`AppError`].

use thiserror::Error;
use wthr_prefs::StorageError;
use wthr_weather::WeatherError;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Storage(StorageError::Corrupt { .. }) => {
                "Saved settings were unreadable and have been reset."
            }
            AppError::Storage(_) => "Unable to access saved settings. Try restarting the app.",
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration location not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let err: AppError = ConfigError::Invalid("weather.default_city".into()).into();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid(_))));

        let err: AppError = WeatherError::Parse("bad".into()).into();
        assert!(matches!(err, AppError::Weather(_)));
    }

    #[test]
    fn test_user_message_propagation() {
        let err = AppError::Weather(WeatherError::Status {
            status: 401,
            message: "Invalid API key".into(),
        });
        assert_eq!(err.user_message(), "Weather API key is invalid. Check settings.");

        let err = AppError::Storage(StorageError::corrupt("favorites", "expected array"));
        assert!(err.user_message().contains("reset"));
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = AppError::Config(ConfigError::ParseError("expected `=`".into()));
        assert!(err.to_string().contains("expected `=`"));
    }
}
