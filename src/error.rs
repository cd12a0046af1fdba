use crate::favourites::StorageError;
use crate::museums::MuseumError;
use crate::settings::SettingsError;

/// Application error types for the curator
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A museum provider failed (network, parse, not found, missing key)
    #[error(transparent)]
    Museum(#[from] MuseumError),

    /// Reading or writing the favourites slot failed
    #[error("Favourites storage failed: {0}")]
    Storage(#[from] StorageError),

    /// Loading, validating or saving settings failed
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The shared HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Socket or filesystem failure outside the stores above
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Command output could not be encoded
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// A museum name that matches no known source
    #[error("Unknown museum '{0}'. Expected one of: cleveland, science, rijksmuseum, va")]
    UnknownMuseum(String),

    /// Invalid runtime configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::museums::MuseumSource;

    #[test]
    fn test_museum_errors_pass_through_unchanged() {
        let inner = MuseumError::MissingApiKey(MuseumSource::Rijksmuseum);
        let expected = inner.to_string();
        let err: AppError = inner.into();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_unknown_museum_lists_choices() {
        let err = AppError::UnknownMuseum("louvre".to_string());
        assert!(err.to_string().contains("'louvre'"));
        assert!(err.to_string().contains("rijksmuseum"));
    }
}
