//! Error types for museum provider operations

use super::provider::MuseumSource;

/// Errors that can occur when talking to a museum collection API
#[derive(Debug, thiserror::Error)]
pub enum MuseumError {
    /// Transport failure or non-2xx response
    #[error("{museum} request failed{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Network {
        museum: MuseumSource,
        status: Option<u16>,
        message: String,
    },

    /// Response body was not JSON, or not the shape we can work with at all
    #[error("{museum} returned an unreadable payload: {message}")]
    Parse { museum: MuseumSource, message: String },

    /// Single-item fetch with no matching record
    #[error("{museum} has no artwork with id '{id}'")]
    NotFound { museum: MuseumSource, id: String },

    #[error("{0} API key is not configured")]
    MissingApiKey(MuseumSource),

    #[error("Invalid fetch terms: {0}")]
    InvalidTerms(String),
}

impl MuseumError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MuseumError::NotFound { .. })
    }

    /// Turn a 404 from a detail endpoint into `NotFound`; everything else passes through.
    pub(crate) fn not_found_on_404(self, id: &str) -> Self {
        match self {
            MuseumError::Network {
                museum,
                status: Some(404),
                ..
            } => MuseumError::NotFound {
                museum,
                id: id.to_string(),
            },
            other => other,
        }
    }
}
