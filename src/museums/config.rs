// Runtime configuration for the museum providers

use std::sync::Arc;

use super::aggregator::Aggregator;
use super::cleveland_provider::ClevelandProvider;
use super::http::build_client;
use super::provider::{MuseumProvider, MuseumSource};
use super::rijks_provider::RijksmuseumProvider;
use super::science_provider::ScienceMuseumProvider;
use super::va_provider::VictoriaAlbertProvider;
use crate::settings::MuseumSettings;

/// Holds runtime configuration for the museum providers.
///
/// Built from persisted settings with environment variable overrides.
#[derive(Debug, Clone)]
pub struct MuseumConfig {
    pub cleveland_base_url: String,
    pub science_base_url: String,
    pub rijksmuseum_base_url: String,
    pub va_base_url: String,
    pub rijksmuseum_api_key: Option<String>,
    pub user_agent: String,
    pub default_sources: Vec<MuseumSource>,
}

impl MuseumConfig {
    /// Creates a configuration from settings, letting the environment override secrets
    ///
    /// - `CURATOR_RIJKSMUSEUM_API_KEY` (or `RIJKSMUSEUM_API_KEY`) replaces the stored key
    /// - `CURATOR_USER_AGENT` replaces the stored user agent
    pub fn from_settings(settings: &MuseumSettings) -> Self {
        let rijksmuseum_api_key = first_non_blank([
            std::env::var("CURATOR_RIJKSMUSEUM_API_KEY").ok(),
            std::env::var("RIJKSMUSEUM_API_KEY").ok(),
            settings.rijksmuseum_api_key.clone(),
        ]);
        let user_agent = first_non_blank([std::env::var("CURATOR_USER_AGENT").ok()])
            .unwrap_or_else(|| settings.user_agent.clone());

        Self {
            cleveland_base_url: settings.cleveland_base_url.clone(),
            science_base_url: settings.science_base_url.clone(),
            rijksmuseum_base_url: settings.rijksmuseum_base_url.clone(),
            va_base_url: settings.va_base_url.clone(),
            rijksmuseum_api_key,
            user_agent,
            default_sources: settings.default_sources.clone(),
        }
    }

    /// One provider per museum, sharing a single HTTP client.
    pub fn build_providers(&self) -> reqwest::Result<Vec<Arc<dyn MuseumProvider>>> {
        let client = build_client(&self.user_agent)?;
        Ok(vec![
            Arc::new(ClevelandProvider::new(client.clone(), &self.cleveland_base_url)),
            Arc::new(ScienceMuseumProvider::new(client.clone(), &self.science_base_url)),
            Arc::new(RijksmuseumProvider::new(
                client.clone(),
                &self.rijksmuseum_base_url,
                self.rijksmuseum_api_key.clone(),
            )),
            Arc::new(VictoriaAlbertProvider::new(client, &self.va_base_url)),
        ])
    }

    pub fn build_aggregator(&self) -> reqwest::Result<Aggregator> {
        Ok(Aggregator::new(self.build_providers()?))
    }
}

/// First candidate that is set and not blank. Set-but-empty variables fall through.
fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}
