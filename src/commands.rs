use std::sync::Arc;

use serde::Serialize;

use crate::error::AppError;
use crate::favourites::{FavouritesStore, JsonFileStorage, KeyValueStorage, MemoryStorage};
use crate::museums::{Aggregator, Artwork, CombinedResults, FetchTerms, MuseumConfig, MuseumSource};
use crate::settings::{Settings, SettingsManager};
use crate::sorting::{filter_by_type, sort_artworks, SortKey, SortOrder};

/// Shared state behind every command: settings, the provider registry and favourites.
pub struct AppState {
    pub settings: Arc<SettingsManager>,
    pub aggregator: Aggregator,
    pub favourites: FavouritesStore,
}

impl AppState {
    pub fn new(settings: Arc<SettingsManager>, aggregator: Aggregator, favourites: FavouritesStore) -> Self {
        Self {
            settings,
            aggregator,
            favourites,
        }
    }

    /// Load settings from disk and wire up providers and favourites storage.
    ///
    /// Favourites fall back to process memory when no data directory exists
    /// or it cannot be created.
    pub fn initialize() -> Result<Self, AppError> {
        let settings = Arc::new(SettingsManager::new()?);
        let config = MuseumConfig::from_settings(&settings.get().museums);
        let aggregator = config.build_aggregator()?;

        let storage: Arc<dyn KeyValueStorage> = match JsonFileStorage::default_dir()
            .map(|dir| JsonFileStorage::new(dir))
        {
            Some(Ok(storage)) => {
                tracing::info!("Favourites: Using {}", storage.dir().display());
                Arc::new(storage)
            }
            Some(Err(e)) => {
                tracing::warn!("Favourites: Data directory unavailable ({}). Keeping favourites in memory.", e);
                Arc::new(MemoryStorage::new())
            }
            None => {
                tracing::warn!("Favourites: No data directory. Keeping favourites in memory.");
                Arc::new(MemoryStorage::new())
            }
        };

        Ok(Self::new(settings, aggregator, FavouritesStore::new(storage)))
    }
}

/// Search request as issued by a caller. Empty `sources` means the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub sources: Vec<MuseumSource>,
    pub sort_by: Option<SortKey>,
    pub sort_order: SortOrder,
    /// Keep only records whose type matches, case-insensitively
    pub kind: Option<String>,
}

/// Result of toggling a favourite
#[derive(Debug, Clone, Serialize)]
pub struct FavouriteToggle {
    pub unique_key: String,
    pub added: bool,
    pub favourites: Vec<Artwork>,
}

/// Parse a museum name from user input
pub fn parse_museum(name: &str) -> Result<MuseumSource, AppError> {
    name.parse()
        .map_err(|_| AppError::UnknownMuseum(name.trim().to_string()))
}

/// Search the selected museums and return one combined page.
///
/// Individual museum failures are reported in `failures` and never fail the
/// whole search. Only invalid terms are an error.
pub async fn search(state: &AppState, request: SearchRequest) -> Result<CombinedResults, AppError> {
    let sources = if request.sources.is_empty() {
        state.settings.get().museums.default_sources
    } else {
        request.sources
    };

    let mut terms = FetchTerms::new(request.query, request.page, sources);
    if let Some(key) = request.sort_by {
        terms = terms.sorted(key, request.sort_order);
    }
    terms.validate()?;

    let mut results = state.aggregator.fetch_combined_report(&terms).await;
    if let Some(kind) = request.kind.as_deref() {
        results.artworks = filter_by_type(results.artworks, kind);
    }
    Ok(results)
}

/// Fetch a single artwork by museum and id
pub async fn show_artwork(state: &AppState, museum: MuseumSource, id: &str) -> Result<Artwork, AppError> {
    Ok(state.aggregator.fetch_detail(museum, id).await?)
}

/// Current favourites, optionally sorted
pub fn list_favourites(state: &AppState, sort: Option<(SortKey, SortOrder)>) -> Vec<Artwork> {
    let mut favourites = state.favourites.list();
    if let Some((key, order)) = sort {
        sort_artworks(&mut favourites, key, order);
    }
    favourites
}

/// Toggle an artwork the caller already holds
pub fn toggle_favourite(state: &AppState, artwork: Artwork) -> Result<FavouriteToggle, AppError> {
    let mut artwork = artwork;
    if artwork.unique_key.is_empty() {
        artwork.assign_unique_key(0);
    }
    let unique_key = artwork.unique_key.clone();
    let set = state.favourites.toggle(artwork)?;

    Ok(FavouriteToggle {
        added: set.contains(&unique_key),
        unique_key,
        favourites: set.into_vec(),
    })
}

/// Toggle by museum and id.
///
/// A stored favourite is removed without touching the network; otherwise the
/// artwork is fetched first so the stored record is complete.
pub async fn toggle_favourite_by_id(
    state: &AppState,
    museum: MuseumSource,
    id: &str,
) -> Result<FavouriteToggle, AppError> {
    let mut lookup = Artwork::with_defaults(museum, id);
    lookup.assign_unique_key(0);

    let favourites = state.favourites.load();
    let artwork = match favourites.get(&lookup.unique_key) {
        Some(stored) => stored.clone(),
        None => show_artwork(state, museum, id).await?,
    };
    toggle_favourite(state, artwork)
}

/// Field-level settings change. `None` or an empty list keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    /// An empty string clears the stored key
    pub rijksmuseum_api_key: Option<String>,
    pub user_agent: Option<String>,
    pub default_sources: Vec<MuseumSource>,
    pub bind_address: Option<String>,
}

pub fn get_settings(state: &AppState) -> Settings {
    state.settings.get()
}

/// Validate and persist new settings. Provider changes apply on next start.
pub fn update_settings(state: &AppState, settings: Settings) -> Result<(), AppError> {
    state.settings.update(settings)?;
    tracing::info!("Settings: Updated {}", state.settings.path().display());
    Ok(())
}

/// Apply `patch` on top of the current settings and persist the result.
pub fn patch_settings(state: &AppState, patch: SettingsPatch) -> Result<Settings, AppError> {
    let mut settings = get_settings(state);
    if let Some(key) = patch.rijksmuseum_api_key {
        settings.museums.rijksmuseum_api_key = Some(key).filter(|k| !k.trim().is_empty());
    }
    if let Some(user_agent) = patch.user_agent {
        settings.museums.user_agent = user_agent;
    }
    if !patch.default_sources.is_empty() {
        settings.museums.default_sources = patch.default_sources;
    }
    if let Some(bind_address) = patch.bind_address {
        settings.proxy.bind_address = bind_address;
    }

    update_settings(state, settings.clone())?;
    Ok(settings)
}
