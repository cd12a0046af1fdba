use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use super::storage::{KeyValueStorage, StorageError};
use crate::museums::Artwork;

/// Storage slot holding the serialized favourites list
pub const FAVOURITES_KEY: &str = "favourites";

/// Favourite artworks keyed by `unique_key`, persisted as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavouriteSet {
    items: Vec<Artwork>,
}

impl FavouriteSet {
    pub fn contains(&self, unique_key: &str) -> bool {
        self.items.iter().any(|a| a.unique_key == unique_key)
    }

    pub fn get(&self, unique_key: &str) -> Option<&Artwork> {
        self.items.iter().find(|a| a.unique_key == unique_key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove the artwork if present, append it otherwise. Returns true when added.
    pub fn toggle(&mut self, artwork: Artwork) -> bool {
        match self.items.iter().position(|a| a.unique_key == artwork.unique_key) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(artwork);
                true
            }
        }
    }

    pub fn into_vec(self) -> Vec<Artwork> {
        self.items
    }
}

/// Favourites with write-through persistence.
///
/// Loaded from storage on first access; every toggle rewrites the whole
/// list to storage before the in-memory copy changes. A toggle holds the
/// write lock from load to swap, so concurrent toggles never lose an update.
pub struct FavouritesStore {
    storage: Arc<dyn KeyValueStorage>,
    favourites: RwLock<Option<FavouriteSet>>,
}

impl FavouritesStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            favourites: RwLock::new(None),
        }
    }

    /// Current favourites. Missing, empty or unreadable storage yields an empty set.
    pub fn load(&self) -> FavouriteSet {
        if let Some(loaded) = self
            .favourites
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return loaded.clone();
        }

        let mut guard = self
            .favourites
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.get_or_insert_with(|| self.read_from_storage()).clone()
    }

    /// Add the artwork if absent, remove it if present, then persist the full set.
    ///
    /// If persisting fails the in-memory set is left unchanged.
    pub fn toggle(&self, mut artwork: Artwork) -> Result<FavouriteSet, StorageError> {
        if artwork.unique_key.is_empty() {
            artwork.assign_unique_key(0);
        }

        let mut guard = self
            .favourites
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = guard
            .get_or_insert_with(|| self.read_from_storage())
            .clone();
        let key = artwork.unique_key.clone();
        let added = next.toggle(artwork);

        let json = serde_json::to_string_pretty(&next)?;
        self.storage.set(FAVOURITES_KEY, &json)?;
        *guard = Some(next.clone());
        drop(guard);

        tracing::info!(
            "Favourites: {} {} ({} total)",
            if added { "Added" } else { "Removed" },
            key,
            next.len()
        );
        Ok(next)
    }

    pub fn list(&self) -> Vec<Artwork> {
        self.load().into_vec()
    }

    fn read_from_storage(&self) -> FavouriteSet {
        let contents = match self.storage.get(FAVOURITES_KEY) {
            Ok(Some(contents)) if !contents.trim().is_empty() => contents,
            Ok(_) => return FavouriteSet::default(),
            Err(e) => {
                tracing::error!("Favourites: Failed to read storage: {}. Starting empty.", e);
                return FavouriteSet::default();
            }
        };

        match serde_json::from_str::<FavouriteSet>(&contents) {
            Ok(set) => {
                tracing::debug!("Favourites: Loaded {} favourites", set.len());
                set
            }
            Err(e) => {
                tracing::error!("Favourites: Failed to parse stored favourites: {}. Starting empty.", e);
                FavouriteSet::default()
            }
        }
    }
}
