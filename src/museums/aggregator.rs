// Aggregator - fans a search out to several museum providers and merges the results

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;

use super::error::MuseumError;
use super::provider::{Artwork, FetchTerms, MuseumProvider, MuseumSource};
use crate::sorting::sort_artworks;

/// Outcome of running several fallible futures to completion.
///
/// Both lists keep the order in which the tasks were submitted.
#[derive(Debug)]
pub struct Settled<K, T, E> {
    pub successes: Vec<(K, T)>,
    pub failures: Vec<(K, E)>,
}

/// Await every task, never short-circuiting on failure.
///
/// All futures are polled concurrently; the call returns once each one has
/// resolved, with successes and failures collected separately.
pub async fn settle_all<K, T, E, F>(tasks: Vec<(K, F)>) -> Settled<K, T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let (keys, futures): (Vec<K>, Vec<F>) = tasks.into_iter().unzip();
    let results = join_all(futures).await;

    let mut settled = Settled {
        successes: Vec::new(),
        failures: Vec::new(),
    };
    for (key, result) in keys.into_iter().zip(results) {
        match result {
            Ok(value) => settled.successes.push((key, value)),
            Err(error) => settled.failures.push((key, error)),
        }
    }
    settled
}

/// A source that could not contribute to a combined search
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub museum: MuseumSource,
    pub error: String,
}

/// Merged search results plus the sources that failed along the way
#[derive(Debug, Clone, Default, Serialize)]
pub struct CombinedResults {
    pub artworks: Vec<Artwork>,
    pub failures: Vec<SourceFailure>,
}

/// Multi-museum search front.
///
/// Holds one provider per museum. A combined search never fails as a whole:
/// a source that errors contributes an empty page and a `SourceFailure`.
pub struct Aggregator {
    providers: Vec<Arc<dyn MuseumProvider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn MuseumProvider>>) -> Self {
        let names: Vec<&str> = providers.iter().map(|p| p.source().tag()).collect();
        tracing::info!("Museums/Aggregator: Initialized with sources [{}]", names.join(", "));
        Self { providers }
    }

    pub fn provider(&self, museum: MuseumSource) -> Option<&Arc<dyn MuseumProvider>> {
        self.providers.iter().find(|p| p.source() == museum)
    }

    pub fn sources(&self) -> Vec<MuseumSource> {
        self.providers.iter().map(|p| p.source()).collect()
    }

    /// Combined page for `terms`, failures logged and discarded.
    pub async fn fetch_combined(&self, terms: &FetchTerms) -> Vec<Artwork> {
        self.fetch_combined_report(terms).await.artworks
    }

    /// Combined page for `terms`, with per-source failures reported alongside.
    ///
    /// Results are concatenated in `selected_sources` order, keyed with
    /// `{source}-{id}`, then sorted if `terms.sort_by` is set.
    pub async fn fetch_combined_report(&self, terms: &FetchTerms) -> CombinedResults {
        let mut selected: Vec<MuseumSource> = Vec::new();
        for source in &terms.selected_sources {
            if !selected.contains(source) {
                selected.push(*source);
            }
        }

        let mut failures = Vec::new();
        let mut tasks = Vec::new();
        for museum in selected {
            match self.provider(museum) {
                Some(provider) => tasks.push((museum, provider.fetch_page(terms))),
                None => {
                    tracing::warn!("Museums/Aggregator: No provider registered for {}", museum);
                    failures.push(SourceFailure {
                        museum,
                        error: format!("{} is not configured", museum),
                    });
                }
            }
        }

        let settled = settle_all(tasks).await;

        for (museum, error) in settled.failures {
            tracing::warn!(
                "Museums/Aggregator: {} failed for \"{}\" page {}: {}",
                museum,
                terms.query,
                terms.page,
                error
            );
            failures.push(SourceFailure {
                museum,
                error: error.to_string(),
            });
        }

        let mut artworks: Vec<Artwork> = settled
            .successes
            .into_iter()
            .flat_map(|(_, page)| page)
            .collect();
        assign_unique_keys(&mut artworks);

        if let Some(key) = terms.sort_by {
            sort_artworks(&mut artworks, key, terms.sort_order);
        }

        tracing::info!(
            "Museums/Aggregator: Returning {} results for \"{}\" page {} ({} sources failed)",
            artworks.len(),
            terms.query,
            terms.page,
            failures.len()
        );
        CombinedResults { artworks, failures }
    }

    /// Route a single-item fetch to the provider for `museum`.
    pub async fn fetch_detail(&self, museum: MuseumSource, id: &str) -> Result<Artwork, MuseumError> {
        let provider = self.provider(museum).ok_or_else(|| MuseumError::NotFound {
            museum,
            id: id.to_string(),
        })?;
        let mut artwork = provider.fetch_one(id).await.map_err(|e| {
            tracing::error!("Museums/{}: Failed to fetch artwork {}: {}", museum, id, e);
            e
        })?;
        artwork.assign_unique_key(0);
        Ok(artwork)
    }
}

/// Give every record a `unique_key` that is distinct within `artworks`.
///
/// The key is `{source}-{id}` (or `{source}-{position}` without an id); a key
/// already taken gets the record's position appended.
pub fn assign_unique_keys(artworks: &mut [Artwork]) {
    let mut seen = HashSet::with_capacity(artworks.len());
    for (index, artwork) in artworks.iter_mut().enumerate() {
        artwork.assign_unique_key(index);
        while seen.contains(&artwork.unique_key) {
            artwork.unique_key = format!("{}-{}", artwork.unique_key, index);
        }
        seen.insert(artwork.unique_key.clone());
    }
}
