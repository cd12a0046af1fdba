// MuseumProvider trait - backend-agnostic museum collection interface

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::MuseumError;
use crate::sorting::{SortKey, SortOrder};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_ARTIST: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/600x400?text=No+Image";

/// Which museum produced a record.
///
/// The serialized tag is also the prefix of every `unique_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuseumSource {
    #[serde(rename = "cleveland")]
    Cleveland,
    #[serde(rename = "science")]
    ScienceMuseum,
    #[serde(rename = "rijksmuseum")]
    Rijksmuseum,
    #[serde(rename = "va")]
    VictoriaAlbert,
}

impl MuseumSource {
    pub const ALL: [MuseumSource; 4] = [
        MuseumSource::Cleveland,
        MuseumSource::ScienceMuseum,
        MuseumSource::Rijksmuseum,
        MuseumSource::VictoriaAlbert,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            MuseumSource::Cleveland => "cleveland",
            MuseumSource::ScienceMuseum => "science",
            MuseumSource::Rijksmuseum => "rijksmuseum",
            MuseumSource::VictoriaAlbert => "va",
        }
    }

    /// Human-readable name, used in log lines and error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            MuseumSource::Cleveland => "Cleveland",
            MuseumSource::ScienceMuseum => "Science Museum",
            MuseumSource::Rijksmuseum => "Rijksmuseum",
            MuseumSource::VictoriaAlbert => "V&A",
        }
    }
}

impl fmt::Display for MuseumSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MuseumSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cleveland" | "clev" => Ok(MuseumSource::Cleveland),
            "science" | "science-museum" | "sciencemuseum" => Ok(MuseumSource::ScienceMuseum),
            "rijksmuseum" | "rijks" => Ok(MuseumSource::Rijksmuseum),
            "va" | "v&a" | "vam" => Ok(MuseumSource::VictoriaAlbert),
            other => Err(format!("Unknown museum source '{}'", other)),
        }
    }
}

/// A single artwork in the canonical format every provider returns.
///
/// Serialized in camelCase; this is also the on-disk shape of the favourites list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    /// The museum's own identifier (accession / object / system number)
    pub id: String,
    /// `{source}-{id}`, assigned by the aggregator. Empty until then.
    #[serde(default)]
    pub unique_key: String,
    pub title: String,
    pub artist: String,
    pub image: String,
    pub description: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_display: Option<String>,
    /// Free-text date exactly as the museum gives it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    /// Signed year for chronological ordering (negative = BC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable_date: Option<i32>,
    /// Additional image URLs (alternates, full-size renditions)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    pub museum: MuseumSource,
}

impl Artwork {
    /// A record with every mandatory field at its documented default.
    pub fn with_defaults(museum: MuseumSource, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unique_key: String::new(),
            title: DEFAULT_TITLE.to_string(),
            artist: DEFAULT_ARTIST.to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            kind: None,
            on_display: None,
            creation_date: None,
            sortable_date: None,
            image_urls: Vec::new(),
            museum,
        }
    }

    /// Assign `unique_key` as `{source}-{id}`, or `{source}-{index}` when the id is empty.
    pub fn assign_unique_key(&mut self, index: usize) {
        self.unique_key = if self.id.trim().is_empty() {
            format!("{}-{}", self.museum.tag(), index)
        } else {
            format!("{}-{}", self.museum.tag(), self.id)
        };
    }
}

/// Shared query terms for one search across one or more museums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchTerms {
    #[serde(default)]
    pub query: String,
    /// 1-based
    pub page: u32,
    /// Queried in this order; results are concatenated in this order
    pub selected_sources: Vec<MuseumSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl FetchTerms {
    pub fn new(query: impl Into<String>, page: u32, selected_sources: Vec<MuseumSource>) -> Self {
        Self {
            query: query.into(),
            page,
            selected_sources,
            sort_by: None,
            sort_order: SortOrder::Asc,
        }
    }

    pub fn sorted(mut self, sort_by: SortKey, sort_order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.sort_order = sort_order;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), MuseumError> {
        if self.page < 1 {
            return Err(MuseumError::InvalidTerms(format!(
                "page must be >= 1, got {}",
                self.page
            )));
        }
        Ok(())
    }
}

/// Backend-agnostic museum collection provider.
///
/// Callers only see `Artwork`; how a museum's JSON maps onto it is the
/// provider's business. Adding a museum = implement this trait + register it
/// with the `Aggregator`.
#[async_trait]
pub trait MuseumProvider: Send + Sync {
    /// Which museum this provider talks to
    fn source(&self) -> MuseumSource;

    /// Fixed number of records requested per page
    fn page_size(&self) -> usize;

    /// Fetch a single artwork by the museum's native identifier
    async fn fetch_one(&self, id: &str) -> Result<Artwork, MuseumError>;

    /// Fetch one page of search results for `terms.query` / `terms.page`
    ///
    /// Providers MUST NOT swallow transport failures; the caller decides
    /// how to degrade.
    async fn fetch_page(&self, terms: &FetchTerms) -> Result<Vec<Artwork>, MuseumError>;
}
