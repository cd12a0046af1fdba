// ClevelandProvider - Cleveland Museum of Art open access API

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::dates::sortable_year_or;
use super::error::MuseumError;
use super::http::{array_at, first_str, id_at, str_at, MuseumHttp};
use super::provider::{Artwork, FetchTerms, MuseumProvider, MuseumSource};

pub const CLEVELAND_BASE_URL: &str = "https://openaccess-api.clevelandart.org/api/artworks";
const CLEVELAND_PAGE_SIZE: usize = 20;

const ON_DISPLAY: &str = "This piece is displayed in the Cleveland Museum now";
const IN_STORAGE: &str = "This piece is in storage";

/// Cleveland Museum of Art provider.
///
/// Unlike the other museums, search results without a web image are dropped
/// from the page instead of being shown with a placeholder.
pub struct ClevelandProvider {
    http: MuseumHttp,
}

impl ClevelandProvider {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            http: MuseumHttp::new(MuseumSource::Cleveland, client, base_url),
        }
    }
}

/// Whether a raw Cleveland record carries a web image we can show.
pub fn has_usable_image(art: &Value) -> bool {
    str_at(art, "/images/web/url").is_some()
}

/// Map one raw Cleveland record onto the canonical `Artwork`.
pub fn parse_cleveland(art: &Value) -> Artwork {
    let id = id_at(art, "/accession_number")
        .or_else(|| id_at(art, "/id"))
        .unwrap_or_default();
    let mut artwork = Artwork::with_defaults(MuseumSource::Cleveland, id);

    if let Some(title) = str_at(art, "/title") {
        artwork.title = title.to_string();
    }
    if let Some(creator) = str_at(art, "/creators/0/description") {
        artwork.artist = creator.to_string();
    }
    if let Some(description) = first_str(art, &["/description", "/wall_description"]) {
        artwork.description = description.to_string();
    }
    if let Some(image) = str_at(art, "/images/web/url") {
        artwork.image = image.to_string();
        artwork.image_urls.push(image.to_string());
    }
    artwork.image_urls.extend(
        array_at(art, "/alternate_images")
            .iter()
            .filter_map(|alt| str_at(alt, "/web/url"))
            .map(str::to_string),
    );

    artwork.kind = str_at(art, "/type").map(str::to_string);
    artwork.on_display = Some(if array_at(art, "/exhibitions/current").is_empty() {
        IN_STORAGE.to_string()
    } else {
        ON_DISPLAY.to_string()
    });
    artwork.creation_date = str_at(art, "/creation_date").map(str::to_string);
    artwork.sortable_date = sortable_year_or(
        artwork.creation_date.as_deref(),
        art.get("creation_date_earliest").and_then(Value::as_i64),
    );
    artwork
}

/// Map a search response body onto a page, dropping records without a web image.
///
/// A missing or non-array `data` is an empty page.
pub fn parse_cleveland_page(body: &Value) -> Vec<Artwork> {
    let raw = array_at(body, "/data");
    let artworks: Vec<Artwork> = raw
        .iter()
        .filter(|art| has_usable_image(art))
        .map(parse_cleveland)
        .collect();

    if artworks.len() < raw.len() {
        tracing::debug!(
            "Museums/Cleveland: Dropped {} records without an image",
            raw.len() - artworks.len()
        );
    }
    artworks
}

#[async_trait]
impl MuseumProvider for ClevelandProvider {
    fn source(&self) -> MuseumSource {
        MuseumSource::Cleveland
    }

    fn page_size(&self) -> usize {
        CLEVELAND_PAGE_SIZE
    }

    async fn fetch_one(&self, id: &str) -> Result<Artwork, MuseumError> {
        let body = self
            .http
            .get_json(id, &[])
            .await
            .map_err(|e| e.not_found_on_404(id))?;

        match body.get("data") {
            Some(data) if data.is_object() => Ok(parse_cleveland(data)),
            _ => Err(MuseumError::NotFound {
                museum: MuseumSource::Cleveland,
                id: id.to_string(),
            }),
        }
    }

    async fn fetch_page(&self, terms: &FetchTerms) -> Result<Vec<Artwork>, MuseumError> {
        terms.validate()?;
        let skip = (terms.page as usize - 1) * self.page_size();
        let mut query = vec![
            ("has_image", "1".to_string()),
            ("skip", skip.to_string()),
            ("limit", self.page_size().to_string()),
        ];
        if !terms.query.trim().is_empty() {
            query.push(("q", terms.query.trim().to_string()));
        }

        let body = self.http.get_json("", &query).await?;
        let artworks = parse_cleveland_page(&body);

        tracing::info!(
            "Museums/Cleveland: Returning {} results for \"{}\" page {}",
            artworks.len(),
            terms.query,
            terms.page
        );
        Ok(artworks)
    }
}
