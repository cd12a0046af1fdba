// VictoriaAlbertProvider - V&A collections API v2

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::dates::sortable_year_or;
use super::error::MuseumError;
use super::http::{array_at, first_str, id_at, str_at, MuseumHttp};
use super::provider::{Artwork, FetchTerms, MuseumProvider, MuseumSource};

pub const VA_BASE_URL: &str = "https://api.vam.ac.uk/v2/objects";
const VA_PAGE_SIZE: usize = 10;

const ON_DISPLAY: &str = "On display at the V&A";
const IN_STORAGE: &str = "In storage";

pub struct VictoriaAlbertProvider {
    http: MuseumHttp,
}

impl VictoriaAlbertProvider {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            http: MuseumHttp::new(MuseumSource::VictoriaAlbert, client, base_url),
        }
    }
}

/// Full-size IIIF rendition for a V&A image id
fn framemark_url(image_id: &str) -> String {
    format!(
        "https://framemark.vam.ac.uk/collections/{}/full/full/0/default.jpg",
        image_id
    )
}

/// Map a V&A search record or detail `record` onto the canonical `Artwork`.
pub fn parse_va(art: &Value) -> Artwork {
    let mut artwork = Artwork::with_defaults(
        MuseumSource::VictoriaAlbert,
        id_at(art, "/systemNumber").unwrap_or_default(),
    );

    if let Some(title) = first_str(art, &["/titles/0/title", "/_primaryTitle"]) {
        artwork.title = title.to_string();
    }
    if let Some(maker) = first_str(
        art,
        &["/_primaryMaker/name", "/artistMakerPerson/0/name/text"],
    ) {
        artwork.artist = maker.to_string();
    }
    if let Some(description) = first_str(
        art,
        &["/summaryDescription", "/briefDescription", "/physicalDescription"],
    ) {
        artwork.description = description.to_string();
    }

    let mut image_ids: Vec<&str> = array_at(art, "/images")
        .iter()
        .filter_map(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .collect();
    let primary = str_at(art, "/_primaryImageId");
    if image_ids.is_empty() {
        image_ids.extend(primary);
    }
    if let Some(image_id) = primary.or_else(|| image_ids.first().copied()) {
        artwork.image = framemark_url(image_id);
    }
    artwork.image_urls = image_ids.into_iter().map(framemark_url).collect();

    artwork.kind = str_at(art, "/objectType").map(str::to_string);
    artwork.on_display = art
        .pointer("/_currentLocation/onDisplay")
        .and_then(Value::as_bool)
        .map(|on| (if on { ON_DISPLAY } else { IN_STORAGE }).to_string());
    artwork.creation_date =
        first_str(art, &["/_primaryDate", "/productionDates/0/date/text"]).map(str::to_string);
    artwork.sortable_date = sortable_year_or(artwork.creation_date.as_deref(), None);
    artwork
}

/// Map a search response body onto a page. A missing or non-array `records` is an empty page.
pub fn parse_va_page(body: &Value) -> Vec<Artwork> {
    array_at(body, "/records").iter().map(parse_va).collect()
}

#[async_trait]
impl MuseumProvider for VictoriaAlbertProvider {
    fn source(&self) -> MuseumSource {
        MuseumSource::VictoriaAlbert
    }

    fn page_size(&self) -> usize {
        VA_PAGE_SIZE
    }

    async fn fetch_one(&self, id: &str) -> Result<Artwork, MuseumError> {
        let body = self
            .http
            .get_json(id, &[])
            .await
            .map_err(|e| e.not_found_on_404(id))?;

        match body.get("record") {
            Some(record) if record.is_object() => Ok(parse_va(record)),
            _ => Err(MuseumError::NotFound {
                museum: MuseumSource::VictoriaAlbert,
                id: id.to_string(),
            }),
        }
    }

    async fn fetch_page(&self, terms: &FetchTerms) -> Result<Vec<Artwork>, MuseumError> {
        terms.validate()?;
        let query = [
            ("q", terms.query.trim().to_string()),
            ("page", terms.page.to_string()),
            ("page_size", self.page_size().to_string()),
        ];

        let body = self.http.get_json("search", &query).await?;
        let artworks = parse_va_page(&body);

        tracing::info!(
            "Museums/V&A: Returning {} results for \"{}\" page {}",
            artworks.len(),
            terms.query,
            terms.page
        );
        Ok(artworks)
    }
}
