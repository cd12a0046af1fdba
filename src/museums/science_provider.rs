// ScienceMuseumProvider - Science Museum Group collection API (JSON:API shaped)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::dates::sortable_year_or;
use super::error::MuseumError;
use super::http::{array_at, first_str, id_at, str_at, MuseumHttp};
use super::provider::{Artwork, FetchTerms, MuseumProvider, MuseumSource};

pub const SCIENCE_BASE_URL: &str = "https://collection.sciencemuseumgroup.org.uk";
const SCIENCE_IMAGE_BASE_URL: &str = "https://coimages.sciencemuseumgroup.org.uk";
const SCIENCE_PAGE_SIZE: usize = 20;

pub struct ScienceMuseumProvider {
    http: MuseumHttp,
}

impl ScienceMuseumProvider {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            http: MuseumHttp::new(MuseumSource::ScienceMuseum, client, base_url),
        }
    }
}

fn image_url(location: &str) -> String {
    format!("{}/{}", SCIENCE_IMAGE_BASE_URL, location.trim_start_matches('/'))
}

/// Map one JSON:API resource object onto the canonical `Artwork`.
pub fn parse_science(item: &Value) -> Artwork {
    let mut artwork =
        Artwork::with_defaults(MuseumSource::ScienceMuseum, id_at(item, "/id").unwrap_or_default());

    if let Some(title) = first_str(item, &["/attributes/title/0/value", "/attributes/summary_title"]) {
        artwork.title = title.to_string();
    }
    if let Some(maker) = first_str(
        item,
        &[
            "/attributes/creation/maker/0/summary_title",
            "/attributes/creation/maker/0/name/0/value",
        ],
    ) {
        artwork.artist = maker.to_string();
    }
    if let Some(description) = str_at(item, "/attributes/description/0/value") {
        artwork.description = description.to_string();
    }

    let locations: Vec<&str> = array_at(item, "/attributes/multimedia")
        .iter()
        .filter_map(|media| str_at(media, "/@processed/medium/location"))
        .collect();
    if let Some(first) = locations.first() {
        artwork.image = image_url(first);
    }
    artwork.image_urls = locations.into_iter().map(image_url).collect();

    artwork.kind = first_str(
        item,
        &["/attributes/object_name/0/name", "/attributes/category/name"],
    )
    .map(str::to_string);
    artwork.creation_date = str_at(item, "/attributes/creation/date/0/value").map(str::to_string);
    artwork.sortable_date = sortable_year_or(artwork.creation_date.as_deref(), None);
    artwork
}

/// Map a search response body onto a page. A missing or non-array `data` is an empty page.
pub fn parse_science_page(body: &Value) -> Vec<Artwork> {
    array_at(body, "/data").iter().map(parse_science).collect()
}

#[async_trait]
impl MuseumProvider for ScienceMuseumProvider {
    fn source(&self) -> MuseumSource {
        MuseumSource::ScienceMuseum
    }

    fn page_size(&self) -> usize {
        SCIENCE_PAGE_SIZE
    }

    async fn fetch_one(&self, id: &str) -> Result<Artwork, MuseumError> {
        let body = self
            .http
            .get_json(&format!("objects/{}", id), &[])
            .await
            .map_err(|e| e.not_found_on_404(id))?;

        match body.get("data") {
            Some(data) if data.is_object() => Ok(parse_science(data)),
            _ => Err(MuseumError::NotFound {
                museum: MuseumSource::ScienceMuseum,
                id: id.to_string(),
            }),
        }
    }

    async fn fetch_page(&self, terms: &FetchTerms) -> Result<Vec<Artwork>, MuseumError> {
        terms.validate()?;
        let query = [
            ("q", terms.query.trim().to_string()),
            ("page[number]", terms.page.to_string()),
            ("page[size]", self.page_size().to_string()),
            ("sort", "-date".to_string()),
        ];

        let body = self.http.get_json("search", &query).await?;
        let artworks = parse_science_page(&body);

        tracing::info!(
            "Museums/Science: Returning {} results for \"{}\" page {}",
            artworks.len(),
            terms.query,
            terms.page
        );
        Ok(artworks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::museums::provider::{DEFAULT_ARTIST, DEFAULT_DESCRIPTION, DEFAULT_TITLE, PLACEHOLDER_IMAGE};
    use serde_json::json;

    #[test]
    fn test_parse_resource_object() {
        let item = json!({
            "id": "co8084947",
            "type": "objects",
            "attributes": {
                "summary_title": "Difference Engine No. 1",
                "title": [{"value": "Portion of Babbage's Difference Engine"}],
                "description": [{"value": "Demonstration piece assembled in 1832."}],
                "object_name": [{"name": "calculating machine"}],
                "creation": {
                    "date": [{"value": "1824-1832"}],
                    "maker": [{"summary_title": "Charles Babbage"}]
                },
                "multimedia": [
                    {"@processed": {"medium": {"location": "/images/148/medium_smg00027583.jpg"}}},
                    {"@processed": {"large": {"location": "ignored.jpg"}}}
                ]
            }
        });

        let art = parse_science(&item);
        assert_eq!(art.id, "co8084947");
        assert_eq!(art.title, "Portion of Babbage's Difference Engine");
        assert_eq!(art.artist, "Charles Babbage");
        assert_eq!(
            art.image,
            "https://coimages.sciencemuseumgroup.org.uk/images/148/medium_smg00027583.jpg"
        );
        assert_eq!(art.image_urls.len(), 1);
        assert_eq!(art.kind.as_deref(), Some("calculating machine"));
        assert_eq!(art.sortable_date, Some(1824));
        assert_eq!(art.on_display, None);
    }

    #[test]
    fn test_summary_title_fallback() {
        let art = parse_science(&json!({"id": "co1", "attributes": {"summary_title": "Sextant"}}));
        assert_eq!(art.title, "Sextant");
    }

    #[test]
    fn test_parse_empty_record_uses_defaults() {
        let art = parse_science(&json!({}));
        assert_eq!(art.title, DEFAULT_TITLE);
        assert_eq!(art.artist, DEFAULT_ARTIST);
        assert_eq!(art.description, DEFAULT_DESCRIPTION);
        assert_eq!(art.image, PLACEHOLDER_IMAGE);
        assert!(art.image_urls.is_empty());
    }

    #[test]
    fn test_null_payload_uses_defaults() {
        let art = parse_science(&Value::Null);
        assert_eq!(art.id, "");
        assert_eq!(art.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_page_maps_every_item_and_tolerates_missing_data() {
        let body = json!({"data": [{"id": "co1"}, {"id": "co2", "attributes": {"summary_title": "Orrery"}}]});
        let page = parse_science_page(&body);
        assert_eq!(page.len(), 2);
        assert_eq!(page[1].title, "Orrery");
        assert_eq!(page[0].image, PLACEHOLDER_IMAGE);

        assert!(parse_science_page(&json!({"data": null})).is_empty());
        assert!(parse_science_page(&json!({"meta": {}})).is_empty());
    }
}
