// RijksmuseumProvider - Rijksmuseum collection API (requires an API key)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::dates::sortable_year_or;
use super::error::MuseumError;
use super::http::{array_at, first_str, id_at, str_at, MuseumHttp};
use super::provider::{Artwork, FetchTerms, MuseumProvider, MuseumSource};

pub const RIJKS_BASE_URL: &str = "https://www.rijksmuseum.nl/api/en/collection";
const RIJKS_PAGE_SIZE: usize = 10;

pub struct RijksmuseumProvider {
    http: MuseumHttp,
    api_key: Option<String>,
}

impl RijksmuseumProvider {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("Museums/Rijksmuseum: No API key configured, requests will fail");
        }
        Self {
            http: MuseumHttp::new(MuseumSource::Rijksmuseum, client, base_url),
            api_key,
        }
    }

    fn key(&self) -> Result<String, MuseumError> {
        self.api_key
            .clone()
            .ok_or(MuseumError::MissingApiKey(MuseumSource::Rijksmuseum))
    }
}

/// Map one `artObject` (search hit or detail record) onto the canonical `Artwork`.
pub fn parse_rijks(art: &Value) -> Artwork {
    let mut artwork = Artwork::with_defaults(
        MuseumSource::Rijksmuseum,
        id_at(art, "/objectNumber").unwrap_or_default(),
    );

    if let Some(title) = first_str(art, &["/title", "/longTitle"]) {
        artwork.title = title.to_string();
    }
    if let Some(maker) = first_str(
        art,
        &["/principalOrFirstMaker", "/principalMaker", "/principalMakers/0/name"],
    ) {
        artwork.artist = maker.to_string();
    }
    if let Some(description) = first_str(
        art,
        &["/plaqueDescriptionEnglish", "/description", "/label/description"],
    ) {
        artwork.description = description.to_string();
    }
    if let Some(image) = str_at(art, "/webImage/url") {
        artwork.image = image.to_string();
    }

    artwork.kind = array_at(art, "/objectTypes")
        .iter()
        .find_map(Value::as_str)
        .map(str::to_string);
    artwork.creation_date = str_at(art, "/dating/presentingDate").map(str::to_string);
    artwork.sortable_date = sortable_year_or(
        artwork.creation_date.as_deref(),
        art.pointer("/dating/sortingDate").and_then(Value::as_i64),
    );
    artwork
}

/// Map a search response body onto a page. A missing or non-array `artObjects` is an empty page.
pub fn parse_rijks_page(body: &Value) -> Vec<Artwork> {
    array_at(body, "/artObjects").iter().map(parse_rijks).collect()
}

#[async_trait]
impl MuseumProvider for RijksmuseumProvider {
    fn source(&self) -> MuseumSource {
        MuseumSource::Rijksmuseum
    }

    fn page_size(&self) -> usize {
        RIJKS_PAGE_SIZE
    }

    async fn fetch_one(&self, id: &str) -> Result<Artwork, MuseumError> {
        let key = self.key()?;
        let body = self
            .http
            .get_json(id, &[("key", key)])
            .await
            .map_err(|e| e.not_found_on_404(id))?;

        match body.get("artObject") {
            Some(art) if art.is_object() => Ok(parse_rijks(art)),
            _ => Err(MuseumError::NotFound {
                museum: MuseumSource::Rijksmuseum,
                id: id.to_string(),
            }),
        }
    }

    async fn fetch_page(&self, terms: &FetchTerms) -> Result<Vec<Artwork>, MuseumError> {
        terms.validate()?;
        let query = [
            ("key", self.key()?),
            ("q", terms.query.trim().to_string()),
            ("p", terms.page.to_string()),
            ("ps", self.page_size().to_string()),
        ];

        let body = self.http.get_json("", &query).await?;
        let artworks = parse_rijks_page(&body);

        tracing::info!(
            "Museums/Rijksmuseum: Returning {} results for \"{}\" page {}",
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
    fn test_parse_search_hit() {
        let art = parse_rijks(&json!({
            "objectNumber": "SK-C-5",
            "title": "The Night Watch",
            "longTitle": "The Night Watch, Rembrandt van Rijn, 1642",
            "principalOrFirstMaker": "Rembrandt van Rijn",
            "webImage": {"url": "https://lh3.googleusercontent.com/night-watch"}
        }));
        assert_eq!(art.id, "SK-C-5");
        assert_eq!(art.title, "The Night Watch");
        assert_eq!(art.artist, "Rembrandt van Rijn");
        assert_eq!(art.image, "https://lh3.googleusercontent.com/night-watch");
        assert_eq!(art.description, DEFAULT_DESCRIPTION);
        assert_eq!(art.sortable_date, None);
    }

    #[test]
    fn test_parse_detail_record() {
        let art = parse_rijks(&json!({
            "objectNumber": "SK-A-2344",
            "title": "The Milkmaid",
            "principalMaker": "Johannes Vermeer",
            "plaqueDescriptionEnglish": "Light floods in through a window.",
            "objectTypes": ["painting"],
            "dating": {"presentingDate": "c. 1660", "sortingDate": 1660}
        }));
        assert_eq!(art.artist, "Johannes Vermeer");
        assert_eq!(art.description, "Light floods in through a window.");
        assert_eq!(art.kind.as_deref(), Some("painting"));
        assert_eq!(art.creation_date.as_deref(), Some("c. 1660"));
        assert_eq!(art.sortable_date, Some(1660));
    }

    #[test]
    fn test_parse_empty_record_uses_defaults() {
        let art = parse_rijks(&json!({"webImage": null}));
        assert_eq!(art.title, DEFAULT_TITLE);
        assert_eq!(art.artist, DEFAULT_ARTIST);
        assert_eq!(art.image, PLACEHOLDER_IMAGE);
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let provider = RijksmuseumProvider::new(Client::new(), RIJKS_BASE_URL, Some("  ".to_string()));
        let terms = FetchTerms::new("rembrandt", 1, vec![MuseumSource::Rijksmuseum]);
        let err = provider.fetch_page(&terms).await.unwrap_err();
        assert!(matches!(err, MuseumError::MissingApiKey(MuseumSource::Rijksmuseum)));
    }

    #[test]
    fn test_page_keeps_records_without_image() {
        let body = json!({
            "count": 2,
            "artObjects": [
                {"objectNumber": "SK-C-5", "webImage": {"url": "https://lh3.googleusercontent.com/nw"}},
                {"objectNumber": "RP-P-1", "webImage": null}
            ]
        });
        let page = parse_rijks_page(&body);
        assert_eq!(page.len(), 2);
        assert_eq!(page[1].image, PLACEHOLDER_IMAGE);
        assert!(parse_rijks_page(&json!({"artObjects": null})).is_empty());
    }
}
