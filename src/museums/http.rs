// Shared HTTP plumbing for museum providers

use reqwest::{header, Client};
use serde_json::Value;

use super::error::MuseumError;
use super::provider::MuseumSource;

/// A reqwest client bound to one museum's base URL.
///
/// Every response is read as untyped JSON; the provider's parse function
/// walks it defensively.
pub(crate) struct MuseumHttp {
    museum: MuseumSource,
    client: Client,
    base_url: String,
}

impl MuseumHttp {
    pub(crate) fn new(museum: MuseumSource, client: Client, base_url: &str) -> Self {
        Self {
            museum,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// GET `path` with `query`, returning the JSON body of a 2xx response.
    pub(crate) async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, MuseumError> {
        let url = self.url(path);
        tracing::debug!("Museums/{}: GET {} {:?}", self.museum, url, query);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| self.network(None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.network(Some(status.as_u16()), body));
        }

        response.json::<Value>().await.map_err(|e| MuseumError::Parse {
            museum: self.museum,
            message: e.to_string(),
        })
    }

    fn network(&self, status: Option<u16>, message: String) -> MuseumError {
        MuseumError::Network {
            museum: self.museum,
            status,
            message,
        }
    }
}

/// Build the reqwest client shared by every provider.
pub fn build_client(user_agent: &str) -> reqwest::Result<Client> {
    Client::builder().user_agent(user_agent).build()
}

// ── Defensive JSON access ──

/// Non-blank string at a JSON pointer (e.g. `/titles/0/title`).
pub(crate) fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// String-or-number at a JSON pointer, rendered as a string.
pub(crate) fn id_at(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-blank string among several pointers.
pub(crate) fn first_str<'a>(value: &'a Value, pointers: &[&str]) -> Option<&'a str> {
    pointers.iter().find_map(|p| str_at(value, p))
}

/// Array at a JSON pointer, empty when missing or not an array.
pub(crate) fn array_at<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
