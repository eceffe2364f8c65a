//! Client for the host's REST data API.
//!
//! Collections are served at `GET /<collection>?page=N&limit=L&fields=..`
//! and answer `{"items": [...], "has_more": bool}`. Resource payloads are
//! served at `GET /resources/<id>/file`. Every request carries the API
//! token as a query parameter.

use serde_json::{Value, json};
use tracing::debug;

use super::{Collection, DataApi, HostError, ItemPage, PageRequest};

/// Default address of the host's data API.
pub const DEFAULT_JOPLIN_URL: &str = "http://localhost:41184";

/// Upper bound on pages walked while assembling note-tag associations.
const MAX_ASSOCIATION_PAGES: u32 = 10_000;

/// REST client for the host's data API.
#[derive(Debug, Clone)]
pub struct JoplinClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl JoplinClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_page(
        &self,
        path: &str,
        page: u32,
        limit: usize,
        fields: &[&str],
    ) -> Result<ItemPage<Value>, HostError> {
        let url = format!("{}/{}", self.base_url, path);
        let page = page.to_string();
        let limit = limit.to_string();
        let fields = fields.join(",");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("token", self.token.as_str()),
                ("page", page.as_str()),
                ("limit", limit.as_str()),
                ("fields", fields.as_str()),
            ])
            .send()
            .await
            .map_err(|e| HostError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response
            .json::<ItemPage<Value>>()
            .await
            .map_err(|e| HostError::Decode(format!("{path}: {e}")))
    }

    /// Walks every page of `path` and returns all items.
    async fn fetch_all(
        &self,
        path: &str,
        limit: usize,
        fields: &[&str],
    ) -> Result<Vec<Value>, HostError> {
        let mut items = Vec::new();
        for page in 1..=MAX_ASSOCIATION_PAGES {
            let batch = self.fetch_page(path, page, limit, fields).await?;
            items.extend(batch.items);
            if !batch.has_more {
                return Ok(items);
            }
        }
        Err(HostError::Decode(format!(
            "{path}: more than {MAX_ASSOCIATION_PAGES} pages"
        )))
    }

    /// The API has no global association collection, so associations are
    /// assembled from each tag's note list and served as a single page.
    async fn note_tags(&self, request: &PageRequest<'_>) -> Result<ItemPage<Value>, HostError> {
        if request.page > 1 {
            return Ok(ItemPage {
                items: Vec::new(),
                has_more: false,
            });
        }

        let tags = self
            .fetch_all(Collection::Tags.name(), request.limit, &["id"])
            .await?;

        let mut items = Vec::new();
        for tag in &tags {
            let Some(tag_id) = tag.get("id").and_then(Value::as_str) else {
                continue;
            };
            let notes = self
                .fetch_all(&format!("tags/{tag_id}/notes"), request.limit, &["id"])
                .await?;
            for note in &notes {
                if let Some(note_id) = note.get("id").and_then(Value::as_str) {
                    items.push(json!({ "note_id": note_id, "tag_id": tag_id }));
                }
            }
        }

        debug!(tags = tags.len(), associations = items.len(), "assembled note tags");
        Ok(ItemPage {
            items,
            has_more: false,
        })
    }
}

impl DataApi for JoplinClient {
    async fn get_page(
        &self,
        collection: Collection,
        request: &PageRequest<'_>,
    ) -> Result<ItemPage<Value>, HostError> {
        match collection {
            Collection::NoteTags => self.note_tags(request).await,
            _ => {
                self.fetch_page(collection.name(), request.page, request.limit, request.fields)
                    .await
            }
        }
    }

    async fn get_resource_file(&self, id: &str) -> Result<Option<Vec<u8>>, HostError> {
        let path = format!("resources/{id}/file");
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| HostError::Request(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(HostError::Status {
                status: status.as_u16(),
                path,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HostError::Request(e.to_string()))?;
        Ok(Some(bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = JoplinClient::new("http://localhost:41184/", "secret");
        assert_eq!(client.base_url(), "http://localhost:41184");
    }
}
