//! HTTP client for the external recognition service
//!
//! The model server exposes two endpoints:
//! - `POST {base}/classify/` taking a multipart form whose `image` file holds
//!   the base64 of a PNG, answering with scores per category index
//! - `GET {base}/metadata/` answering `{"categories": {"<index>": "<name>"}}`

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use shared::CategoryCatalog;

use crate::error::{ClassifyError, ClassifyResult};
use crate::ranking::RawScores;
use crate::traits::Recognizer;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Score payload as returned by `/classify/`
///
/// Older model servers answer with a list of category records instead of a
/// flat map; both are accepted. Untagged enums buffer their input, so the
/// flat map's JSON keys arrive as strings and are parsed here.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScoresResponse {
    Flat(HashMap<String, f64>),
    Listed(Vec<ListedScore>),
}

#[derive(Debug, Deserialize)]
struct ListedScore {
    category: ListedCategory,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct ListedCategory {
    index: u32,
}

impl TryFrom<ScoresResponse> for RawScores {
    type Error = ClassifyError;

    fn try_from(response: ScoresResponse) -> ClassifyResult<Self> {
        match response {
            ScoresResponse::Flat(scores) => scores
                .into_iter()
                .map(|(key, score)| {
                    key.trim()
                        .parse::<u32>()
                        .map(|index| (index, score))
                        .map_err(|_| ClassifyError::protocol(format!("invalid category index {key:?}")))
                })
                .collect(),
            ScoresResponse::Listed(listed) => Ok(listed
                .into_iter()
                .map(|score| (score.category.index, score.confidence))
                .collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    categories: HashMap<u32, String>,
}

/// [`Recognizer`] backed by the model server's HTTP API
#[derive(Debug, Clone)]
pub struct HttpRecognizer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecognizer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClassifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::Internal {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/", self.base_url, path)
    }

    /// Load the full category catalog from the model server
    pub async fn fetch_catalog(&self) -> ClassifyResult<CategoryCatalog> {
        let url = self.endpoint("metadata");
        debug!("Fetching category metadata from {}", url);

        let body = self.fetch_body(self.client.get(&url)).await?;
        let metadata: MetadataResponse = serde_json::from_slice(&body)
            .map_err(|e| ClassifyError::protocol(format!("invalid metadata response: {e}")))?;

        info!("📚 Loaded {} categories from {}", metadata.categories.len(), self.base_url);
        Ok(CategoryCatalog::from_map(metadata.categories))
    }

    /// Send a request and return the body of a successful response
    async fn fetch_body(&self, request: reqwest::RequestBuilder) -> ClassifyResult<Vec<u8>> {
        let response = request.send().await.map_err(ClassifyError::unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::unavailable(format!("model server returned {status}")));
        }

        let body = response.bytes().await.map_err(ClassifyError::unavailable)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Recognizer for HttpRecognizer {
    async fn classify(&self, png: &[u8]) -> ClassifyResult<RawScores> {
        let part = Part::text(STANDARD.encode(png)).file_name("image");
        let form = Form::new().part("image", part);

        let body = self
            .fetch_body(self.client.post(self.endpoint("classify")).multipart(form))
            .await?;

        let scores: ScoresResponse = serde_json::from_slice(&body)
            .map_err(|e| ClassifyError::protocol(format!("invalid classify response: {e}")))?;
        RawScores::try_from(scores)
    }
}
