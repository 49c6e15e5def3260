//! Remote embedder: OpenAI-compatible `POST /embeddings` client.
//!
//! Retries on 429 and 5xx with exponential backoff. Rows are re-ordered by the
//! returned `index`, re-normalised, and checked against the configured dimension.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::{l2_normalize, Embedder, EmbeddingError, EmbeddingMatrix};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const BACKOFF_BASE: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Blocking facade over an async HTTP client.
///
/// `encode` drives the request on the runtime captured at construction, so it
/// must be called from a blocking thread (`spawn_blocking`), never from an async task.
pub struct RemoteEmbedder {
    client: Client,
    runtime: Handle,
    url: String,
    api_key: Option<String>,
    model: String,
    dimension: usize,
    backoff_base: Duration,
}

impl RemoteEmbedder {
    pub fn new(
        runtime: Handle,
        url: String,
        api_key: Option<String>,
        model: String,
        dimension: usize,
    ) -> Result<Self, EmbeddingError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            runtime,
            url,
            api_key,
            model,
            dimension,
            backoff_base: BACKOFF_BASE,
        })
    }

    async fn call(&self, texts: &[String]) -> Result<EmbeddingResponse, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut last_error: Option<EmbeddingError> = None;

        // One initial attempt plus MAX_RETRIES retries, backing off 1s, 2s, 4s.
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff_base * (1 << (attempt - 1));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.url).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: EmbeddingResponse = response.json().await?;
            debug!("Embedding call succeeded: rows={}", parsed.data.len());
            return Ok(parsed);
        }

        if let Some(e) = last_error {
            warn!("Embedding API gave up after {} retries: {}", MAX_RETRIES, e);
        }
        Err(EmbeddingError::RetriesExhausted {
            retries: MAX_RETRIES,
        })
    }
}

impl Embedder for RemoteEmbedder {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, texts: &[String]) -> Result<EmbeddingMatrix, EmbeddingError> {
        if texts.is_empty() {
            return Ok(EmbeddingMatrix::default());
        }
        let response = self.runtime.block_on(self.call(texts))?;
        into_matrix(response, texts.len(), self.dimension)
    }
}

/// Orders rows by `index`, normalises them, and checks count and width.
fn into_matrix(
    response: EmbeddingResponse,
    expected_rows: usize,
    dimension: usize,
) -> Result<EmbeddingMatrix, EmbeddingError> {
    let mut data = response.data;
    if data.len() != expected_rows {
        return Err(EmbeddingError::MalformedResponse(format!(
            "expected {expected_rows} embeddings, got {}",
            data.len()
        )));
    }
    data.sort_by_key(|row| row.index);

    let mut rows = Vec::with_capacity(data.len());
    for (position, row) in data.into_iter().enumerate() {
        if row.index != position {
            return Err(EmbeddingError::MalformedResponse(format!(
                "missing embedding for input {position}"
            )));
        }
        if row.embedding.len() != dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dimension,
                actual: row.embedding.len(),
            });
        }
        let mut vector = row.embedding;
        l2_normalize(&mut vector);
        rows.push(vector);
    }

    Ok(EmbeddingMatrix::new(rows))
}
