//! HTTP implementation of [`AnalysisBackend`] over reqwest.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{AnalysisResult, HistoryEntry},
    protocol::{AnalyzeRequest, DataEnvelope, ANALYZE_PATH, HISTORY_PATH},
};
use tracing::debug;
use url::Url;

use crate::{error::BackendError, AnalysisBackend};

const ANALYZE_ENDPOINT: &str = "analyze";
const HISTORY_ENDPOINT: &str = "history";

pub struct HttpAnalysisBackend {
    http: Client,
    analyze_url: Url,
    history_url: Url,
}

impl HttpAnalysisBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Both endpoint addresses are resolved here, once, from `base_url`.
    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .with_context(|| format!("invalid backend url '{base_url}'"))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            bail!("backend url '{base_url}' must be an http(s) address");
        }

        Ok(Self {
            http,
            analyze_url: endpoint_url(&base, ANALYZE_PATH)?,
            history_url: endpoint_url(&base, HISTORY_PATH)?,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    pub fn history_url(&self) -> &Url {
        &self.history_url
    }
}

fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let joined = format!("{}{path}", base.as_str().trim_end_matches('/'));
    Url::parse(&joined).with_context(|| format!("failed to build endpoint url '{joined}'"))
}

async fn read_envelope(
    endpoint: &'static str,
    response: Response,
) -> Result<DataEnvelope, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Status {
            endpoint,
            status,
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| BackendError::Transport { endpoint, source })?;
    serde_json::from_slice(&bytes).map_err(|err| BackendError::malformed(endpoint, err))
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn analyze(&self, text: &str) -> Result<Option<AnalysisResult>, BackendError> {
        debug!(url = %self.analyze_url, chars = text.chars().count(), "posting analyze request");
        let response = self
            .http
            .post(self.analyze_url.clone())
            .json(&AnalyzeRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                endpoint: ANALYZE_ENDPOINT,
                source,
            })?;

        let envelope = read_envelope(ANALYZE_ENDPOINT, response).await?;
        envelope
            .into_analysis()
            .map_err(|err| BackendError::from((ANALYZE_ENDPOINT, err)))
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, BackendError> {
        debug!(url = %self.history_url, "fetching history");
        let response = self
            .http
            .get(self.history_url.clone())
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                endpoint: HISTORY_ENDPOINT,
                source,
            })?;

        let envelope = read_envelope(HISTORY_ENDPOINT, response).await?;
        envelope
            .into_history()
            .map_err(|err| BackendError::from((HISTORY_ENDPOINT, err)))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
