use crate::codeforces::model::{ApiResponse, ContestRecord};
use crate::config::BotConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;

type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out while requesting the contest list")]
    Timeout,
    #[error("upstream returned an error: {0}")]
    Upstream(String),
    #[error("failed to request the contest list: {0}")]
    Request(reqwest::Error),
    #[error("failed to deserialize JSON data: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(e)
        }
    }
}

/// Source of contest records.
#[async_trait]
pub trait ContestSource {
    async fn fetch_contests(&self) -> Result<Vec<ContestRecord>>;
}

pub struct CodeforcesClient {
    url: Url,
    client: Client,
}

impl CodeforcesClient {
    pub fn new(config: &BotConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.fetch_timeout).build()?;

        Ok(CodeforcesClient {
            url: config.api_url.clone(),
            client,
        })
    }
}

#[async_trait]
impl ContestSource for CodeforcesClient {
    async fn fetch_contests(&self) -> Result<Vec<ContestRecord>> {
        tracing::info!("Start to retrieve contests information from {}", self.url);
        let res = self.client.get(self.url.clone()).send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        // Codeforces reports failures as JSON with a non-2xx status code,
        // so the body is inspected before the HTTP status.
        let response: ApiResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("failed to parse response with status {}: {}", status, e);
            FetchError::Deserialize(e)
        })?;

        if !response.is_ok() {
            let message = response.comment.unwrap_or(response.status);
            tracing::error!("error response returned from Codeforces: {}", message);
            return Err(FetchError::Upstream(message));
        }

        let values = response
            .result
            .ok_or(FetchError::Upstream(String::from("result field is missing")))?;
        let contests = parse_records(values);

        tracing::info!(
            "{} contests information successfully retrieved.",
            contests.len()
        );

        Ok(contests)
    }
}

/// Converts raw result elements into records, dropping the ones which don't fit the schema.
pub fn parse_records(values: Vec<Value>) -> Vec<ContestRecord> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ContestRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("skip malformed contest record: {}", e);
                None
            }
        })
        .collect()
}
