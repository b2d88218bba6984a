use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use tracing::debug;

use kinodex_core::config::ProviderConfig;
use kinodex_core::provider::{ResultBlock, SearchProvider, TitleId};

use super::error::ImdbError;
use super::types::{parse_title_href, FindResponse, FindSection};

const BASE_URL: &str = "https://www.imdb.com";

/// IMDb find-endpoint client.
pub struct ImdbClient {
    base_url: String,
    http: Client,
}

impl ImdbClient {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_owned(),
            http: Client::new(),
        }
    }

    /// Client honoring the configured host, timeout and result language.
    pub fn with_config(config: &ProviderConfig) -> Result<Self, ImdbError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| ImdbError::Parse(e.to_string()))?,
        );
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ImdbError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(ImdbError::Api {
                status,
                message: body,
            })
        }
    }

    async fn find(&self, query: &str) -> Result<FindResponse, ImdbError> {
        let resp = self
            .http
            .get(format!("{}/find", self.base_url))
            .header("Accept", "application/json")
            .query(&[("s", "tt"), ("q", query)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| ImdbError::Parse(e.to_string()))
    }
}

impl Default for ImdbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProvider for ImdbClient {
    type Error = ImdbError;

    async fn find_direct(&self, query: &str) -> Result<Option<TitleId>, ImdbError> {
        let found = self.find(query).await?;
        Ok(found.canonical.as_deref().and_then(parse_title_href))
    }

    async fn find_candidates(&self, query: &str) -> Result<Vec<ResultBlock>, ImdbError> {
        let found = self.find(query).await?;
        let blocks: Vec<ResultBlock> = found
            .sections
            .into_iter()
            .map(FindSection::into_result_block)
            .collect();
        debug!(blocks = blocks.len(), "find listing fetched");
        Ok(blocks)
    }
}
