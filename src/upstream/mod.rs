//! # Upstream Module
//!
//! HTTP client for the third-party services the gateway relays: AI chat,
//! song lookup, image generation, TikTok profile lookup and pie images.
//!
//! Every call is a plain `GET` against a configurable base URL. Responses
//! are passed through untouched, either as JSON or as raw bytes; a transport
//! error or a non-2xx status becomes an [`UpstreamError`] and the handler
//! decides what the client sees.

use axum::body::Bytes;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::{config, utils};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid upstream url {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Base URLs of the relayed services.
#[derive(Debug, Clone)]
pub struct UpstreamEndpoints {
    pub ai: String,
    pub song: String,
    pub image: String,
    pub image_key: String,
    pub tiktok: String,
    pub pies: String,
}

impl UpstreamEndpoints {
    pub fn from_env() -> Self {
        Self {
            ai: config::ai_api_url(),
            song: config::song_api_url(),
            image: config::image_api_url(),
            image_key: config::image_api_key(),
            tiktok: config::tiktok_api_url(),
            pies: config::pies_api_url(),
        }
    }

    /// Points every service at the same base, each under its own path.
    /// Handy for tests that stand up a single fake upstream.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            ai: format!("{base}/api/gpt"),
            song: format!("{base}/downloader/youtube-play"),
            image: format!("{base}/api/ai/imagine"),
            image_key: "test".to_string(),
            tiktok: format!("{base}/api/stalk/tiktok"),
            pies: format!("{base}/api/pies"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    endpoints: UpstreamEndpoints,
}

impl UpstreamClient {
    pub fn new(endpoints: UpstreamEndpoints) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(config::upstream_timeout())
            .build()?;
        Ok(Self { http, endpoints })
    }

    pub async fn ask_ai(&self, message: &str) -> Result<Value, UpstreamError> {
        self.get_json(&self.endpoints.ai, &[("q", message)]).await
    }

    pub async fn find_song(&self, query: &str) -> Result<Value, UpstreamError> {
        self.get_json(&self.endpoints.song, &[("query", query)])
            .await
    }

    pub async fn imagine(&self, prompt: &str) -> Result<Bytes, UpstreamError> {
        self.get_bytes(
            &self.endpoints.image,
            &[("apikey", self.endpoints.image_key.as_str()), ("query", prompt)],
        )
        .await
    }

    pub async fn tiktok_profile(&self, username: &str) -> Result<Value, UpstreamError> {
        self.get_json(&self.endpoints.tiktok, &[("username", username)])
            .await
    }

    pub async fn pies(&self, category: &str) -> Result<Bytes, UpstreamError> {
        let mut url = Url::parse(&self.endpoints.pies)
            .map_err(|_| UpstreamError::InvalidUrl(self.endpoints.pies.clone()))?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.endpoints.pies.clone()))?
            .pop_if_empty()
            .push(category);

        self.get_bytes(url.as_str(), &[]).await
    }

    fn url_with_query(url: &str, query: &[(&str, &str)]) -> String {
        if query.is_empty() {
            url.to_string()
        } else {
            format!("{url}?{}", utils::encode_query(query))
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let res = self
            .http
            .get(Self::url_with_query(url, query))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn get_bytes(&self, url: &str, query: &[(&str, &str)]) -> Result<Bytes, UpstreamError> {
        let res = self
            .http
            .get(Self::url_with_query(url, query))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.bytes().await?)
    }
}
