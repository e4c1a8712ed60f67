//! HTTP client for the three backend endpoints.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use super::error::ApiError;
use super::types::{Analysis, SuggestFixResult, ValidationResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const VALIDATE_ENDPOINT: &str = "/topology/validate";
pub const ANALYZE_ENDPOINT: &str = "/analyze";
pub const SUGGEST_FIX_ENDPOINT: &str = "/suggest-fix";

/// 客户端配置
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 后端地址（scheme + host + port），不带结尾 `/`
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::Client)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `/topology/validate`
    ///
    /// `payload` is a builder [`TopologyPayload`](crate::topo::TopologyPayload)
    /// or raw topology JSON.
    pub async fn validate_topology<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<ValidationResult, ApiError> {
        let body = self.post_json(VALIDATE_ENDPOINT, payload).await?;
        decode(VALIDATE_ENDPOINT, body)
    }

    /// POST `/analyze`
    pub async fn analyze_topology<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<Analysis, ApiError> {
        let body = self.post_json(ANALYZE_ENDPOINT, payload).await?;
        Analysis::from_value(body).map_err(|source| ApiError::UnexpectedShape {
            endpoint: ANALYZE_ENDPOINT.to_string(),
            source,
        })
    }

    /// POST `/suggest-fix` with a prior `/analyze` response, passed through as-is.
    pub async fn suggest_fix(&self, analysis: &Value) -> Result<SuggestFixResult, ApiError> {
        let body = self.post_json(SUGGEST_FIX_ENDPOINT, analysis).await?;
        decode(SUGGEST_FIX_ENDPOINT, body)
    }

    /// Send one JSON request and parse the JSON reply.
    #[tracing::instrument(skip(self, body), fields(base = %self.base_url))]
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        info!(%url, "📤 POST");

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        debug!(status = status.as_u16(), bytes = text.len(), "📥 response");

        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        serde_json::from_str(&text).map_err(|source| ApiError::InvalidBody {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|source| ApiError::UnexpectedShape {
        endpoint: endpoint.to_string(),
        source,
    })
}

// 后端错误体形如 {"detail": "..."}；其他情况原样返回
fn error_detail(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => text.to_string(),
        },
        _ => text.to_string(),
    }
}
