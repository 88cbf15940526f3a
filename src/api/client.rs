use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{
    self, ApiError, AssistantReply, ChatEnvelope, ChatPayload, ErrorBody, HealthStatus,
    ResetPayload,
};
use crate::models::Destination;

/// HTTP binding to the travel backend. One instance is created at
/// startup with the configured base address and shared by every page.
pub struct TravelApi {
    http: Client,
    base: Url,
}

impl TravelApi {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("invalid backend address: {base_url}"))?;
        tracing::info!(%base, contract = types::CHAT_CONTRACT, "travel backend configured");
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    /// `GET /api/destinations/` — the static catalog.
    pub async fn destinations(&self) -> Result<Vec<Destination>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/api/destinations/")?)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    /// `GET /api/recommendations/?user_id={id}` — the per-user ranked catalog.
    pub async fn recommendations(&self, user_id: i64) -> Result<Vec<Destination>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/api/recommendations/")?)
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    /// `POST /api/chat/` — one conversational turn. The prompt is the
    /// latest message only; the backend keeps per-user history.
    pub async fn chat(&self, message: &str, user_id: i64) -> Result<AssistantReply, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/chat/")?)
            .json(&ChatPayload { message, user_id })
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: ChatEnvelope = read_json(response).await?;
        Ok(envelope.into())
    }

    /// `POST /reset` — drop the backend's history for this user.
    /// Callers treat failures as best-effort.
    pub async fn reset(&self, user_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("/reset")?)
            .json(&ResetPayload { user_id })
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }
        Ok(())
    }

    /// `GET /health` — probed once at startup; never fatal.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/health")?)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Request(e.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::Request(err.to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Backend {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull the `error` field out of a failure body, if there is one.
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(
            error_detail(r#"{"error": "Message vide"}"#).as_deref(),
            Some("Message vide")
        );
        assert!(error_detail(r#"{"status": "ok"}"#).is_none());
        assert!(error_detail("<html>502 Bad Gateway</html>").is_none());
    }

    #[test]
    fn test_endpoints_join_against_base() {
        let api = TravelApi::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            api.endpoint("/api/chat/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/chat/"
        );
        assert_eq!(
            api.endpoint("/reset").unwrap().as_str(),
            "http://127.0.0.1:8000/reset"
        );
    }
}
