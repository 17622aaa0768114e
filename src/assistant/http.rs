use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    domain::analysis::AnalysisResult,
    infra::{config::AssistantConfig, error::AppError},
    usecases::contracts::{AssistantSourceError, AssistantTransport, ChatReply},
};

use super::wire::{AnalyzeRequestBody, ChatRequestBody, ChatResponseBody};

const ANALYZE_PATH: &str = "/api/analyze";
const CHAT_PATH: &str = "/api/chat";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// JSON-over-HTTP client for the assistant service.
#[derive(Debug, Clone)]
pub struct HttpAssistantTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssistantTransport {
    pub fn new(config: &AssistantConfig) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        let client = builder.build().map_err(AppError::HttpClient)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AssistantSourceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "posting to assistant service");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|error| AssistantSourceError::Transport(error.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| AssistantSourceError::Transport(error.to_string()))?;

        decode_response(status, &bytes)
    }
}

#[async_trait]
impl AssistantTransport for HttpAssistantTransport {
    async fn analyze(&self, session_id: &str) -> Result<AnalysisResult, AssistantSourceError> {
        self.post_json(ANALYZE_PATH, &AnalyzeRequestBody { session_id })
            .await
    }

    async fn chat(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<ChatReply, AssistantSourceError> {
        let body: ChatResponseBody = self
            .post_json(CHAT_PATH, &ChatRequestBody { session_id, message })
            .await?;

        Ok(body.into())
    }
}

/// Maps a raw response to the expected body or to a taxonomy error.
fn decode_response<R>(status: u16, body: &[u8]) -> Result<R, AssistantSourceError>
where
    R: DeserializeOwned,
{
    if !(200..300).contains(&status) {
        return Err(AssistantSourceError::Remote {
            status,
            body: truncate_body(body),
        });
    }

    serde_json::from_slice(body).map_err(|error| AssistantSourceError::Malformed(error.to_string()))
}

fn truncate_body(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect()
}
