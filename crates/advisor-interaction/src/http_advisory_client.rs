//! HttpAdvisoryClient - POSTs the conversation to the advisory endpoint.
//!
//! The endpoint is a thin proxy in front of a language model. It accepts
//! `{ "messages": [ {role, content}, ... ] }` and answers `{ "reply": "..." }`.
//! No API key ever passes through this client; the proxy holds it.

use advisor_core::advisory::{AdvisoryBackend, FALLBACK_REPLY};
use advisor_core::conversation::Message;
use advisor_core::error::{AdvisorError, Result};
use advisor_infrastructure::AdvisorConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Advisory backend that talks to the configured HTTP endpoint.
#[derive(Clone)]
pub struct HttpAdvisoryClient {
    client: Client,
    endpoint: Option<String>,
}

impl HttpAdvisoryClient {
    /// Creates a client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Creates a client from configuration.
    ///
    /// A missing endpoint does not fail here; every request will fail with
    /// `AdvisorError::Configuration` before touching the network. Use
    /// [`HttpAdvisoryClient::try_from_config`] to fail at startup instead.
    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint().ok().map(str::to_string),
        }
    }

    /// Creates a client from configuration, failing fast without an endpoint.
    pub fn try_from_config(config: &AdvisorConfig) -> Result<Self> {
        Ok(Self::new(config.endpoint()?))
    }

    /// Overrides the underlying HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self) -> Result<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or_else(|| AdvisorError::config("Advisory endpoint not set"))
    }

    async fn send_request(&self, endpoint: &str, body: &ReplyRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(endpoint)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AdvisorError::network(format!("Advisory request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(AdvisorError::remote(status.as_u16(), body_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| AdvisorError::network(format!("Failed to read advisory reply: {err}")))?;

        match extract_reply(&bytes) {
            Ok(reply) => Ok(reply),
            Err(err) => {
                tracing::warn!("[HttpAdvisoryClient] {}; substituting fallback reply", err);
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }
}

#[async_trait]
impl AdvisoryBackend for HttpAdvisoryClient {
    async fn request_reply(&self, messages: &[Message]) -> Result<Message> {
        let endpoint = self.endpoint()?;
        tracing::debug!(
            "[HttpAdvisoryClient] POST {} with {} message(s)",
            endpoint,
            messages.len()
        );

        let reply = self.send_request(endpoint, &ReplyRequest { messages }).await?;
        Ok(Message::assistant(reply))
    }
}

#[derive(Serialize)]
struct ReplyRequest<'a> {
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ReplyResponse {
    reply: Option<String>,
}

fn extract_reply(body: &[u8]) -> Result<String> {
    let parsed: ReplyResponse = serde_json::from_slice(body)
        .map_err(|err| AdvisorError::malformed(format!("Unparsable advisory reply: {err}")))?;

    parsed
        .reply
        .filter(|reply| !reply.trim().is_empty())
        .ok_or_else(|| AdvisorError::malformed("Advisory reply has no `reply` field"))
}
