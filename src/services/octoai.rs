//! OctoAI Cloud adapter
//!
//! Posts `{"prompt", "parameters"}` to a deployed endpoint and reads back
//! `generated_text`. No retry, no streaming.

use std::sync::Arc;

use crate::{config::AdapterConfig, error::Result};

use super::{
    enforce_stop_tokens,
    transport::{request_headers, HttpTransport, Transport},
    IdentifyingParams, InferenceRequest, InferenceResponse, Llm,
};

/// Adapter for a single OctoAI Cloud inference endpoint
#[derive(Clone)]
pub struct OctoAiAdapter {
    config: AdapterConfig,
    transport: Arc<dyn Transport>,
}

impl OctoAiAdapter {
    /// Create an adapter using the blocking HTTP transport
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be sent as a header or the HTTP
    /// client cannot be built
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create an adapter over a caller-supplied transport
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be sent as a header
    pub fn with_transport(config: AdapterConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        request_headers(config.api_token())?;
        Ok(Self { config, transport })
    }
}

impl std::fmt::Debug for OctoAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctoAiAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Llm for OctoAiAdapter {
    fn llm_type(&self) -> &str {
        "octoai_cloud_llm"
    }

    fn identify(&self) -> IdentifyingParams {
        IdentifyingParams {
            endpoint_url: self.config.endpoint_url().to_string(),
            task: self.config.task().map(str::to_string),
            model_kwargs: self.config.model_kwargs(),
        }
    }

    fn generate(&self, prompt: &str, stop: Option<&[String]>) -> Result<String> {
        let request = InferenceRequest {
            prompt: prompt.to_string(),
            parameters: self.config.model_kwargs(),
        };
        let body = serde_json::to_vec(&request)?;
        let headers = request_headers(self.config.api_token())?;

        tracing::debug!(
            endpoint = self.config.endpoint_url(),
            prompt_len = prompt.len(),
            "calling inference endpoint"
        );

        let raw = self
            .transport
            .post(self.config.endpoint_url(), headers, body)?;

        let text = InferenceResponse::parse(&raw)
            .and_then(InferenceResponse::into_text)
            .inspect_err(|e| tracing::warn!(error = %e, "inference endpoint returned a failure"))?;

        Ok(match stop {
            Some(markers) if !markers.is_empty() => enforce_stop_tokens(&text, markers).to_string(),
            _ => text,
        })
    }
}
