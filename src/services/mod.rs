//! Service layer for the hosted inference endpoint
//!
//! This module provides:
//! - [`Llm`], the model interface the host framework calls into
//! - [`octoai::OctoAiAdapter`], its implementation for OctoAI Cloud
//! - [`transport`], the single blocking HTTP call the adapter makes

pub mod octoai;
pub mod transport;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{OctoAiError, Result};

/// Request body sent to the inference endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub prompt: String,
    pub parameters: Map<String, Value>,
}

/// Parsed response body from the inference endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResponse {
    /// `{"generated_text": "..."}`
    Generated(String),
    /// `{"error": ...}`
    Failed(Value),
}

impl InferenceResponse {
    /// Parse a raw response body
    ///
    /// An `error` key takes precedence over `generated_text`.
    ///
    /// # Errors
    ///
    /// Returns [`OctoAiError::MalformedResponse`] if the body is not a JSON
    /// object or has no string `generated_text`
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| OctoAiError::MalformedResponse(format!("body is not valid JSON: {e}")))?;

        let Value::Object(mut fields) = value else {
            return Err(OctoAiError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        };

        if let Some(error) = fields.remove("error") {
            return Ok(Self::Failed(error));
        }

        match fields.remove("generated_text") {
            Some(Value::String(text)) => Ok(Self::Generated(text)),
            Some(other) => Err(OctoAiError::MalformedResponse(format!(
                "`generated_text` is not a string: {other}"
            ))),
            None => Err(OctoAiError::MalformedResponse(
                "missing `generated_text`".to_string(),
            )),
        }
    }

    /// Turn the response into generated text or an inference error
    ///
    /// # Errors
    ///
    /// Returns [`OctoAiError::Inference`] for a `Failed` response
    pub fn into_text(self) -> Result<String> {
        match self {
            Self::Generated(text) => Ok(text),
            Self::Failed(Value::String(message)) => Err(OctoAiError::Inference(message)),
            Self::Failed(other) => Err(OctoAiError::Inference(other.to_string())),
        }
    }
}

/// Parameters identifying a configured model, for logging and cache keys
///
/// Never carries the API token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifyingParams {
    pub endpoint_url: String,
    pub task: Option<String>,
    pub model_kwargs: Map<String, Value>,
}

/// Model interface exposed to the prompt-orchestration host
pub trait Llm: Send + Sync {
    /// Short identifier for this kind of model
    fn llm_type(&self) -> &str;

    /// Identifying parameters of this model instance
    fn identify(&self) -> IdentifyingParams;

    /// Run the model on `prompt`, truncating at the earliest stop marker
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the endpoint reports a failure
    fn generate(&self, prompt: &str, stop: Option<&[String]>) -> Result<String>;
}

/// Cut `text` just before the earliest occurrence of any stop marker
///
/// An empty marker matches at index 0. Text without any marker is returned whole.
#[must_use]
pub fn enforce_stop_tokens<'a>(text: &'a str, stop: &[String]) -> &'a str {
    stop.iter()
        .filter_map(|marker| text.find(marker.as_str()))
        .min()
        .map_or(text, |index| &text[..index])
}
