//! octoai-llm: OctoAI Cloud inference adapter
//!
//! This library adapts a hosted OctoAI Cloud inference endpoint to a generic
//! language-model interface ([`services::Llm`]): one blocking POST per call,
//! optional stop-marker truncation, and a strict, environment-aware
//! configuration layer.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod services;

// Re-exports for convenience
pub use config::AdapterConfig;
pub use error::{OctoAiError, Result};
pub use services::{octoai::OctoAiAdapter, IdentifyingParams, Llm};
