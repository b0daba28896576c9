//! LLM provider implementations for AuditFlow.
//!
//! All providers implement the `auditflow_core::Provider` trait.
//! `build_from_config` wires the configured provider for the engine.

pub mod gemini;

pub use gemini::GeminiProvider;

use auditflow_config::AppConfig;
use auditflow_core::Provider;
use std::sync::Arc;
use std::time::Duration;

/// Build the configured provider.
///
/// A missing API key still yields a provider; it reports
/// `has_credentials() == false` and refuses requests locally.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn Provider> {
    let provider = GeminiProvider::new(config.api_key.clone().unwrap_or_default())
        .with_base_url(&config.provider.base_url)
        .with_timeout(Duration::from_secs(config.provider.timeout_secs));
    Arc::new(provider)
}
