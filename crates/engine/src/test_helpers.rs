//! Shared test helpers for engine tests.

use crate::analyst::Analyst;
use auditflow_core::analysis::AnalysisConfig;
use auditflow_core::error::ProviderError;
use auditflow_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A provider that replays scripted results and records every request.
///
/// Panics if more calls are made than results provided.
pub struct ScriptedProvider {
    results: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
    credentials: bool,
}

impl ScriptedProvider {
    pub fn new(results: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            requests: Mutex::new(Vec::new()),
            credentials: true,
        }
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn without_credentials() -> Self {
        Self {
            credentials: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    fn has_credentials(&self) -> bool {
        self.credentials
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let model = request.model.clone();
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        let next = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedProvider: no more results (call #{call})"));

        next.map(|text| ProviderResponse {
            text,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model,
        })
    }
}

/// An analyst over `provider` with default config.
pub fn analyst_with(provider: ScriptedProvider) -> Analyst {
    Analyst::new(Arc::new(provider), AnalysisConfig::default())
}

/// An analyst plus a handle to inspect the provider afterwards.
pub fn shared_analyst(provider: ScriptedProvider) -> (Arc<ScriptedProvider>, Analyst) {
    let provider = Arc::new(provider);
    let analyst = Analyst::new(provider.clone(), AnalysisConfig::default());
    (provider, analyst)
}
