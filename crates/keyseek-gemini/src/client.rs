//! HTTP client for the Gemini generateContent API.

use reqwest::Client;
use tracing::{debug, error, instrument, warn};

use keyseek_core::{KeywordResult, KeyseekError, Result, SearchCriteria};

use crate::parse::parse_keywords;
use crate::prompt::build_prompt;
use crate::protocol::{GenerateContentRequest, GenerateContentResponse};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for keyword generation. The credential is an explicit construction
/// parameter; it is never read from ambient process state here, so tests can
/// construct a client without touching the environment.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, temperature: f32) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            model,
            temperature,
        }
    }

    /// Run one generation call: criteria → prompt → external call → typed
    /// results. Transport failures and non-2xx statuses surface as
    /// `Network`; a body that fails validation surfaces as `Schema`.
    #[instrument(skip(self, criteria), fields(topic = %criteria.topic))]
    pub async fn generate_keywords(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<KeywordResult>> {
        let prompt = build_prompt(criteria);
        let request = GenerateContentRequest::new(prompt, self.temperature);
        let url = format!("{}/{}:generateContent", API_BASE, self.model);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Generation request failed: {e}");
                KeyseekError::Network("failed to reach the generation service".to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, body = %truncate(&body, 500), "Generation call returned an error");
            return Err(KeyseekError::Network(format!(
                "generation service returned {status}"
            )));
        }

        let envelope: GenerateContentResponse = resp.json().await.map_err(|e| {
            error!("Failed to decode response envelope: {e}");
            KeyseekError::Schema("response envelope is not valid JSON".to_string())
        })?;

        let text = envelope.text().ok_or_else(|| {
            KeyseekError::Schema("response contained no candidate text".to_string())
        })?;

        let results = parse_keywords(&text)?;
        debug!("Parsed {} keyword results", results.len());

        // The requested count is a prompt-level request, not a contract.
        if results.len() != criteria.keyword_count as usize {
            warn!(
                requested = criteria.keyword_count,
                received = results.len(),
                "Generator did not honor the requested keyword count"
            );
        }

        Ok(results)
    }
}

fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
