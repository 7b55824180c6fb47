//! Request and response types for the Gemini `generateContent` endpoint.
//! These types mirror the REST API's JSON field names exactly.

use serde::{Deserialize, Serialize};

// ── Request ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    /// Always "application/json" — we request structured output, not prose.
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,

    /// Declared output shape. Advisory to the generator; the response is
    /// still validated on receipt.
    #[serde(rename = "responseSchema")]
    pub response_schema: serde_json::Value,

    pub temperature: f32,
}

impl GenerateContentRequest {
    pub fn new(prompt: String, temperature: f32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: keyword_response_schema(),
                temperature,
            },
        }
    }
}

/// The declared response shape: an array of objects with a required string
/// `keyword` and an optional string `vietnameseTranslation`.
pub fn keyword_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "keyword": {
                    "type": "STRING",
                    "description": "The generated YouTube keyword, 2-3 words long, in the specified target language.",
                },
                "vietnameseTranslation": {
                    "type": "STRING",
                    "description": "Vietnamese translation of the keyword. ONLY provide this field if the target language is NOT Vietnamese.",
                },
            },
            "required": ["keyword"],
        },
    })
}

// ── Response envelope ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_api_field_names() {
        let req = GenerateContentRequest::new("find keywords".to_string(), 0.7);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "find keywords");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        let temp = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.7).abs() < 1e-6);
        assert_eq!(
            json["generationConfig"]["responseSchema"]["items"]["required"][0],
            "keyword"
        );
    }

    #[test]
    fn envelope_text_concatenates_first_candidate_parts() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"keyword\""},{"text":":\"a b\"}]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.text().as_deref(), Some(r#"[{"keyword":"a b"}]"#));
    }

    #[test]
    fn envelope_text_none_when_empty() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(resp.text(), None);
    }
}
