use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

// Classroom policy: block at the lowest threshold across all four harm
// categories.
const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const BLOCK_THRESHOLD: &str = "BLOCK_LOW_AND_ABOVE";

// The student's text is appended to the master prompt as-is. Neither side is
// escaped, so a crafted submission can impersonate the instruction prefix;
// known limitation.
const PROMPT_DELIMITER: &str = "\n\n---\n\n";

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 512;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Tagged result of one generation call. The caller branches on the two arms
/// instead of unwinding; `generate` never returns an `Err` and never panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answer(String),
    Failed(String),
}

pub struct GeminiAgent {
    client: Client,
    endpoint: String,
}

impl GeminiAgent {
    pub fn new(endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, endpoint }
    }

    pub async fn generate(
        &self,
        prompt_text: &str,
        master_prompt: &str,
        api_key: &str,
    ) -> Outcome {
        let full_prompt = compose_prompt(master_prompt, prompt_text);
        info!(
            "Requesting generation (prompt length: {} chars)",
            full_prompt.len()
        );

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: full_prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: BLOCK_THRESHOLD.to_string(),
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!("{}?key={}", self.endpoint, api_key);
        let response = match self.client.post(&url).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Generation request failed: {}", e);
                return Outcome::Failed(format!("Request failed: {}", e));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => return Outcome::Failed(format!("Response read failed: {}", e)),
        };

        if !status.is_success() {
            warn!("Generation endpoint returned HTTP {}", status.as_u16());
            return Outcome::Failed(format!("HTTP {}: {}", status.as_u16(), text));
        }

        read_body(&text)
    }
}

fn compose_prompt(master_prompt: &str, prompt_text: &str) -> String {
    format!("{}{}{}", master_prompt, PROMPT_DELIMITER, prompt_text)
}

// A 2xx body resolves to exactly one arm: candidate text, safety block, or
// neither.
fn read_body(body: &str) -> Outcome {
    let parsed: GenerateResponse = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(e) => return Outcome::Failed(format!("Parse error: {}", e)),
    };

    for candidate in &parsed.candidates {
        if let Some(content) = &candidate.content {
            for part in &content.parts {
                if let Some(text) = &part.text {
                    if !text.trim().is_empty() {
                        return Outcome::Answer(text.trim().to_string());
                    }
                }
            }
        }
    }

    if let Some(feedback) = parsed.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            return Outcome::Failed(format!("blocked: {}", reason));
        }
    }

    Outcome::Failed("unexpected response structure".to_string())
}
