//! Wire format of the `generateContent` endpoint.

use crate::analysis::transport::RawResponse;
use crate::SnotracError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pulls `candidates[0].content.parts[0].text` out of a response.
///
/// Non-success statuses are API errors regardless of body; a success body that
/// carries `error` instead of candidates is also an API error. Every other
/// shape is malformed. An empty string is returned as-is.
pub fn extract_text(response: &RawResponse) -> Result<String, SnotracError> {
    let parsed = serde_json::from_str::<GenerateResponse>(&response.body);

    if !response.is_success() {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        return Err(SnotracError::Api {
            status: response.status,
            message,
        });
    }

    let parsed = parsed
        .map_err(|e| SnotracError::MalformedResponse(format!("body is not a valid envelope: {}", e)))?;

    let parts = parsed
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.as_ref());

    if let Some(parts) = parts {
        return parts
            .first()
            .and_then(|p| p.text.clone())
            .ok_or_else(|| SnotracError::MalformedResponse("candidate part has no text".to_string()));
    }

    if let Some(error) = parsed.error {
        return Err(SnotracError::Api {
            status: response.status,
            message: error
                .message
                .unwrap_or_else(|| "unspecified API error".to_string()),
        });
    }

    Err(SnotracError::MalformedResponse(
        "Invalid response format".to_string(),
    ))
}
