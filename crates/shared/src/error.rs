use serde::{Deserialize, Serialize};

/// Error envelope returned by the generative-content API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ApiError {
    /// Best-effort decode of an error body; falls back to the raw text.
    pub fn from_body(code: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => envelope.error,
            Err(_) => Self {
                code: i64::from(code),
                message: body.trim().to_string(),
                status: None,
            },
        }
    }
}
