use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content service API key is not configured (set API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("content service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("content service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("content service returned no text")]
    EmptyResponse,
    #[error("received malformed data from the archives: {0}")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("no image generated")]
    NoImage,
}
