use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{MathematicianData, Source},
    error::ApiError,
    protocol::{GenerateContentRequest, GenerateContentResponse},
};
use tracing::{debug, error};

use crate::{error::ContentError, Biography, ContentService};

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub text_model: String,
    pub image_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            text_model: DEFAULT_TEXT_MODEL.into(),
            image_model: DEFAULT_IMAGE_MODEL.into(),
        }
    }
}

/// Content service backed by the Gemini `generateContent` REST endpoint.
pub struct GeminiContentService {
    http: Client,
    config: GeminiConfig,
}

impl GeminiContentService {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn api_key(&self) -> Result<&str, ContentError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ContentError::MissingApiKey)
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ContentError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/models/{model}:generateContent",
            self.config.api_base_url.trim_end_matches('/')
        );
        debug!(model, "requesting generated content");

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let api_error = ApiError::from_body(status.as_u16(), &body);
            return Err(ContentError::Status {
                status: status.as_u16(),
                message: api_error.message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContentService for GeminiContentService {
    async fn fetch_biography(&self, category_hint: &str) -> Result<Biography, ContentError> {
        let request =
            GenerateContentRequest::from_prompt(biography_prompt(category_hint)).with_google_search();
        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        let text = response.text().ok_or(ContentError::EmptyResponse)?;
        let data = parse_biography_payload(&text).inspect_err(|err| {
            error!(error = %err, raw = %text, "failed to parse biography payload");
        })?;
        let sources = collect_sources(&response);

        Ok(Biography { data, sources })
    }

    async fn generate_rendition(&self, visual_description: &str) -> Result<String, ContentError> {
        let request = GenerateContentRequest::from_prompt(rendition_prompt(visual_description));
        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;

        response
            .first_inline_data()
            .map(|inline| inline.to_data_uri())
            .ok_or(ContentError::NoImage)
    }
}

pub fn biography_prompt(category_hint: &str) -> String {
    format!(
        r#"Identify a mathematician fitting the description: "{category_hint}".
Focus on someone who is lesser-known to the general public but had a significant impact.

You MUST find a real, valid URL for a photograph or portrait of this person from the web (e.g. Wikimedia Commons).

Return ONLY a raw JSON object (no markdown formatting like ```json) with the following structure:
{{
  "name": "Name",
  "years": "Birth-Death",
  "origin": "Country/Region",
  "bio": "2-3 sentence biography",
  "famousResult": "Brief explanation of their most famous theorem/result",
  "impact": "Why their work matters today",
  "visualDescription": "Visual details for an AI art generator (clothing, setting, appearance)",
  "realImageUrl": "A direct URL to a real image/portrait found online. Leave empty if absolutely no image is found."
}}"#
    )
}

pub fn rendition_prompt(visual_description: &str) -> String {
    format!(
        "A tasteful, artistic digital tribute portrait of a mathematician.\n\
         Description: {visual_description}.\n\
         Style: Realistic oil painting or charcoal drawing, dignified, academic, soft lighting."
    )
}

/// Parses the model's JSON answer, tolerating markdown fences and
/// surrounding prose.
pub fn parse_biography_payload(text: &str) -> Result<MathematicianData, ContentError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    match serde_json::from_str::<MathematicianData>(cleaned) {
        Ok(data) => Ok(data.normalized()),
        Err(err) => {
            let embedded = cleaned
                .find('{')
                .zip(cleaned.rfind('}'))
                .filter(|(start, end)| start < end)
                .map(|(start, end)| &cleaned[start..=end]);
            match embedded {
                Some(object) if object.len() < cleaned.len() => {
                    serde_json::from_str::<MathematicianData>(object)
                        .map(MathematicianData::normalized)
                        .map_err(ContentError::MalformedPayload)
                }
                _ => Err(ContentError::MalformedPayload(err)),
            }
        }
    }
}

/// Web citations from the first candidate's grounding metadata, in order.
pub fn collect_sources(response: &GenerateContentResponse) -> Vec<Source> {
    response
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref().filter(|u| !u.is_empty())?;
            let title = web.title.as_deref().filter(|t| !t.is_empty())?;
            Some(Source {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/gemini_tests.rs"]
mod tests;
