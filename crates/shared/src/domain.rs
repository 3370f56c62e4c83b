use serde::{Deserialize, Serialize};

/// Descriptors steering the content service toward a particular slice of
/// mathematicians. One is drawn uniformly at random per generation.
pub const DISCOVERY_CATEGORIES: &[&str] = &[
    "a female mathematician from the 19th or early 20th century",
    "an African American mathematician who made history",
    "an ancient mathematician from India, China, or the Middle East",
    "a lesser-known contributor to modern computer science or cryptography",
    "an indigenous mathematician",
    "a mathematician from South America",
    "a mathematician who overcame significant disability or discrimination",
    "a pioneer in statistics from a non-western country",
];

/// Number of sources shown on a card.
pub const MAX_DISPLAYED_SOURCES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathematicianData {
    pub name: String,
    pub years: String,
    pub origin: String,
    pub bio: String,
    pub famous_result: String,
    pub impact: String,
    pub visual_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_image_url: Option<String>,
}

impl MathematicianData {
    /// The historical portrait URL, with blank strings treated as absent.
    pub fn real_image(&self) -> Option<&str> {
        self.real_image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn has_real_image(&self) -> bool {
        self.real_image().is_some()
    }

    /// Drops a blank `real_image_url` so absence has a single representation.
    pub fn normalized(mut self) -> Self {
        self.real_image_url = self.real_image().map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub text_data: MathematicianData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendition_url: Option<String>,
    pub sources: Vec<Source>,
}

impl GeneratedContent {
    pub fn displayed_sources(&self) -> &[Source] {
        let end = self.sources.len().min(MAX_DISPLAYED_SOURCES);
        &self.sources[..end]
    }

    /// The toggle between portrait and rendition only makes sense when both exist.
    pub fn can_toggle_rendition(&self) -> bool {
        self.text_data.has_real_image() && self.rendition_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(real_image_url: Option<&str>) -> MathematicianData {
        MathematicianData {
            name: "Ada T.".into(),
            years: "1800-1850".into(),
            origin: "X".into(),
            bio: "bio".into(),
            famous_result: "result".into(),
            impact: "impact".into(),
            visual_description: "dark coat".into(),
            real_image_url: real_image_url.map(str::to_string),
        }
    }

    #[test]
    fn blank_real_image_url_counts_as_absent() {
        assert!(!sample(Some("")).has_real_image());
        assert!(!sample(Some("   ")).has_real_image());
        assert!(!sample(None).has_real_image());
        assert_eq!(sample(Some(" http://img ")).real_image(), Some("http://img"));
    }

    #[test]
    fn normalized_drops_blank_url() {
        assert_eq!(sample(Some("")).normalized().real_image_url, None);
        assert_eq!(
            sample(Some("http://img")).normalized().real_image_url.as_deref(),
            Some("http://img")
        );
    }

    #[test]
    fn deserializes_camel_case_payload_without_image() {
        let data: MathematicianData = serde_json::from_str(
            r#"{"name":"N","years":"1-2","origin":"O","bio":"B","famousResult":"F","impact":"I","visualDescription":"V"}"#,
        )
        .expect("parse");
        assert_eq!(data.famous_result, "F");
        assert_eq!(data.real_image_url, None);
    }

    #[test]
    fn displayed_sources_are_capped() {
        let content = GeneratedContent {
            text_data: sample(Some("http://img")),
            rendition_url: None,
            sources: (0..5)
                .map(|i| Source {
                    title: format!("t{i}"),
                    uri: format!("https://s/{i}"),
                })
                .collect(),
        };
        assert_eq!(content.displayed_sources().len(), MAX_DISPLAYED_SOURCES);
        assert_eq!(content.displayed_sources()[0].title, "t0");
        assert!(!content.can_toggle_rendition());
    }
}
