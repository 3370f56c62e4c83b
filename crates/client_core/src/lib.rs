use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::domain::{GeneratedContent, MathematicianData, Source, DISCOVERY_CATEGORIES};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

pub mod error;
pub mod gemini;

pub use error::ContentError;
pub use gemini::{GeminiConfig, GeminiContentService};

/// User-facing message for any failure of the biography fetch.
pub const ARCHIVE_FAILURE_MESSAGE: &str =
    "We encountered an issue consulting the archives. Please try again.";

const STATUS_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Biography {
    pub data: MathematicianData,
    pub sources: Vec<Source>,
}

/// The remote content capabilities the controller depends on.
#[async_trait]
pub trait ContentService: Send + Sync {
    async fn fetch_biography(&self, category_hint: &str) -> Result<Biography, ContentError>;
    async fn generate_rendition(&self, visual_description: &str) -> Result<String, ContentError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DiscoveryStatus {
    #[default]
    Idle,
    Loading,
    Loaded(GeneratedContent),
    Failed(String),
}

impl DiscoveryStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn content(&self) -> Option<&GeneratedContent> {
        match self {
            Self::Loaded(content) => Some(content),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Uniform draw from the fixed category list.
pub fn pick_category<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DISCOVERY_CATEGORIES[rng.gen_range(0..DISCOVERY_CATEGORIES.len())]
}

/// Drives a generation cycle (biography, then an optional rendition) and
/// owns the resulting status. `generate` takes `&mut self`, so at most one
/// cycle is ever in flight.
pub struct DiscoveryController<S: ContentService> {
    service: S,
    rng: StdRng,
    status: DiscoveryStatus,
    last_category: Option<&'static str>,
    events: broadcast::Sender<DiscoveryStatus>,
}

impl<S: ContentService> DiscoveryController<S> {
    pub fn new(service: S) -> Self {
        Self::with_rng(service, StdRng::from_entropy())
    }

    pub fn with_rng(service: S, rng: StdRng) -> Self {
        let (events, _) = broadcast::channel(STATUS_CHANNEL_CAPACITY);
        Self {
            service,
            rng,
            status: DiscoveryStatus::Idle,
            last_category: None,
            events,
        }
    }

    pub fn status(&self) -> &DiscoveryStatus {
        &self.status
    }

    pub fn last_category(&self) -> Option<&'static str> {
        self.last_category
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn subscribe_status(&self) -> broadcast::Receiver<DiscoveryStatus> {
        self.events.subscribe()
    }

    pub async fn generate(&mut self) -> &DiscoveryStatus {
        self.set_status(DiscoveryStatus::Loading);

        let category = pick_category(&mut self.rng);
        self.last_category = Some(category);
        info!(category, "consulting the archives");

        let next = match self.service.fetch_biography(category).await {
            Ok(Biography { data, sources }) => {
                let rendition_url = self.request_rendition(&data).await;
                info!(
                    name = %data.name,
                    sources = sources.len(),
                    has_rendition = rendition_url.is_some(),
                    "mathematician loaded"
                );
                DiscoveryStatus::Loaded(GeneratedContent {
                    text_data: data,
                    rendition_url,
                    sources,
                })
            }
            Err(err) => {
                error!(error = %err, category, "biography fetch failed");
                DiscoveryStatus::Failed(ARCHIVE_FAILURE_MESSAGE.to_string())
            }
        };

        self.set_status(next);
        &self.status
    }

    pub fn reset(&mut self) {
        self.set_status(DiscoveryStatus::Idle);
    }

    /// Only asks for a rendition when a historical portrait exists. A failed
    /// rendition never fails the cycle.
    async fn request_rendition(&self, data: &MathematicianData) -> Option<String> {
        if !data.has_real_image() {
            return None;
        }

        match self
            .service
            .generate_rendition(&data.visual_description)
            .await
        {
            Ok(rendition) => Some(rendition),
            Err(err) => {
                warn!(error = %err, name = %data.name, "failed to generate rendition");
                None
            }
        }
    }

    fn set_status(&mut self, status: DiscoveryStatus) {
        self.status = status;
        // No subscribers is fine.
        let _ = self.events.send(self.status.clone());
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
