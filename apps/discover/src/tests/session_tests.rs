use super::*;

use async_trait::async_trait;
use client_core::{Biography, ContentError};
use shared::domain::{MathematicianData, Source};

struct TestContentService {
    real_image_url: Option<String>,
    rendition: Option<String>,
    fail: bool,
}

#[async_trait]
impl ContentService for TestContentService {
    async fn fetch_biography(&self, _category_hint: &str) -> Result<Biography, ContentError> {
        if self.fail {
            return Err(ContentError::EmptyResponse);
        }
        Ok(Biography {
            data: MathematicianData {
                name: "Ada T.".to_string(),
                years: "1800-1850".to_string(),
                origin: "X".to_string(),
                bio: "Taught herself calculus.".to_string(),
                famous_result: "A summation identity.".to_string(),
                impact: "Used in numerical analysis.".to_string(),
                visual_description: "wool shawl".to_string(),
                real_image_url: self.real_image_url.clone(),
            },
            sources: vec![Source {
                title: "Archive".to_string(),
                uri: "https://example.org/ada".to_string(),
            }],
        })
    }

    async fn generate_rendition(&self, _visual_description: &str) -> Result<String, ContentError> {
        self.rendition.clone().ok_or(ContentError::NoImage)
    }
}

fn session(service: TestContentService) -> Session<TestContentService> {
    Session::new(DiscoveryController::new(service), None)
}

fn output(flow: Flow) -> String {
    match flow {
        Flow::Continue(out) => out,
        Flow::Quit => panic!("unexpected quit"),
    }
}

#[test]
fn parses_commands_and_aliases() {
    assert_eq!(parse_command(""), Command::Lucky);
    assert_eq!(parse_command("  LUCKY "), Command::Lucky);
    assert_eq!(parse_command("t"), Command::Toggle);
    assert_eq!(parse_command("reset"), Command::Reset);
    assert_eq!(parse_command("?"), Command::Help);
    assert_eq!(parse_command("exit"), Command::Quit);
    assert_eq!(
        parse_command("dance"),
        Command::Unknown("dance".to_string())
    );
}

#[tokio::test]
async fn idle_screen_is_hero() {
    let session = session(TestContentService {
        real_image_url: None,
        rendition: None,
        fail: false,
    });
    assert_eq!(session.screen(), render_hero());
}

#[tokio::test]
async fn lucky_renders_card_and_reset_returns_to_hero() {
    let mut session = session(TestContentService {
        real_image_url: Some("http://img".to_string()),
        rendition: Some("data:image/png;base64,QUJD".to_string()),
        fail: false,
    });

    let card = output(session.handle(Command::Lucky).await);
    assert!(card.contains("Ada T."));
    assert!(card.contains("[Historical Image] http://img"));
    assert!(card.contains("Archive <https://example.org/ada>"));

    let toggled = output(session.handle(Command::Toggle).await);
    assert!(toggled.contains("[Digital Tribute]"));

    let reset = output(session.handle(Command::Reset).await);
    assert_eq!(reset, render_hero());
    assert_eq!(session.controller().status(), &DiscoveryStatus::Idle);
}

#[tokio::test]
async fn new_result_starts_on_historical_image() {
    let mut session = session(TestContentService {
        real_image_url: Some("http://img".to_string()),
        rendition: Some("data:image/png;base64,QUJD".to_string()),
        fail: false,
    });

    session.handle(Command::Lucky).await;
    session.handle(Command::Toggle).await;
    let next = output(session.handle(Command::Lucky).await);

    assert!(next.contains("[Historical Image]"));
}

#[tokio::test]
async fn failure_shows_banner_above_hero() {
    let mut session = session(TestContentService {
        real_image_url: None,
        rendition: None,
        fail: true,
    });

    let out = output(session.handle(Command::Lucky).await);

    assert!(out.starts_with(&render_error(client_core::ARCHIVE_FAILURE_MESSAGE)));
    assert!(out.ends_with(&render_hero()));
}

#[tokio::test]
async fn toggle_is_refused_without_tribute() {
    let mut session = session(TestContentService {
        real_image_url: None,
        rendition: Some("data:image/png;base64,QUJD".to_string()),
        fail: false,
    });

    let before = output(session.handle(Command::Toggle).await);
    assert!(before.starts_with("Nothing to toggle yet"));

    session.handle(Command::Lucky).await;
    let after = output(session.handle(Command::Toggle).await);
    assert_eq!(after, "No AI tribute is available for this mathematician.");
}

#[tokio::test]
async fn quit_ends_session() {
    let mut session = session(TestContentService {
        real_image_url: None,
        rendition: None,
        fail: false,
    });
    assert_eq!(session.handle(Command::Quit).await, Flow::Quit);
}
