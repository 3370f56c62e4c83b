//! Plain-text rendering of the idle, loading, error and result screens.

use std::fmt::Write as _;

use shared::domain::GeneratedContent;

const RULE: &str = "------------------------------------------------------------";

pub fn render_hero() -> String {
    [
        "MathDept Diversity",
        RULE,
        "Discover the mathematicians history overlooked.",
        "Every result comes from a different corner of the world and of time.",
        "",
        "Press Enter (or type `lucky`) to meet someone new. Type `help` for commands.",
    ]
    .join("\n")
}

pub fn render_loading() -> String {
    "Consulting the archives...".to_string()
}

pub fn render_error(message: &str) -> String {
    format!("[!] {message}")
}

pub fn render_footer(year: i32) -> String {
    format!("(c) {year} Dept of Mathematics. Powered by Gemini API.")
}

pub fn render_help() -> String {
    [
        "Commands:",
        "  lucky   (or Enter)  discover a mathematician",
        "  toggle  (t)         switch between historical photo and AI tribute",
        "  reset   (r)         back to the start",
        "  help    (h)         show this help",
        "  quit    (q)         exit",
    ]
    .join("\n")
}

/// Per-card presentation state. Starts on the historical image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardView {
    pub show_rendition: bool,
}

impl CardView {
    /// Flips the portrait. Returns false, leaving the view unchanged, when
    /// the card does not have both images.
    pub fn toggle(&mut self, content: &GeneratedContent) -> bool {
        if !content.can_toggle_rendition() {
            return false;
        }
        self.show_rendition = !self.show_rendition;
        true
    }

    pub fn render(&self, content: &GeneratedContent) -> String {
        let data = &content.text_data;
        let showing_rendition = self.show_rendition && content.can_toggle_rendition();
        let mut out = String::new();

        let _ = writeln!(out, "{}", data.name);
        let _ = writeln!(out, "{} | {}", data.years, data.origin);
        let _ = writeln!(out, "{RULE}");

        match data.real_image() {
            Some(real_image) => {
                let (label, image) = match (showing_rendition, &content.rendition_url) {
                    (true, Some(rendition)) => ("Digital Tribute", rendition.as_str()),
                    _ => ("Historical Image", real_image),
                };
                let _ = writeln!(out, "[{label}] {}", abbreviate_image(image));
                if content.can_toggle_rendition() {
                    let hint = if showing_rendition {
                        "Show Historical Photo"
                    } else {
                        "Show AI Tribute"
                    };
                    let _ = writeln!(out, "  ({hint}: type `toggle`)");
                }
            }
            None => {
                let _ = writeln!(out, "[No historical portrait found in archives.]");
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Biography\n  {}", data.bio);
        let _ = writeln!(out, "Famous Result\n  {}", data.famous_result);
        let _ = writeln!(out, "Legacy & Impact\n  {}", data.impact);

        let sources = content.displayed_sources();
        if !sources.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Sources");
            for source in sources {
                let _ = writeln!(out, "  - {} <{}>", source.title, source.uri);
            }
        }

        let _ = writeln!(out);
        let _ = write!(out, "Type `reset` to go back or press Enter for another.");
        out
    }
}

/// Inline `data:` payloads can be megabytes; show only their header.
fn abbreviate_image(image: &str) -> String {
    match image.split_once(',') {
        Some((header, payload)) if image.starts_with("data:") => {
            format!("{header},... ({} bytes encoded)", payload.len())
        }
        _ => image.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
