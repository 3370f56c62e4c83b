use std::path::PathBuf;

use anyhow::{bail, Result};
use client_core::{ContentService, DiscoveryController, DiscoveryStatus};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast,
    task::JoinHandle,
};
use tracing::{info, warn};

use crate::{
    export::save_rendition,
    view::{render_error, render_footer, render_help, render_hero, render_loading, CardView},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lucky,
    Toggle,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "lucky" | "l" => Command::Lucky,
        "toggle" | "t" => Command::Toggle,
        "reset" | "r" => Command::Reset,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// Terminal front end over a [`DiscoveryController`].
pub struct Session<S: ContentService> {
    controller: DiscoveryController<S>,
    card: CardView,
    rendition_dir: Option<PathBuf>,
}

impl<S: ContentService> Session<S> {
    pub fn new(controller: DiscoveryController<S>, rendition_dir: Option<PathBuf>) -> Self {
        Self {
            controller,
            card: CardView::default(),
            rendition_dir,
        }
    }

    pub fn controller(&self) -> &DiscoveryController<S> {
        &self.controller
    }

    pub fn screen(&self) -> String {
        match self.controller.status() {
            DiscoveryStatus::Idle => render_hero(),
            DiscoveryStatus::Loading => render_loading(),
            DiscoveryStatus::Loaded(content) => self.card.render(content),
            DiscoveryStatus::Failed(message) => {
                format!("{}\n\n{}", render_error(message), render_hero())
            }
        }
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Lucky => {
                self.controller.generate().await;
                self.card = CardView::default();
                let mut out = self.screen();
                if let Some(note) = self.export_rendition() {
                    out.push_str("\n\n");
                    out.push_str(&note);
                }
                Flow::Continue(out)
            }
            Command::Toggle => {
                let toggled = match self.controller.status().content() {
                    Some(content) => self.card.toggle(content),
                    None => {
                        return Flow::Continue(
                            "Nothing to toggle yet. Press Enter to discover a mathematician."
                                .to_string(),
                        )
                    }
                };
                if toggled {
                    Flow::Continue(self.screen())
                } else {
                    Flow::Continue("No AI tribute is available for this mathematician.".to_string())
                }
            }
            Command::Reset => {
                self.controller.reset();
                self.card = CardView::default();
                Flow::Continue(self.screen())
            }
            Command::Help => Flow::Continue(render_help()),
            Command::Quit => Flow::Quit,
            Command::Unknown(input) => {
                Flow::Continue(format!("Unknown command `{input}`.\n{}", render_help()))
            }
        }
    }

    /// Single generation for scripted use. A failed cycle is an error exit.
    pub async fn run_once(&mut self) -> Result<()> {
        if let Flow::Continue(out) = self.handle(Command::Lucky).await {
            println!("{out}");
        }
        println!("{}", render_footer(current_year()));

        if let Some(message) = self.controller.status().error() {
            bail!("{message}");
        }
        Ok(())
    }

    pub async fn run_interactive(&mut self) -> Result<()> {
        println!("{}", self.screen());
        let indicator = spawn_loading_indicator(self.controller.subscribe_status());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match self.handle(parse_command(&line)).await {
                Flow::Continue(out) => println!("\n{out}"),
                Flow::Quit => break,
            }
        }

        indicator.abort();
        println!("{}", render_footer(current_year()));
        Ok(())
    }

    fn export_rendition(&self) -> Option<String> {
        let dir = self.rendition_dir.as_deref()?;
        let content = self.controller.status().content()?;
        match save_rendition(dir, content) {
            Ok(Some(path)) => {
                info!(path = %path.display(), "saved rendition");
                Some(format!("Saved AI tribute to {}", path.display()))
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "failed to save rendition");
                None
            }
        }
    }
}

fn spawn_loading_indicator(mut rx: broadcast::Receiver<DiscoveryStatus>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(DiscoveryStatus::Loading) => println!("\n{}", render_loading()),
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
