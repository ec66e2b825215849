//! Line-oriented interactive loop over a mounted session.

use anyhow::{Context, Result};
use client_core::AnalyzerSession;
use shared::domain::EntryId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::render::ScreenText;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Submit(String),
    Toggle(EntryId),
    Refresh,
    Redraw,
    Quit,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => Self::Redraw,
            ":quit" | ":q" => Self::Quit,
            ":refresh" => Self::Refresh,
            ":toggle" => {
                warn!("usage: :toggle ID");
                Self::Redraw
            }
            _ => match trimmed.strip_prefix(":toggle ") {
                Some(raw) => Self::Toggle(parse_entry_id(raw)),
                None => Self::Submit(line.to_string()),
            },
        }
    }
}

/// Numeric ids are matched as integers; anything else as text.
pub fn parse_entry_id(raw: &str) -> EntryId {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(value) => EntryId::Int(value),
        Err(_) => EntryId::Text(raw.to_string()),
    }
}

pub async fn run(session: &AnalyzerSession) -> Result<()> {
    println!("{}", ScreenText(&session.view().await));
    println!("Type text to analyze, ':toggle ID', ':refresh' or ':quit'.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = ReplCommand::parse(&line);
        debug!(?command, "interactive command");
        match command {
            ReplCommand::Quit => break,
            ReplCommand::Redraw => {}
            ReplCommand::Refresh => session.history().refresh().await,
            ReplCommand::Toggle(id) => {
                session.history().toggle_disclosure(&id).await;
            }
            ReplCommand::Submit(text) => {
                session.submission().set_input(text).await;
                println!("{}", ScreenText(&session.view().await));
                session.submission().submit_input().await;
            }
        }
        println!("{}", ScreenText(&session.view().await));
    }
    Ok(())
}
