//! Plain-text rendering of the screen view model.

use std::fmt;

use client_core::{view::HistoryRow, ScreenView};

const INDENT: &str = "    ";

pub struct ScreenText<'a>(pub &'a ScreenView);

impl fmt::Display for ScreenText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "Analyze Text")?;
        if !view.input.is_empty() {
            writeln!(f, "> {}", view.input)?;
        }
        let state = if view.submit.disabled { " (disabled)" } else { "" };
        writeln!(f, "[{}]{state}", view.submit.label)?;

        if let Some(result) = &view.result {
            writeln!(f)?;
            writeln!(f, "Analysis Results")?;
            writeln!(f, "Title: {}", result.title)?;
            writeln!(f, "Summary: {}", result.summary)?;
            writeln!(f, "Sentiment: {}", result.sentiment)?;
            writeln!(f, "Topics: {}", result.topics)?;
            writeln!(f, "Keywords: {}", result.keywords)?;
        }

        writeln!(f)?;
        writeln!(f, "History")?;
        if view.history.loading {
            writeln!(f, "Loading...")?;
        }
        if let Some(notice) = view.history.empty_notice {
            writeln!(f, "{notice}")?;
        }
        for row in &view.history.rows {
            write_row(f, row)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &HistoryRow) -> fmt::Result {
    let marker = if row.detail.is_some() { '-' } else { '+' };
    if row.timestamp.is_empty() {
        writeln!(f, "[{marker}] {} {}", row.id, row.title)?;
    } else {
        writeln!(f, "[{marker}] {} {} ({})", row.id, row.title, row.timestamp)?;
    }

    if let Some(detail) = &row.detail {
        writeln!(f, "{INDENT}Input: {}", detail.user_input)?;
        writeln!(f, "{INDENT}Summary: {}", detail.summary)?;
        writeln!(f, "{INDENT}Sentiment: {}", detail.sentiment)?;
        writeln!(f, "{INDENT}Topics: {}", detail.topics)?;
        writeln!(f, "{INDENT}Keywords: {}", detail.keywords)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
