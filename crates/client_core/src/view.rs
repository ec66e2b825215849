//! Pure projection of controller state into what the screen shows.

use std::sync::OnceLock;

use chrono::Locale;
use shared::domain::{EntryId, HistoryEntry};

use crate::{history::HistorySnapshot, submission::SubmissionSnapshot};

pub const SUBMIT_LABEL: &str = "Analyze";
pub const SUBMIT_LABEL_BUSY: &str = "Analyzing...";
pub const EMPTY_HISTORY_NOTICE: &str = "No history found";

const LIST_SEPARATOR: &str = ", ";
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

static DISPLAY_LOCALE: OnceLock<Locale> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub input: String,
    pub submit: SubmitControl,
    pub result: Option<ResultPanel>,
    pub history: HistoryPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub title: String,
    pub summary: String,
    pub sentiment: String,
    pub topics: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPanel {
    pub loading: bool,
    pub rows: Vec<HistoryRow>,
    pub empty_notice: Option<&'static str>,
}

/// One history line: title and timestamp always, detail only when expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub id: EntryId,
    pub title: String,
    pub timestamp: String,
    pub detail: Option<HistoryDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDetail {
    pub user_input: String,
    pub summary: String,
    pub sentiment: String,
    pub topics: String,
    pub keywords: String,
}

pub fn render(submission: &SubmissionSnapshot, history: &HistorySnapshot) -> ScreenView {
    let submit = SubmitControl {
        label: if submission.submitting {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL
        },
        disabled: submission.submitting,
    };

    let result = submission.result.as_ref().map(|result| ResultPanel {
        title: result.title.clone(),
        summary: result.summary.clone(),
        sentiment: result.sentiment.clone(),
        topics: result.topics.join(LIST_SEPARATOR),
        keywords: result.keywords.join(LIST_SEPARATOR),
    });

    let rows: Vec<HistoryRow> = history
        .entries
        .iter()
        .map(|entry| history_row(entry, history.disclosure.is_expanded(&entry.id)))
        .collect();
    let empty_notice = (!history.loading && rows.is_empty()).then_some(EMPTY_HISTORY_NOTICE);

    ScreenView {
        input: submission.input.clone(),
        submit,
        result,
        history: HistoryPanel {
            loading: history.loading,
            rows,
            empty_notice,
        },
    }
}

fn history_row(entry: &HistoryEntry, expanded: bool) -> HistoryRow {
    HistoryRow {
        id: entry.id.clone(),
        title: entry.title.clone(),
        timestamp: format_timestamp(entry),
        detail: expanded.then(|| HistoryDetail {
            user_input: entry.user_input.clone(),
            summary: entry.summary.clone(),
            sentiment: entry.sentiment.clone(),
            topics: entry.topics.join(LIST_SEPARATOR),
            keywords: entry.keywords.join(LIST_SEPARATOR),
        }),
    }
}

/// Local-time rendering of `created_at` in the display locale. Empty when
/// absent; an unparseable value is shown as sent.
pub fn format_timestamp(entry: &HistoryEntry) -> String {
    format_timestamp_in(entry, display_locale())
}

pub fn format_timestamp_in(entry: &HistoryEntry, locale: Locale) -> String {
    match (&entry.created_at, entry.created_at_local()) {
        (None, _) => String::new(),
        (Some(_), Some(local)) => local.format_localized("%c", locale).to_string(),
        (Some(raw), None) => raw.clone(),
    }
}

/// Locale taken from the first non-empty of `LC_ALL`, `LC_TIME`, `LANG`,
/// resolved once per process. Falls back to POSIX.
pub fn display_locale() -> Locale {
    *DISPLAY_LOCALE.get_or_init(|| {
        LOCALE_VARS
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.trim().is_empty())
            .and_then(|value| parse_locale(&value))
            .unwrap_or(Locale::POSIX)
    })
}

/// Parses names like `fr_FR.UTF-8` or `de_DE@euro`, ignoring codeset and
/// modifier.
pub fn parse_locale(raw: &str) -> Option<Locale> {
    let name = raw.split(['.', '@']).next()?.trim();
    match name {
        "" => None,
        "C" | "POSIX" => Some(Locale::POSIX),
        _ => Locale::try_from(name).ok(),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
