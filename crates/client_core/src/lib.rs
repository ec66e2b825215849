//! Client-side core of the text analyzer: submission and history controllers,
//! the disclosure side table, and the view model rendered from them.

use async_trait::async_trait;
use shared::domain::{AnalysisResult, HistoryEntry};

pub mod disclosure;
pub mod error;
pub mod history;
pub mod session;
pub mod submission;
pub mod transport;
pub mod view;

pub use disclosure::DisclosureMap;
pub use error::BackendError;
pub use history::{HistoryController, HistorySnapshot};
pub use session::AnalyzerSession;
pub use submission::{SubmissionController, SubmissionSnapshot};
pub use transport::HttpAnalysisBackend;
pub use view::{render, ScreenView};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Remote collaborator providing analysis and the stored history.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// `Ok(None)` when the service answered successfully without a result.
    async fn analyze(&self, text: &str) -> Result<Option<AnalysisResult>, BackendError>;
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, BackendError>;
}

/// Emitted after every observable state change, carrying the flags a
/// renderer needs to decide whether to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    SubmissionChanged { submitting: bool, has_result: bool },
    HistoryChanged { loading: bool, entries: usize },
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
