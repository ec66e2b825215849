use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{AnalysisResult, HistoryEntry},
    error::EnvelopeError,
};

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const HISTORY_PATH: &str = "/api/history";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// `{ "data": ... }` wrapper used by both endpoints. The payload is kept as
/// raw JSON so each endpoint can apply its own leniency rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataEnvelope {
    #[serde(default)]
    pub data: Value,
}

impl DataEnvelope {
    /// Extracts the analyze payload. A missing or null `data` carries no
    /// result; an object's fields default individually.
    pub fn into_analysis(self) -> Result<Option<AnalysisResult>, EnvelopeError> {
        match self.data {
            Value::Null => Ok(None),
            value @ Value::Object(_) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| EnvelopeError::Invalid(err.to_string())),
            _ => Err(EnvelopeError::NotAnObject),
        }
    }

    /// Extracts the history payload. Anything other than an array yields an
    /// empty list.
    pub fn into_history(self) -> Result<Vec<HistoryEntry>, EnvelopeError> {
        match self.data {
            value @ Value::Array(_) => {
                serde_json::from_value(value).map_err(|err| EnvelopeError::Invalid(err.to_string()))
            }
            _ => Ok(Vec::new()),
        }
    }
}
