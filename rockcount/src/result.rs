//! Analysis result record

use crate::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the reported count was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Distance-transform watershed labeled the regions
    Watershed,
    /// 8-connected component labeling labeled the regions
    ConnectedComponents,
    /// No count was produced
    None,
}

impl Method {
    /// Wire name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Watershed => "watershed",
            Method::ConnectedComponents => "connected_components",
            Method::None => "none",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one analysis: `{count, method, error}`.
///
/// On failure `count` is 0, `method` is [`Method::None`] and `error` holds
/// the message; on success `error` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Number of regions inside the area band
    pub count: u64,
    /// Labeling method that produced `count`
    pub method: Method,
    /// Failure message, absent on success
    pub error: Option<String>,
}

impl AnalysisResult {
    /// A successful count
    pub fn counted(count: u64, method: Method) -> Self {
        Self {
            count,
            method,
            error: None,
        }
    }

    /// A failed analysis
    pub fn failed(error: &AnalysisError) -> Self {
        Self {
            count: 0,
            method: Method::None,
            error: Some(error.to_string()),
        }
    }

    /// Whether the analysis succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
