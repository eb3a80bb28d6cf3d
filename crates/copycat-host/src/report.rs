//! Textual and JSON forms of a reconciliation result.

use copycat::MatchResult;
use serde::{Deserialize, Serialize};

/// `# of mapped nodes:\t<n>\t# of unmapped nodes:\t<m>`, or `None` without a result.
pub fn text_line(result: Option<&MatchResult>) -> Option<String> {
    result.map(|r| {
        format!(
            "# of mapped nodes:\t{}\t# of unmapped nodes:\t{}",
            r.mapped_count(),
            r.unmapped_count()
        )
    })
}

/// `{"mappedNodeCount":n,"unmappedNodeCount":m}`, or `{}` without a result.
pub fn json(result: Option<&MatchResult>) -> serde_json::Value {
    match result {
        Some(r) => serde_json::to_value(r).unwrap_or_else(|_| serde_json::json!({})),
        None => serde_json::json!({}),
    }
}

/// Response envelope returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub data: Option<MatchResult>,
    pub errors: Vec<ResponseError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseError {
    pub status: u16,
    pub resource_path: String,
    pub error_code: String,
    pub message: String,
}

impl Response {
    pub fn success(data: Option<MatchResult>) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn failure(
        status: u16,
        resource_path: impl Into<String>,
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            data: None,
            errors: vec![ResponseError {
                status,
                resource_path: resource_path.into(),
                error_code: error_code.into(),
                message: message.into(),
            }],
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
