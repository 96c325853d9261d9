use std::collections::HashMap;

/// An error object sent by the api
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApiError {
    /// The http status
    pub status: u16,

    /// A computer-friendly error code, like `not_found`
    pub code: String,

    /// A human-readable explanation
    pub details: String,

    /// Extra classification, like `ambiguous`
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Non-fatal issues with the request
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code `{}`, status {})", self.details, self.code, self.status)
    }
}

impl std::error::Error for ApiError {}
