use crate::ObjectKind;
use std::collections::HashMap;
use url::Url;

/// A list of datapoints, like card names
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Catalog {
    /// Always `catalog`
    pub object: ObjectKind,

    /// The catalog api uri.
    ///
    /// Autocomplete results do not have this.
    pub uri: Option<Url>,

    /// The number of items in `data`
    pub total_values: u64,

    /// The datapoints
    pub data: Vec<String>,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}
